//! # Shared Command Utilities
//!
//! Flag-parsing helpers and the service/version scope resolution every
//! command handler goes through. Flag validation happens before any API
//! call; scope resolution is the only step allowed to touch the network
//! before the command's own operation.

use std::io::Write;

use getopts::{Matches, Options};

use crate::commands::Globals;
use crate::errors::Error;
use crate::manifest;
use crate::version::{self, VersionSelector};

/// Adds the flags every service-scoped command accepts.
pub fn service_opts(opts: &mut Options) {
    opts.optopt("", "service-id", "Service ID to operate on", "ID");
    opts.optflag("v", "verbose", "Verbose output");
}

/// Adds the `--version` flag for version-scoped commands.
pub fn version_opts(opts: &mut Options) {
    opts.optopt(
        "",
        "version",
        "Service version number, 'latest', or 'active'",
        "VERSION",
    );
}

/// Adds the `--autoclone` flag for mutating version-scoped commands.
pub fn autoclone_opt(opts: &mut Options) {
    opts.optflag(
        "",
        "autoclone",
        "Clone the target version into a new editable version if it is locked",
    );
}

/// Parses command flags. Stray positional arguments are a usage error.
pub fn parse(opts: &Options, args: &[String], usage: &str) -> Result<Matches, Error> {
    let matches = opts
        .parse(args)
        .map_err(|e| Error::Argument(e.to_string()))?;
    if let Some(stray) = matches.free.first() {
        return Err(Error::Usage(format!("unexpected argument '{}'\n{}", stray, usage)));
    }
    Ok(matches)
}

/// Extracts a required flag value, failing before any network call.
pub fn required_flag(matches: &Matches, flag: &'static str) -> Result<String, Error> {
    matches.opt_str(flag).ok_or(Error::MissingFlag(flag))
}

pub fn optional_u32(matches: &Matches, flag: &'static str) -> Result<Option<u32>, Error> {
    match matches.opt_str(flag) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u32>()
            .map(Some)
            .map_err(|e| Error::InvalidFlag {
                flag,
                message: e.to_string(),
            }),
    }
}

pub fn optional_u64(matches: &Matches, flag: &'static str) -> Result<Option<u64>, Error> {
    match matches.opt_str(flag) {
        None => Ok(None),
        Some(raw) => raw
            .parse::<u64>()
            .map(Some)
            .map_err(|e| Error::InvalidFlag {
                flag,
                message: e.to_string(),
            }),
    }
}

/// Verbose is a global flag but is also accepted after the verb.
pub fn verbose(globals: &Globals<'_>, matches: &Matches) -> bool {
    globals.verbose || matches.opt_present("verbose")
}

/// Resolves the service ID for this invocation (flag > environment >
/// manifest) and reports the source when verbose. `NoServiceId` is terminal.
pub fn resolve_service(globals: &mut Globals<'_>, matches: &Matches) -> Result<String, Error> {
    let flag = matches.opt_str("service-id");
    let (id, source) = manifest::resolve_service_id(
        flag.as_deref(),
        globals.service_id_env.as_deref(),
        &globals.manifest,
    );
    let id = id.ok_or(Error::NoServiceId)?;
    if verbose(globals, matches) {
        let _ = writeln!(globals.out, "Service ID (via {}): {}", source.describe(), id);
    }
    Ok(id)
}

/// Resolves `--version` to a concrete version number for read-only commands.
pub async fn resolve_version(
    globals: &Globals<'_>,
    matches: &Matches,
    service_id: &str,
) -> Result<u64, Error> {
    let selector: VersionSelector = required_flag(matches, "version")?.parse()?;
    let resolved = version::resolve(&globals.client, service_id, selector).await?;
    Ok(resolved.number)
}

/// Resolves `--version` to an editable version number for mutating commands,
/// cloning a locked target when `--autoclone` is set. After this point the
/// version number does not change for the rest of the invocation.
pub async fn resolve_editable_version(
    globals: &Globals<'_>,
    matches: &Matches,
    service_id: &str,
) -> Result<u64, Error> {
    let selector: VersionSelector = required_flag(matches, "version")?.parse()?;
    let autoclone = matches.opt_present("autoclone");
    let resolved =
        version::resolve_editable(&globals.client, service_id, selector, autoclone).await?;
    Ok(resolved.number)
}

/// Macro to generate command dispatcher boilerplate.
macro_rules! dispatch_command {
    ($command_name:expr, $usage:expr, $args:expr, $globals:expr, {
        $($subcommand:expr => $handler:path),* $(,)?
    }) => {{
        if $args.is_empty() {
            return Err($crate::errors::Error::Usage(format!(
                "{} command requires a subcommand\n{}",
                $command_name, $usage
            )));
        }
        match $args[0].as_str() {
            $(
                $subcommand => $handler(&$args[1..], $globals).await,
            )*
            other => Err($crate::errors::Error::Usage(format!(
                "unknown {} subcommand '{}'. Available subcommands: {}",
                $command_name,
                other,
                [$($subcommand),*].join(", ")
            ))),
        }
    }};
}

pub(crate) use dispatch_command;

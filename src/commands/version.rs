//! # Version Command Handler
//!
//! This module handles service version commands: listing a service's
//! versions and cloning one explicitly.

use std::io::Write;

use getopts::Options;

use crate::commands::Globals;
use crate::commands::shared::{self, dispatch_command};
use crate::errors::Error;
use crate::text;
use crate::version::{self, VersionSelector};

const VERSION_USAGE: &str = "Usage: merictl version <list|clone> [flags...]";

/// Handles all service version commands.
pub async fn handle_version_command(
    args: &[String],
    globals: &mut Globals<'_>,
) -> Result<(), Error> {
    dispatch_command!("version", VERSION_USAGE, args, globals, {
        "list" => handle_version_list,
        "clone" => handle_version_clone,
    })
}

/// Handles service version listing.
async fn handle_version_list(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    let matches = shared::parse(&opts, args, VERSION_USAGE)?;

    let service_id = shared::resolve_service(globals, &matches)?;
    let versions = version::list(&globals.client, &service_id).await?;

    if shared::verbose(globals, &matches) {
        let total = versions.len();
        for (i, v) in versions.iter().enumerate() {
            let _ = writeln!(globals.out, "Version {}/{}", i + 1, total);
            text::field(globals.out, "\t", "Number", &v.number);
            text::field(globals.out, "\t", "Active", &v.active);
            text::field(globals.out, "\t", "Locked", &v.locked);
            if !v.comment.is_empty() {
                text::field(globals.out, "\t", "Comment", &v.comment);
            }
            if let Some(created) = v.created_at {
                text::field(
                    globals.out,
                    "\t",
                    "Created (UTC)",
                    &created.format("%Y-%m-%d %H:%M:%S"),
                );
            }
        }
    } else {
        let mut table = text::Table::new(&["NUMBER", "ACTIVE", "LOCKED"]);
        for v in &versions {
            table.row(vec![
                v.number.to_string(),
                v.active.to_string(),
                v.locked.to_string(),
            ]);
        }
        table.write(globals.out);
    }
    Ok(())
}

/// Handles explicit version cloning.
async fn handle_version_clone(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    shared::service_opts(&mut opts);
    shared::version_opts(&mut opts);
    let matches = shared::parse(&opts, args, VERSION_USAGE)?;

    let selector: VersionSelector = shared::required_flag(&matches, "version")?.parse()?;
    let service_id = shared::resolve_service(globals, &matches)?;

    let source = version::resolve(&globals.client, &service_id, selector).await?;
    let cloned = version::clone(&globals.client, &service_id, source.number).await?;
    text::success(
        globals.out,
        &format!(
            "Cloned service version {} to version {} (service {})",
            source.number, cloned.number, service_id
        ),
    );
    Ok(())
}

//! # Command Handlers
//!
//! This module contains the command handlers for the merictl CLI. Each noun
//! is implemented in a dedicated submodule; `shared` holds the flag-parsing
//! and scope-resolution contract every handler follows.
//!
//! ## Structure
//!
//! - `logging` - Logging endpoint commands (currently Kafka)
//! - `kafka` - Kafka logging endpoint commands (create, list, describe, update, delete)
//! - `dictionary_item` - Edge dictionary item commands (create, list, describe, update, delete)
//! - `stats` - Statistics commands (regions)
//! - `version` - Service version commands (list, clone)
//! - `shared` - Shared flag parsing and service/version scope resolution
//! - `errors` - User-facing error extraction

pub mod dictionary_item;
pub mod errors;
pub mod kafka;
pub mod logging;
pub mod shared;
pub mod stats;
pub mod version;

use std::io::Write;

use crate::errors::Error;
use crate::http_utils::ApiClient;
use crate::manifest::Manifest;

pub use dictionary_item::handle_dictionaryitem_command;
pub use kafka::handle_kafka_command;
pub use logging::handle_logging_command;
pub use stats::handle_stats_command;
pub use version::handle_version_command;

pub const USAGE: &str = r#"Usage: merictl [options] <command> [args...]

Options:
  --endpoint <url>     Base URL of the Meridian API (default: https://api.meridian.dev)
  --token <token>      Meridian API token
  --verbose            Verbose output

Commands:
  logging kafka create --name N --topic T --brokers B [flags]   Create a Kafka logging endpoint
  logging kafka list                                            List Kafka logging endpoints
  logging kafka describe --name N                               Show one Kafka logging endpoint
  logging kafka update --name N [flags]                         Update a Kafka logging endpoint
  logging kafka delete --name N                                 Delete a Kafka logging endpoint
  dictionaryitem create --dictionary-id D --key K --value V     Create a dictionary item
  dictionaryitem list --dictionary-id D                         List items in a dictionary
  dictionaryitem describe --dictionary-id D --key K             Show one dictionary item
  dictionaryitem update --dictionary-id D --key K --value V     Update or insert a dictionary item
  dictionaryitem delete --dictionary-id D --key K               Delete a dictionary item
  stats regions                                                 List stats regions
  version list                                                  List service versions
  version clone --version N                                     Clone a service version

Version-scoped commands take --service-id, --version, and (for mutating
verbs) --autoclone. The service ID falls back to MERIDIAN_SERVICE_ID and
then to meridian.toml."#;

/// Shared configuration for one invocation: API client, output stream, and
/// the service-id fallback sources. Passed explicitly to every handler; no
/// process-wide mutable state.
pub struct Globals<'a> {
    pub client: ApiClient,
    pub out: &'a mut dyn Write,
    pub verbose: bool,
    pub service_id_env: Option<String>,
    pub manifest: Manifest,
}

/// Runs one command invocation: a single linear pass that dispatches to the
/// noun's handler and stops at the first error.
pub async fn run(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    if globals.verbose {
        let token_line = if globals.client.has_token() {
            "Meridian API token provided"
        } else {
            "Meridian API token not provided"
        };
        let _ = writeln!(globals.out, "{}", token_line);
        let _ = writeln!(globals.out, "Meridian API endpoint: {}", globals.client.endpoint());
    }

    match args.first().map(String::as_str) {
        None => Err(Error::Usage(format!("no command specified\n{}", USAGE))),
        Some("logging") => handle_logging_command(&args[1..], globals).await,
        Some("dictionaryitem") => handle_dictionaryitem_command(&args[1..], globals).await,
        Some("stats") => handle_stats_command(&args[1..], globals).await,
        Some("version") => handle_version_command(&args[1..], globals).await,
        Some(other) => Err(Error::Usage(format!(
            "unknown command '{}'. Available commands: logging, dictionaryitem, stats, version",
            other
        ))),
    }
}

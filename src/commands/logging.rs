//! # Logging Command Handler
//!
//! Dispatches logging endpoint commands to the per-backend handlers.

use crate::commands::Globals;
use crate::commands::kafka::handle_kafka_command;
use crate::commands::shared::dispatch_command;
use crate::errors::Error;

const LOGGING_USAGE: &str = "Usage: merictl logging <kafka> <verb> [flags...]";

/// Handles all logging-related commands.
pub async fn handle_logging_command(
    args: &[String],
    globals: &mut Globals<'_>,
) -> Result<(), Error> {
    dispatch_command!("logging", LOGGING_USAGE, args, globals, {
        "kafka" => handle_kafka_command,
    })
}

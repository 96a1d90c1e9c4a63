//! # Stats Command Handler
//!
//! This module handles statistics commands. Stats endpoints are not scoped
//! to a service, so no identity resolution happens here.

use std::io::Write;

use getopts::Options;

use crate::commands::Globals;
use crate::commands::shared::{self, dispatch_command};
use crate::errors::Error;
use crate::stats;

const STATS_USAGE: &str = "Usage: merictl stats <regions>";

/// Handles all stats-related commands.
pub async fn handle_stats_command(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    dispatch_command!("stats", STATS_USAGE, args, globals, {
        "regions" => handle_stats_regions,
    })
}

/// Lists the regions stats can be queried for, one per line.
async fn handle_stats_regions(args: &[String], globals: &mut Globals<'_>) -> Result<(), Error> {
    let mut opts = Options::new();
    opts.optflag("v", "verbose", "Verbose output");
    let _matches = shared::parse(&opts, args, STATS_USAGE)?;

    let response = stats::regions(&globals.client).await?;
    for region in &response.data {
        let _ = writeln!(globals.out, "{}", region);
    }
    Ok(())
}

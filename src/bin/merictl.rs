use std::path::Path;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use meridian::cli_utils;
use meridian::commands::{self, Globals, USAGE, errors::format_cli_error};
use meridian::http_utils::ApiClient;
use meridian::manifest::{Manifest, SERVICE_ID_ENV};

const DEFAULT_ENDPOINT: &str = "https://api.meridian.dev";
const TOKEN_ENV: &str = "MERIDIAN_API_TOKEN";
const ENDPOINT_ENV: &str = "MERIDIAN_API_ENDPOINT";

#[derive(CommandLine, Default, PartialEq, Eq)]
struct Options {
    #[arrrg(optional, "Base URL of the Meridian API")]
    endpoint: Option<String>,
    #[arrrg(optional, "Meridian API token")]
    token: Option<String>,
    #[arrrg(flag, "Verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let (options, free) =
        Options::from_command_line_relaxed("USAGE: merictl [options] <command> [args...]");

    if free.is_empty() {
        cli_utils::exit_with_usage_error("no command specified", USAGE);
    }

    let endpoint = options
        .endpoint
        .or_else(|| std::env::var(ENDPOINT_ENV).ok())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
    let token = options.token.or_else(|| std::env::var(TOKEN_ENV).ok());

    let manifest = match Manifest::load(Path::new(".")) {
        Ok(manifest) => manifest,
        Err(e) => cli_utils::exit_with_error(&e.to_string()),
    };

    let mut stdout = std::io::stdout();
    let mut globals = Globals {
        client: ApiClient::new(endpoint, token),
        out: &mut stdout,
        verbose: options.verbose,
        service_id_env: std::env::var(SERVICE_ID_ENV).ok(),
        manifest,
    };

    if let Err(e) = commands::run(&free, &mut globals).await {
        eprintln!("{}", format_cli_error(&e));
        std::process::exit(1);
    }
}

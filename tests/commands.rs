//! Cross-cutting command tests: dispatch, identity resolution sources,
//! verbose output, stats, and service version commands.

use httpmock::{Method, MockServer};
use serde_json::json;

use meridian::commands::{self, Globals};
use meridian::errors::Error;
use meridian::http_utils::ApiClient;
use meridian::manifest::Manifest;

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

struct Invocation {
    verbose: bool,
    service_id_env: Option<String>,
    manifest: Manifest,
}

impl Default for Invocation {
    fn default() -> Self {
        Self {
            verbose: false,
            service_id_env: None,
            manifest: Manifest::default(),
        }
    }
}

impl Invocation {
    async fn run(self, server: &MockServer, line: &str) -> (Result<(), Error>, String) {
        let mut out = Vec::new();
        let result = {
            let mut globals = Globals {
                client: ApiClient::new(server.base_url(), None),
                out: &mut out,
                verbose: self.verbose,
                service_id_env: self.service_id_env,
                manifest: self.manifest,
            };
            commands::run(&args(line), &mut globals).await
        };
        (result, String::from_utf8(out).unwrap())
    }
}

fn versions_fixture() -> serde_json::Value {
    json!([
        {"number": 1, "active": true, "locked": true, "created_at": "2024-03-01T12:00:00Z"},
        {"number": 2, "active": false, "locked": false},
    ])
}

#[tokio::test]
async fn unknown_command_is_a_usage_error() {
    let server = MockServer::start_async().await;

    let (result, _) = Invocation::default().run(&server, "bogus").await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
    assert!(err.to_string().contains("unknown command 'bogus'"));
}

#[tokio::test]
async fn unknown_subcommand_lists_the_alternatives() {
    let server = MockServer::start_async().await;

    let (result, _) = Invocation::default().run(&server, "logging kafka frobnicate").await;

    let err = result.unwrap_err().to_string();
    assert!(err.contains("unknown kafka subcommand 'frobnicate'"));
    assert!(err.contains("create, list, describe, get, update, delete"));
}

#[tokio::test]
async fn service_id_falls_back_to_the_environment() {
    let server = MockServer::start_async().await;
    let versions = server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/env-123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;

    let invocation = Invocation {
        service_id_env: Some("env-123".to_string()),
        ..Invocation::default()
    };
    let (result, _) = invocation.run(&server, "version list").await;

    assert!(result.is_ok());
    assert_eq!(versions.hits_async().await, 1);
}

#[tokio::test]
async fn service_id_falls_back_to_the_manifest_and_reports_the_source() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/man-123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;

    let invocation = Invocation {
        manifest: Manifest {
            name: Some("demo".to_string()),
            service_id: Some("man-123".to_string()),
        },
        ..Invocation::default()
    };
    let (result, out) = invocation.run(&server, "version list --verbose").await;

    assert!(result.is_ok());
    assert!(out.contains("Service ID (via meridian.toml): man-123\n"));
}

#[tokio::test]
async fn flag_beats_environment_for_service_id() {
    let server = MockServer::start_async().await;
    let flagged = server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/flag-123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;

    let invocation = Invocation {
        service_id_env: Some("env-123".to_string()),
        ..Invocation::default()
    };
    let (result, _) = invocation
        .run(&server, "version list --service-id flag-123")
        .await;

    assert!(result.is_ok());
    assert_eq!(flagged.hits_async().await, 1);
}

#[tokio::test]
async fn global_verbose_prints_the_api_preamble() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/stats/regions");
            then.status(200).json_body(json!({"data": ["foo"]}));
        })
        .await;

    let invocation = Invocation {
        verbose: true,
        ..Invocation::default()
    };
    let (result, out) = invocation.run(&server, "stats regions").await;

    assert!(result.is_ok());
    assert!(out.starts_with("Meridian API token not provided\nMeridian API endpoint: "));
}

#[tokio::test]
async fn stats_regions_prints_one_region_per_line() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/stats/regions");
            then.status(200).json_body(json!({"data": ["foo", "bar", "baz"]}));
        })
        .await;

    let (result, out) = Invocation::default().run(&server, "stats regions").await;

    assert!(result.is_ok());
    assert_eq!(out, "foo\nbar\nbaz\n");
}

#[tokio::test]
async fn stats_regions_remote_error_passes_message_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/stats/regions");
            then.status(502).body("fixture error");
        })
        .await;

    let (result, out) = Invocation::default().run(&server, "stats regions").await;

    assert_eq!(result.unwrap_err().to_string(), "fixture error");
    assert!(out.is_empty());
}

#[tokio::test]
async fn version_list_renders_a_table() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;

    let (result, out) = Invocation::default()
        .run(&server, "version list --service-id 123")
        .await;

    assert!(result.is_ok());
    assert_eq!(
        out,
        "NUMBER  ACTIVE  LOCKED\n1       true    true\n2       false   false\n"
    );
}

#[tokio::test]
async fn version_list_verbose_includes_timestamps() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;

    let (result, out) = Invocation::default()
        .run(&server, "version list --service-id 123 --verbose")
        .await;

    assert!(result.is_ok());
    assert!(out.contains("Version 1/2\n"));
    assert!(out.contains("\tCreated (UTC): 2024-03-01 12:00:00\n"));
}

#[tokio::test]
async fn version_clone_resolves_then_clones() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;
    let clone = server
        .mock_async(|when, then| {
            when.method(Method::PUT).path("/service/123/version/1/clone");
            then.status(200)
                .json_body(json!({"number": 3, "active": false, "locked": false}));
        })
        .await;

    let (result, out) = Invocation::default()
        .run(&server, "version clone --service-id 123 --version active")
        .await;

    assert!(result.is_ok());
    assert_eq!(out, "Cloned service version 1 to version 3 (service 123)\n");
    assert_eq!(clone.hits_async().await, 1);
}

#[tokio::test]
async fn version_clone_missing_version_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;

    let (result, _) = Invocation::default()
        .run(&server, "version clone --service-id 123 --version 9")
        .await;

    assert_eq!(
        result.unwrap_err().to_string(),
        "service version 9 was not found"
    );
}

#[tokio::test]
async fn invalid_version_flag_is_an_argument_error() {
    let server = MockServer::start_async().await;
    let versions = server
        .mock_async(|when, then| {
            when.method(Method::GET).path("/service/123/version");
            then.status(200).json_body(versions_fixture());
        })
        .await;

    let (result, _) = Invocation::default()
        .run(&server, "logging kafka list --service-id 123 --version stable")
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, Error::InvalidFlag { flag: "version", .. }));
    assert_eq!(versions.hits_async().await, 0);
}

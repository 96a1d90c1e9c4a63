//! Local project manifest and service identity resolution.
//!
//! A command operates on exactly one service. The service ID is resolved
//! once per invocation, in fixed precedence order: explicit `--service-id`
//! flag, then the `MERIDIAN_SERVICE_ID` environment variable, then the
//! `meridian.toml` manifest in the working directory.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::errors::Error;

/// Manifest file name looked up in the working directory.
pub const MANIFEST_FILE: &str = "meridian.toml";

/// Environment variable consulted when no `--service-id` flag is given.
pub const SERVICE_ID_ENV: &str = "MERIDIAN_SERVICE_ID";

/// Local project manifest. Read-only from the CLI's perspective.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub service_id: Option<String>,
}

impl Manifest {
    /// Loads the manifest from `dir`, returning the default (empty) manifest
    /// when no file exists. A present-but-unreadable manifest is an error.
    pub fn load(dir: &Path) -> Result<Manifest, Error> {
        let path = dir.join(MANIFEST_FILE);
        if !path.exists() {
            return Ok(Manifest::default());
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))?;
        toml::from_str(&content).map_err(|e| Error::Manifest(format!("{}: {}", path.display(), e)))
    }
}

/// Where a resolved service ID came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceIdSource {
    Flag,
    Environment,
    Manifest,
    Undefined,
}

impl ServiceIdSource {
    /// Human-readable name of the source, used in verbose output.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Flag => "--service-id",
            Self::Environment => SERVICE_ID_ENV,
            Self::Manifest => MANIFEST_FILE,
            Self::Undefined => "undefined",
        }
    }
}

/// Resolves the service ID for this invocation. Precedence is fixed:
/// flag > environment > manifest. Empty strings count as absent.
pub fn resolve_service_id(
    flag: Option<&str>,
    env: Option<&str>,
    manifest: &Manifest,
) -> (Option<String>, ServiceIdSource) {
    if let Some(id) = non_empty(flag) {
        return (Some(id), ServiceIdSource::Flag);
    }
    if let Some(id) = non_empty(env) {
        return (Some(id), ServiceIdSource::Environment);
    }
    if let Some(id) = non_empty(manifest.service_id.as_deref()) {
        return (Some(id), ServiceIdSource::Manifest);
    }
    (None, ServiceIdSource::Undefined)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest_with(service_id: Option<&str>) -> Manifest {
        Manifest {
            name: Some("demo".to_string()),
            service_id: service_id.map(String::from),
        }
    }

    #[test]
    fn flag_wins_over_environment_and_manifest() {
        let (id, source) = resolve_service_id(
            Some("flag-id"),
            Some("env-id"),
            &manifest_with(Some("manifest-id")),
        );
        assert_eq!(id.as_deref(), Some("flag-id"));
        assert_eq!(source, ServiceIdSource::Flag);
    }

    #[test]
    fn environment_wins_over_manifest() {
        let (id, source) =
            resolve_service_id(None, Some("env-id"), &manifest_with(Some("manifest-id")));
        assert_eq!(id.as_deref(), Some("env-id"));
        assert_eq!(source, ServiceIdSource::Environment);
    }

    #[test]
    fn manifest_is_the_last_resort() {
        let (id, source) = resolve_service_id(None, None, &manifest_with(Some("manifest-id")));
        assert_eq!(id.as_deref(), Some("manifest-id"));
        assert_eq!(source, ServiceIdSource::Manifest);
    }

    #[test]
    fn undefined_when_no_source_yields_a_value() {
        let (id, source) = resolve_service_id(None, None, &Manifest::default());
        assert_eq!(id, None);
        assert_eq!(source, ServiceIdSource::Undefined);
    }

    #[test]
    fn empty_strings_count_as_absent() {
        let (id, source) = resolve_service_id(Some(""), Some(""), &manifest_with(Some("mid")));
        assert_eq!(id.as_deref(), Some("mid"));
        assert_eq!(source, ServiceIdSource::Manifest);
    }

    #[test]
    fn load_missing_manifest_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = Manifest::load(dir.path()).unwrap();
        assert!(manifest.service_id.is_none());
    }

    #[test]
    fn load_reads_service_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "name = \"demo\"\nservice_id = \"123\"\n",
        )
        .unwrap();
        let manifest = Manifest::load(dir.path()).unwrap();
        assert_eq!(manifest.service_id.as_deref(), Some("123"));
        assert_eq!(manifest.name.as_deref(), Some("demo"));
    }

    #[test]
    fn load_rejects_malformed_manifest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "service_id = [not toml").unwrap();
        let err = Manifest::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Manifest(_)));
    }
}

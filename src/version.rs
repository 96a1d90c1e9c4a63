//! Service versions and the clone-before-edit rule.
//!
//! A service version is editable until it is activated or locked. Mutating
//! commands resolve their target version here, and this is the only place a
//! version number may change within an invocation: a locked target is either
//! cloned (when `--autoclone` is set) or the command fails.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::http_utils::ApiClient;

////////////////////////////////////////////// Version /////////////////////////////////////////////

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    pub number: u64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Version {
    /// Active and locked versions are immutable snapshots.
    pub fn is_editable(&self) -> bool {
        !self.active && !self.locked
    }
}

///////////////////////////////////////// VersionSelector //////////////////////////////////////////

/// The `--version` flag value: a concrete number, or a sentinel resolved
/// against the service's version list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelector {
    /// The highest version number on the service.
    Latest,
    /// The currently active version.
    Active,
    /// An explicit version number.
    Number(u64),
}

impl std::fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Active => write!(f, "active"),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

impl std::str::FromStr for VersionSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "active" => Ok(Self::Active),
            _ => match s.parse::<u64>() {
                Ok(n) if n > 0 => Ok(Self::Number(n)),
                _ => Err(Error::InvalidFlag {
                    flag: "version",
                    message: format!("'{}' is not a version number, 'latest', or 'active'", s),
                }),
            },
        }
    }
}

/////////////////////////////////////////// Operations /////////////////////////////////////////////

fn collection_path(service_id: &str) -> String {
    format!("service/{}/version", service_id)
}

fn clone_path(service_id: &str, number: u64) -> String {
    format!("service/{}/version/{}/clone", service_id, number)
}

/// Lists all versions of a service.
pub async fn list(client: &ApiClient, service_id: &str) -> Result<Vec<Version>, Error> {
    client.get(&collection_path(service_id)).await
}

/// Clones a version into a new editable version.
pub async fn clone(client: &ApiClient, service_id: &str, number: u64) -> Result<Version, Error> {
    client.put_empty(&clone_path(service_id, number)).await
}

/// Picks the version a selector refers to from a service's version list.
pub fn pick(versions: &[Version], selector: VersionSelector) -> Result<&Version, Error> {
    let found = match selector {
        VersionSelector::Number(n) => versions.iter().find(|v| v.number == n),
        VersionSelector::Latest => versions.iter().max_by_key(|v| v.number),
        VersionSelector::Active => versions.iter().find(|v| v.active),
    };
    found.ok_or(Error::VersionNotFound(selector))
}

/// Resolves a selector to a concrete version via one list call. Read-only
/// commands use this directly; locked versions are fine to read from.
pub async fn resolve(
    client: &ApiClient,
    service_id: &str,
    selector: VersionSelector,
) -> Result<Version, Error> {
    let versions = list(client, service_id).await?;
    Ok(pick(&versions, selector)?.clone())
}

/// Resolves a selector to an editable version for a mutating command.
///
/// A locked target is cloned when `autoclone` is set (exactly one clone call,
/// and the clone's number substitutes for the rest of the invocation);
/// otherwise the command fails with `VersionLocked`.
pub async fn resolve_editable(
    client: &ApiClient,
    service_id: &str,
    selector: VersionSelector,
    autoclone: bool,
) -> Result<Version, Error> {
    let resolved = resolve(client, service_id, selector).await?;
    if resolved.is_editable() {
        return Ok(resolved);
    }
    if autoclone {
        return clone(client, service_id, resolved.number).await;
    }
    Err(Error::VersionLocked(resolved.number))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(number: u64, active: bool, locked: bool) -> Version {
        Version {
            number,
            active,
            locked,
            comment: String::new(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn selector_parses_number_and_sentinels() {
        assert_eq!("latest".parse::<VersionSelector>().unwrap(), VersionSelector::Latest);
        assert_eq!("active".parse::<VersionSelector>().unwrap(), VersionSelector::Active);
        assert_eq!("3".parse::<VersionSelector>().unwrap(), VersionSelector::Number(3));
    }

    #[test]
    fn selector_rejects_garbage_and_zero() {
        assert!(matches!(
            "stable".parse::<VersionSelector>(),
            Err(Error::InvalidFlag { flag: "version", .. })
        ));
        assert!("0".parse::<VersionSelector>().is_err());
        assert!("-1".parse::<VersionSelector>().is_err());
    }

    #[test]
    fn pick_finds_explicit_number() {
        let versions = vec![version(1, true, true), version(2, false, false)];
        assert_eq!(pick(&versions, VersionSelector::Number(2)).unwrap().number, 2);
    }

    #[test]
    fn pick_latest_is_highest_number() {
        let versions = vec![version(3, false, false), version(1, true, true), version(2, false, true)];
        assert_eq!(pick(&versions, VersionSelector::Latest).unwrap().number, 3);
    }

    #[test]
    fn pick_active_finds_the_active_version() {
        let versions = vec![version(1, false, true), version(2, true, true), version(3, false, false)];
        assert_eq!(pick(&versions, VersionSelector::Active).unwrap().number, 2);
    }

    #[test]
    fn pick_missing_number_is_not_found() {
        let versions = vec![version(1, true, true)];
        assert_eq!(
            pick(&versions, VersionSelector::Number(9)).unwrap_err(),
            Error::VersionNotFound(VersionSelector::Number(9))
        );
    }

    #[test]
    fn pick_latest_on_empty_list_is_not_found() {
        assert_eq!(
            pick(&[], VersionSelector::Latest).unwrap_err(),
            Error::VersionNotFound(VersionSelector::Latest)
        );
    }

    #[test]
    fn editability_follows_active_and_locked_flags() {
        assert!(version(1, false, false).is_editable());
        assert!(!version(1, true, false).is_editable());
        assert!(!version(1, false, true).is_editable());
    }
}

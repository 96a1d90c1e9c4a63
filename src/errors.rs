//! Error types for merictl command invocations.

use crate::version::VersionSelector;

/// Errors that terminate a command invocation. None of these are retried;
/// each invocation is a single linear pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required flag was not provided. Raised before any API call is made.
    MissingFlag(&'static str),
    /// A flag value could not be parsed. Raised before any API call is made.
    InvalidFlag {
        flag: &'static str,
        message: String,
    },
    /// The flag parser rejected the command line.
    Argument(String),
    /// Unknown command, unknown subcommand, or stray positional arguments.
    Usage(String),
    /// No service ID could be resolved from flag, environment, or manifest.
    NoServiceId,
    /// The target service version is locked and `--autoclone` was not given.
    VersionLocked(u64),
    /// The requested service version does not exist.
    VersionNotFound(VersionSelector),
    /// The manifest file exists but could not be read or parsed.
    Manifest(String),
    /// The remote API failed the call. The message is passed through verbatim.
    Remote(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFlag(flag) => {
                write!(
                    f,
                    "error parsing arguments: required flag --{} not provided",
                    flag
                )
            }
            Self::InvalidFlag { flag, message } => {
                write!(
                    f,
                    "error parsing arguments: invalid value for --{}: {}",
                    flag, message
                )
            }
            Self::Argument(msg) => write!(f, "error parsing arguments: {}", msg),
            Self::Usage(msg) => write!(f, "{}", msg),
            Self::NoServiceId => write!(
                f,
                "no service ID found: provide one via the --service-id flag, the {} environment variable, or the {} manifest",
                crate::manifest::SERVICE_ID_ENV,
                crate::manifest::MANIFEST_FILE,
            ),
            Self::VersionLocked(number) => {
                write!(f, "service version {} is locked", number)
            }
            Self::VersionNotFound(selector) => {
                write!(f, "service version {} was not found", selector)
            }
            Self::Manifest(msg) => write!(f, "error reading manifest: {}", msg),
            Self::Remote(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_flag_names_the_flag() {
        let err = Error::MissingFlag("topic");
        assert_eq!(
            err.to_string(),
            "error parsing arguments: required flag --topic not provided"
        );
    }

    #[test]
    fn invalid_flag_names_flag_and_reason() {
        let err = Error::InvalidFlag {
            flag: "max-batch-size",
            message: "invalid digit found in string".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "error parsing arguments: invalid value for --max-batch-size: invalid digit found in string"
        );
    }

    #[test]
    fn remote_error_is_verbatim() {
        let err = Error::Remote("fixture error".to_string());
        assert_eq!(err.to_string(), "fixture error");
    }

    #[test]
    fn version_locked_names_the_version() {
        let err = Error::VersionLocked(1);
        assert_eq!(err.to_string(), "service version 1 is locked");
    }

    #[test]
    fn version_not_found_renders_selector() {
        let err = Error::VersionNotFound(VersionSelector::Number(9));
        assert_eq!(err.to_string(), "service version 9 was not found");
        let err = Error::VersionNotFound(VersionSelector::Latest);
        assert_eq!(err.to_string(), "service version latest was not found");
    }

    #[test]
    fn no_service_id_mentions_all_sources() {
        let msg = Error::NoServiceId.to_string();
        assert!(msg.contains("--service-id"));
        assert!(msg.contains("MERIDIAN_SERVICE_ID"));
        assert!(msg.contains("meridian.toml"));
    }
}

//! # Command Error Handling
//!
//! User-facing error extraction for merictl commands, using the handled
//! crate for consistent error property extraction.

use handled::Handle;

use crate::errors::Error;

/// User-friendly error information extracted from a command error.
#[derive(Debug, Clone)]
pub struct UserError {
    /// The main error message to display to the user
    pub message: String,
    /// Optional usage hint to help the user correct the error
    pub usage_hint: Option<String>,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Handle<UserError> for UserError {
    fn handle(&self) -> Option<UserError> {
        Some(self.clone())
    }
}

impl Handle<UserError> for Error {
    fn handle(&self) -> Option<UserError> {
        let usage_hint = match self {
            Error::NoServiceId => Some(
                "Pass --service-id, set MERIDIAN_SERVICE_ID, or add service_id to meridian.toml"
                    .to_string(),
            ),
            Error::VersionLocked(_) => Some(
                "Pass --autoclone to copy the locked version into a new editable version"
                    .to_string(),
            ),
            Error::VersionNotFound(_) => {
                Some("Run 'merictl version list' to see the service's versions".to_string())
            }
            Error::MissingFlag(_) | Error::InvalidFlag { .. } | Error::Argument(_) => None,
            Error::Usage(_) | Error::Manifest(_) | Error::Remote(_) => None,
        };

        Some(UserError {
            message: self.to_string(),
            usage_hint,
        })
    }
}

/// Formats an error for CLI output, attaching the usage hint when one exists.
pub fn format_cli_error<E>(error: &E) -> String
where
    E: Handle<UserError> + std::fmt::Display,
{
    if let Some(user_error) = error.handle() {
        let mut output = format!("Error: {}", user_error.message);
        if let Some(hint) = user_error.usage_hint {
            output.push_str(&format!("\nHint: {}", hint));
        }
        output
    } else {
        format!("Error: {}", error)
    }
}

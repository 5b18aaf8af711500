//! Error types for collaborator communication.

use thiserror::Error;

/// Errors produced while talking to the identity store, the resource
/// inventory, or the message store.
///
/// Everything except `NotFound` and `Conflict` is surfaced to callers as a
/// generic communication failure; the full detail stays in the server-side
/// logs.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Network-level failure (connect, timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The collaborator rejected our credentials.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Resource does not exist on the collaborator.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The collaborator reported a conflicting state (e.g. duplicate name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The collaborator answered with an unexpected status code.
    #[error("Collaborator error (HTTP {status}): {detail}")]
    Protocol { status: u16, detail: String },

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Client-side configuration problem (bad base URL, bad timeout).
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl DirectoryError {
    /// Whether this error means the resource does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// A caller-safe message that never leaks internal detail.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "The requested resource was not found.",
            Self::Conflict(_) => "The request conflicts with the current state.",
            _ => "A backing service could not be reached.",
        }
    }
}

/// Result alias for collaborator operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_detection() {
        let error = DirectoryError::NotFound("account 42".to_string());
        assert!(error.is_not_found());

        let error = DirectoryError::Auth("bad token".to_string());
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_public_message_hides_detail() {
        let error = DirectoryError::Protocol {
            status: 500,
            detail: "stack trace with secrets".to_string(),
        };
        assert!(!error.public_message().contains("secrets"));
    }

    #[test]
    fn test_display_includes_status() {
        let error = DirectoryError::Protocol {
            status: 503,
            detail: "maintenance".to_string(),
        };
        assert!(error.to_string().contains("503"));
        assert!(error.to_string().contains("maintenance"));
    }
}

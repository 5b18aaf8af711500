//! Error types for the quota gate.

use custos_directory::DirectoryError;
use thiserror::Error;

/// Errors from gated account operations.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// The operation would push the tenant's enabled-account count past its
    /// configured ceiling. Rejected, never retried automatically; the caller
    /// may retry after freeing capacity.
    #[error("Tenant quota of {limit} enabled accounts reached ({current} currently enabled)")]
    Exceeded {
        /// The configured ceiling.
        limit: i64,
        /// The enabled count at check time.
        current: i64,
    },

    /// The identity store could not be reached or errored; the lock was
    /// released without any mutation.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl QuotaError {
    /// Caller-facing message. States the numeric ceiling for quota
    /// rejections and stays generic for communication failures.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Exceeded { limit, .. } => {
                format!("The maximum number of {limit} enabled accounts has been reached.")
            }
            Self::Directory(e) => e.public_message().to_string(),
        }
    }
}

/// Result alias for gated operations.
pub type QuotaResult<T> = Result<T, QuotaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exceeded_message_cites_the_ceiling() {
        let error = QuotaError::Exceeded {
            limit: 3,
            current: 3,
        };
        assert!(error.public_message().contains('3'));
        assert!(error.to_string().contains("quota of 3"));
    }

    #[test]
    fn test_directory_error_stays_generic() {
        let error = QuotaError::Directory(DirectoryError::Protocol {
            status: 500,
            detail: "internal stack trace".to_string(),
        });
        assert!(!error.public_message().contains("stack trace"));
    }
}

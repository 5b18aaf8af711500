//! Error types for license verification and enforcement.

use custos_directory::DirectoryError;
use thiserror::Error;

/// Errors from parsing, verifying, and enforcing a license.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// The uploaded document is not a well-formed signed envelope, or its
    /// payload does not decode to a license.
    #[error("Malformed license document: {0}")]
    Malformed(String),

    /// The envelope carries zero signatures.
    #[error("License document carries no signatures")]
    SignatureMissing,

    /// No signature verified against the pinned certificate's public key.
    #[error("License signature does not verify against the trusted certificate")]
    SignatureInvalid,

    /// Parsing and verification succeeded but the license has lapsed.
    ///
    /// Distinct from the invalid cases so callers can tell "valid but
    /// expired" from "not a license".
    #[error("License expired on {valid_until}")]
    Expired {
        valid_until: chrono::DateTime<chrono::Utc>,
    },

    /// The pinned verification certificate could not be loaded.
    #[error("Trusted certificate is unusable: {0}")]
    BadCertificate(String),

    /// A collaborator call failed during enforcement.
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

impl LicenseError {
    /// The stable, caller-facing message for upload rejections.
    #[must_use]
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "Request body does not represent a valid license.",
            Self::SignatureMissing => "Signature missing.",
            Self::SignatureInvalid => "Invalid signature.",
            Self::Expired { .. } => "License expired.",
            Self::BadCertificate(_) | Self::Directory(_) => "A backing service failed.",
        }
    }

    /// Whether the error permanently rejects the uploaded document (4xx)
    /// rather than indicating an infrastructure failure (5xx).
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Malformed(_) | Self::SignatureMissing | Self::SignatureInvalid | Self::Expired { .. }
        )
    }
}

/// Result alias for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_messages_are_stable() {
        assert_eq!(
            LicenseError::Malformed("bad json".to_string()).public_message(),
            "Request body does not represent a valid license."
        );
        assert_eq!(
            LicenseError::SignatureMissing.public_message(),
            "Signature missing."
        );
        assert_eq!(
            LicenseError::SignatureInvalid.public_message(),
            "Invalid signature."
        );
        assert_eq!(
            LicenseError::Expired {
                valid_until: chrono::Utc::now()
            }
            .public_message(),
            "License expired."
        );
    }

    #[test]
    fn test_rejections_vs_infrastructure() {
        assert!(LicenseError::SignatureInvalid.is_rejection());
        assert!(LicenseError::Expired {
            valid_until: chrono::Utc::now()
        }
        .is_rejection());
        assert!(!LicenseError::BadCertificate("garbage".to_string()).is_rejection());
    }

    #[test]
    fn test_public_message_hides_detail() {
        let error = LicenseError::Malformed("expected value at line 1".to_string());
        assert!(!error.public_message().contains("line 1"));
    }
}

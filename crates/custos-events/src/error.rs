//! Error types for event decoding and dispatch.

use thiserror::Error;

/// Errors from decoding or applying tenant lifecycle notifications.
#[derive(Debug, Error)]
pub enum EventError {
    /// The notification carries an event type this service does not know.
    /// Reported, never silently dropped.
    #[error("Unknown event type: {event_type}")]
    UnknownType { event_type: String },

    /// The notification has no `type` field at all.
    #[error("Notification carries no event type")]
    MissingType,

    /// The payload does not decode as the claimed event type.
    #[error("Malformed event payload: {0}")]
    Malformed(String),

    /// Applying the event against the identity store failed.
    #[error(transparent)]
    Apply(#[from] custos_directory::DirectoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_names_the_tag() {
        let error = EventError::UnknownType {
            event_type: "tenant.exploded".to_string(),
        };
        assert!(error.to_string().contains("tenant.exploded"));
    }
}

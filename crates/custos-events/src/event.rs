//! Tenant lifecycle notifications as a closed tagged enum.
//!
//! Inbound notifications arrive as JSON with a `type` discriminator. The
//! set of types is closed: decoding checks the discriminator against the
//! known list first, so an unknown tag is reported as
//! [`EventError::UnknownType`] instead of a generic parse failure. The
//! queue transport that delivers the payload is outside this crate.

use custos_core::TenantId;
use serde::{Deserialize, Serialize};

use crate::error::EventError;

/// Discriminator values, in the order of the enum variants.
const KNOWN_TYPES: &[&str] = &[
    "tenant.created",
    "tenant.activated",
    "tenant.deactivated",
    "tenant.deleted",
    "tenant.modified",
];

/// A tenant lifecycle notification.
///
/// Each variant carries only the fields that operation needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TenantLifecycleEvent {
    /// A new tenant was provisioned upstream.
    #[serde(rename = "tenant.created")]
    Created {
        tenant_id: TenantId,
        name: String,
        /// Optional enabled-account ceiling for the new tenant.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_enabled_users: Option<i64>,
    },

    /// The tenant was switched active.
    #[serde(rename = "tenant.activated")]
    Activated { tenant_id: TenantId },

    /// The tenant was switched inactive.
    #[serde(rename = "tenant.deactivated")]
    Deactivated { tenant_id: TenantId },

    /// The tenant was removed upstream; its accounts must go too.
    #[serde(rename = "tenant.deleted")]
    Deleted { tenant_id: TenantId },

    /// Tenant attributes changed (name and/or ceiling).
    #[serde(rename = "tenant.modified")]
    Modified {
        tenant_id: TenantId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_enabled_users: Option<i64>,
    },
}

impl TenantLifecycleEvent {
    /// Decode a notification payload.
    ///
    /// The discriminator is validated before the body so that an unknown
    /// event type is distinguishable from a malformed body.
    pub fn decode(payload: &[u8]) -> Result<Self, EventError> {
        let value: serde_json::Value =
            serde_json::from_slice(payload).map_err(|e| EventError::Malformed(e.to_string()))?;

        let event_type = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or(EventError::MissingType)?;

        if !KNOWN_TYPES.contains(&event_type) {
            return Err(EventError::UnknownType {
                event_type: event_type.to_string(),
            });
        }

        serde_json::from_value(value).map_err(|e| EventError::Malformed(e.to_string()))
    }

    /// The tenant this notification concerns.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        match self {
            Self::Created { tenant_id, .. }
            | Self::Activated { tenant_id }
            | Self::Deactivated { tenant_id }
            | Self::Deleted { tenant_id }
            | Self::Modified { tenant_id, .. } => *tenant_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_created() {
        let tenant_id = TenantId::new();
        let payload = format!(
            r#"{{ "type": "tenant.created", "tenant_id": "{tenant_id}", "name": "Acme", "max_enabled_users": 25 }}"#
        );

        let event = TenantLifecycleEvent::decode(payload.as_bytes()).unwrap();
        assert_eq!(
            event,
            TenantLifecycleEvent::Created {
                tenant_id,
                name: "Acme".to_string(),
                max_enabled_users: Some(25),
            }
        );
    }

    #[test]
    fn test_decode_activation_pair() {
        let tenant_id = TenantId::new();
        for (tag, expected) in [
            (
                "tenant.activated",
                TenantLifecycleEvent::Activated { tenant_id },
            ),
            (
                "tenant.deactivated",
                TenantLifecycleEvent::Deactivated { tenant_id },
            ),
        ] {
            let payload = format!(r#"{{ "type": "{tag}", "tenant_id": "{tenant_id}" }}"#);
            let event = TenantLifecycleEvent::decode(payload.as_bytes()).unwrap();
            assert_eq!(event, expected);
        }
    }

    #[test]
    fn test_decode_modified_with_partial_fields() {
        let tenant_id = TenantId::new();
        let payload =
            format!(r#"{{ "type": "tenant.modified", "tenant_id": "{tenant_id}", "name": "New Name" }}"#);

        let event = TenantLifecycleEvent::decode(payload.as_bytes()).unwrap();
        match event {
            TenantLifecycleEvent::Modified {
                name,
                max_enabled_users,
                ..
            } => {
                assert_eq!(name.as_deref(), Some("New Name"));
                assert!(max_enabled_users.is_none());
            }
            other => panic!("expected Modified, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_type_is_reported_not_dropped() {
        let payload = br#"{ "type": "tenant.exploded", "tenant_id": "x" }"#;
        let err = TenantLifecycleEvent::decode(payload).unwrap_err();
        match err {
            EventError::UnknownType { event_type } => {
                assert_eq!(event_type, "tenant.exploded");
            }
            other => panic!("expected UnknownType, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_type_field() {
        let payload = br#"{ "tenant_id": "550e8400-e29b-41d4-a716-446655440000" }"#;
        let err = TenantLifecycleEvent::decode(payload).unwrap_err();
        assert!(matches!(err, EventError::MissingType));
    }

    #[test]
    fn test_known_type_with_bad_body_is_malformed() {
        let payload = br#"{ "type": "tenant.created", "tenant_id": "not-a-uuid" }"#;
        let err = TenantLifecycleEvent::decode(payload).unwrap_err();
        assert!(matches!(err, EventError::Malformed(_)));
    }

    #[test]
    fn test_round_trip() {
        let event = TenantLifecycleEvent::Deleted {
            tenant_id: TenantId::new(),
        };
        let json = serde_json::to_vec(&event).unwrap();
        let restored = TenantLifecycleEvent::decode(&json).unwrap();
        assert_eq!(restored, event);
    }
}

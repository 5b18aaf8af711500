//! The license value and its claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A fully parsed and verified license.
///
/// Immutable once constructed; built fresh on every verification call.
/// Parsing either yields a fully populated value or fails, so a `License`
/// in hand always carries every claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    /// The customer this license was issued to.
    pub customer_id: String,
    /// Ceiling on tenant groups.
    pub total_clients: i64,
    /// Ceiling on enabled accounts across all tenants.
    pub total_users: i64,
    /// Ceiling on managed resource units.
    pub total_units: i64,
    /// Point in time after which the license has lapsed.
    pub valid_until: DateTime<Utc>,
}

impl License {
    /// Whether the license has lapsed at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.valid_until < now
    }

    /// Whole days remaining until expiry at `now`. Negative once lapsed.
    #[must_use]
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.valid_until - now).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn license_valid_until(valid_until: DateTime<Utc>) -> License {
        License {
            customer_id: "acme".to_string(),
            total_clients: 10,
            total_users: 100,
            total_units: 1000,
            valid_until,
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        assert!(license_valid_until(now - Duration::seconds(1)).is_expired(now));
        assert!(!license_valid_until(now + Duration::seconds(1)).is_expired(now));
    }

    #[test]
    fn test_days_remaining() {
        let now = Utc::now();
        let license = license_valid_until(now + Duration::days(2) + Duration::hours(3));
        assert_eq!(license.days_remaining(now), 2);

        let lapsed = license_valid_until(now - Duration::days(3));
        assert!(lapsed.days_remaining(now) < 0);
    }

    #[test]
    fn test_unknown_claim_fields_are_ignored() {
        let json = r#"{
            "customer_id": "acme",
            "total_clients": 5,
            "total_users": 50,
            "total_units": 500,
            "valid_until": "2027-01-01T00:00:00Z",
            "future_claim": true
        }"#;
        let license: License = serde_json::from_str(json).unwrap();
        assert_eq!(license.customer_id, "acme");
    }

    #[test]
    fn test_missing_required_claim_fails() {
        let json = r#"{
            "customer_id": "acme",
            "total_clients": 5,
            "total_units": 500,
            "valid_until": "2027-01-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<License>(json).is_err());
    }
}

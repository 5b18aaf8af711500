//! The license enforcement decision table.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use custos_directory::{OperatorMessage, UsageSnapshot};

use crate::license::License;
use crate::messages;

/// Days before expiry at which the warning notice appears.
pub const EXPIRY_WARNING_DAYS: i64 = 7;

/// The outcome of one enforcement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcementDecision {
    /// Whether account-mutating operations may proceed.
    pub write_access: bool,
    /// The complete set of operator notices for this state.
    pub messages: BTreeSet<OperatorMessage>,
}

/// Combine a license (or its absence) with live usage into a write-access
/// decision and the operator-message set.
///
/// Pure over its inputs; the caller pushes the flag and hands the messages
/// to the reconciler. Ceiling and expiry conditions are evaluated
/// independently, so every applicable condition contributes its message.
#[must_use]
pub fn evaluate(
    license: Option<&License>,
    usage: &UsageSnapshot,
    now: DateTime<Utc>,
) -> EnforcementDecision {
    let mut messages = BTreeSet::new();

    let Some(license) = license else {
        messages.insert(messages::no_license());
        return EnforcementDecision {
            write_access: false,
            messages,
        };
    };

    let mut write_access = true;

    if usage.tenant_count > license.total_clients {
        write_access = false;
        messages.insert(messages::over_client_limit(
            license.total_clients,
            usage.tenant_count,
        ));
    }
    if usage.enabled_user_count > license.total_users {
        write_access = false;
        messages.insert(messages::over_user_limit(
            license.total_users,
            usage.enabled_user_count,
        ));
    }
    if usage.unit_count > license.total_units {
        write_access = false;
        messages.insert(messages::over_unit_limit(
            license.total_units,
            usage.unit_count,
        ));
    }

    if license.is_expired(now) {
        write_access = false;
        messages.insert(messages::expired());
    } else {
        let days = license.days_remaining(now);
        if days < EXPIRY_WARNING_DAYS {
            messages.insert(messages::expiring_soon(days));
        }
    }

    EnforcementDecision {
        write_access,
        messages,
    }
}

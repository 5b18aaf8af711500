//! Wire models for the identity store's admin API.

use chrono::{DateTime, Utc};
use custos_core::{AccountId, TenantId};
use serde::{Deserialize, Serialize};

/// A user account as stored by the identity provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// The account's ID in the identity store.
    pub id: AccountId,
    /// The owning tenant.
    pub tenant_id: TenantId,
    /// Login name, unique within the tenant.
    pub username: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the account is usable. Only enabled accounts count against
    /// the licensed user ceiling.
    pub enabled: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAccount {
    /// Login name, unique within the tenant.
    pub username: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Whether the account starts enabled.
    pub enabled: bool,
}

/// A tenant's group record in the identity store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenantRecord {
    /// The tenant's ID.
    pub id: TenantId,
    /// Tenant display name.
    pub name: String,
    /// Whether the tenant is active.
    pub active: bool,
    /// Per-tenant ceiling on enabled accounts, stored as a group attribute.
    /// `None` means no ceiling is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_enabled_users: Option<i64>,
}

/// The quota attributes of a single tenant.
///
/// Read fresh from the identity store on every check; never cached. The
/// current enabled count is derived, not stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TenantQuota {
    /// Maximum number of enabled accounts, `None` when unlimited.
    pub max_enabled_users: Option<i64>,
}

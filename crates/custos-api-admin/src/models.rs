//! Request and response DTOs for the admin API.

use chrono::{DateTime, Utc};
use custos_core::{AccountId, TenantId};
use custos_directory::{AccountRecord, DeprovisionReport, UsageSnapshot};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

fn default_enabled() -> bool {
    true
}

/// Request body for creating an account.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    /// Login name, unique within the tenant.
    #[validate(length(min = 1, max = 64))]
    pub username: String,

    /// Optional display name.
    #[validate(length(max = 255))]
    pub display_name: Option<String>,

    /// Whether the account starts enabled. Defaults to true.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

/// An account as returned by the API.
#[derive(Debug, Serialize, ToSchema)]
pub struct AccountResponse {
    #[schema(value_type = uuid::Uuid)]
    pub id: AccountId,
    #[schema(value_type = uuid::Uuid)]
    pub tenant_id: TenantId,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AccountRecord> for AccountResponse {
    fn from(record: AccountRecord) -> Self {
        Self {
            id: record.id,
            tenant_id: record.tenant_id,
            username: record.username,
            display_name: record.display_name,
            enabled: record.enabled,
            created_at: record.created_at,
        }
    }
}

/// Per-tenant usage view.
#[derive(Debug, Serialize, ToSchema)]
pub struct TenantUsageResponse {
    #[schema(value_type = uuid::Uuid)]
    pub tenant_id: TenantId,
    /// Currently enabled accounts.
    pub enabled_users: i64,
    /// Configured ceiling, absent when unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_enabled_users: Option<i64>,
}

/// System-wide license and usage status.
#[derive(Debug, Serialize, ToSchema)]
pub struct LicenseStatusResponse {
    /// Whether account-mutating operations are currently permitted.
    pub write_access: bool,
    /// The verified license claims, absent when no license is installed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<LicenseInfo>,
    /// Live usage counts.
    pub usage: UsageInfo,
}

/// License claims exposed to operators.
#[derive(Debug, Serialize, ToSchema)]
pub struct LicenseInfo {
    pub customer_id: String,
    pub total_clients: i64,
    pub total_users: i64,
    pub total_units: i64,
    pub valid_until: DateTime<Utc>,
}

/// Usage counts exposed to operators.
#[derive(Debug, Serialize, ToSchema)]
pub struct UsageInfo {
    pub tenant_count: i64,
    pub enabled_user_count: i64,
    pub unit_count: i64,
}

impl From<UsageSnapshot> for UsageInfo {
    fn from(snapshot: UsageSnapshot) -> Self {
        Self {
            tenant_count: snapshot.tenant_count,
            enabled_user_count: snapshot.enabled_user_count,
            unit_count: snapshot.unit_count,
        }
    }
}

/// Result of a tenant deprovisioning run.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeprovisionResponse {
    #[schema(value_type = uuid::Uuid)]
    pub tenant_id: TenantId,
    pub accounts_deleted: usize,
    pub tenant_deleted: bool,
    /// Per-account failures; empty on a clean run.
    pub failures: Vec<String>,
}

impl DeprovisionResponse {
    /// Assemble the response from a report.
    #[must_use]
    pub fn from_report(tenant_id: TenantId, report: DeprovisionReport) -> Self {
        Self {
            tenant_id,
            accounts_deleted: report.accounts_deleted,
            tenant_deleted: report.tenant_deleted,
            failures: report.failures,
        }
    }
}

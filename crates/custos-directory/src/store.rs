//! The identity-store collaborator seam.

use async_trait::async_trait;
use custos_core::{AccountId, TenantId};

use crate::error::DirectoryResult;
use crate::types::{AccountRecord, NewAccount, TenantQuota, TenantRecord};

/// Operations custos needs from the identity provider's admin API.
///
/// Every call is a synchronous round-trip from the caller's perspective and
/// may fail with a [`crate::DirectoryError`]. Implementations must not cache:
/// the quota gate relies on `count_enabled_accounts` returning a fresh value
/// on every call.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Number of tenant groups in the realm.
    async fn count_tenants(&self) -> DirectoryResult<i64>;

    /// Number of enabled accounts, across the realm or scoped to one tenant.
    async fn count_enabled_accounts(&self, tenant_id: Option<TenantId>) -> DirectoryResult<i64>;

    /// Fetch a tenant's group record.
    async fn get_tenant(&self, tenant_id: TenantId) -> DirectoryResult<TenantRecord>;

    /// Fetch a tenant's quota attributes.
    async fn get_tenant_quota(&self, tenant_id: TenantId) -> DirectoryResult<TenantQuota>;

    /// Create a tenant group.
    async fn create_tenant(&self, record: &TenantRecord) -> DirectoryResult<TenantRecord>;

    /// Mark a tenant group active or inactive.
    async fn set_tenant_active(&self, tenant_id: TenantId, active: bool) -> DirectoryResult<()>;

    /// Delete a tenant group. Accounts under it must be removed separately.
    async fn delete_tenant(&self, tenant_id: TenantId) -> DirectoryResult<()>;

    /// List the accounts belonging to a tenant.
    async fn list_accounts(&self, tenant_id: TenantId) -> DirectoryResult<Vec<AccountRecord>>;

    /// Fetch a single account.
    async fn get_account(&self, account_id: AccountId) -> DirectoryResult<AccountRecord>;

    /// Create an account under a tenant.
    async fn create_account(
        &self,
        tenant_id: TenantId,
        account: &NewAccount,
    ) -> DirectoryResult<AccountRecord>;

    /// Flip an account's enabled flag.
    async fn set_account_enabled(
        &self,
        account_id: AccountId,
        enabled: bool,
    ) -> DirectoryResult<()>;

    /// Delete an account.
    async fn delete_account(&self, account_id: AccountId) -> DirectoryResult<()>;

    /// Read a realm-wide attribute, `None` when unset.
    ///
    /// The raw license blob is the only attribute custos itself writes.
    async fn get_realm_attribute(&self, name: &str) -> DirectoryResult<Option<String>>;

    /// Write a realm-wide attribute.
    async fn set_realm_attribute(&self, name: &str, value: &str) -> DirectoryResult<()>;
}

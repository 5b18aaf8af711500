//! The per-tenant quota gate.
//!
//! Every operation that can change a tenant's enabled-account count runs
//! inside that tenant's exclusive lock: the current count and the configured
//! ceiling are read fresh under the lock, and the identity-store mutation
//! happens before the lock is released. Operations on different tenants
//! never block one another.
//!
//! The count itself is never cached; serializing access to the lock while
//! re-reading the authoritative count is what keeps the ceiling invariant
//! without distributed locking. The guarantee is process-local: a second
//! process mutating the same identity store bypasses this gate and is not
//! guarded against.

use std::collections::HashMap;
use std::sync::Arc;

use custos_core::{AccountId, TenantId};
use custos_directory::{AccountRecord, DirectoryStore, NewAccount};
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use crate::error::{QuotaError, QuotaResult};

/// Serializes enabled-count-changing operations per tenant and rejects
/// operations that would exceed the tenant's ceiling.
pub struct TenantQuotaGate {
    store: Arc<dyn DirectoryStore>,
    /// Lock registry, keyed by tenant. Entries are created lazily and never
    /// removed; the leak is bounded by the number of tenants.
    locks: parking_lot::Mutex<HashMap<TenantId, Arc<AsyncMutex<()>>>>,
}

impl TenantQuotaGate {
    /// Create a gate over the given identity store.
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self {
            store,
            locks: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// Fetch or create the tenant's lock.
    fn tenant_lock(&self, tenant_id: TenantId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock();
        locks
            .entry(tenant_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Fail with [`QuotaError::Exceeded`] if raising the enabled count by
    /// `additional` would pass the ceiling. Must be called under the
    /// tenant's lock; both reads are fresh.
    async fn check_headroom(&self, tenant_id: TenantId, additional: i64) -> QuotaResult<()> {
        let quota = self.store.get_tenant_quota(tenant_id).await?;
        let Some(limit) = quota.max_enabled_users else {
            return Ok(());
        };

        let current = self.store.count_enabled_accounts(Some(tenant_id)).await?;
        if current + additional > limit {
            debug!(
                tenant_id = %tenant_id,
                current,
                limit,
                "Operation rejected: enabled-account ceiling reached"
            );
            return Err(QuotaError::Exceeded { limit, current });
        }
        Ok(())
    }

    /// Create an account under the tenant, enforcing the ceiling when the
    /// account starts enabled.
    pub async fn create_account(
        &self,
        tenant_id: TenantId,
        account: &NewAccount,
    ) -> QuotaResult<AccountRecord> {
        let lock = self.tenant_lock(tenant_id);
        let _guard = lock.lock().await;

        if account.enabled {
            self.check_headroom(tenant_id, 1).await?;
        }

        let record = self.store.create_account(tenant_id, account).await?;
        info!(
            tenant_id = %tenant_id,
            account_id = %record.id,
            enabled = record.enabled,
            "Account created"
        );
        Ok(record)
    }

    /// Enable an existing account, enforcing the ceiling. Enabling an
    /// already-enabled account is a no-op.
    pub async fn enable_account(&self, account_id: AccountId) -> QuotaResult<()> {
        // The owning tenant never changes, so it is safe to look it up
        // before taking the lock.
        let account = self.store.get_account(account_id).await?;
        let lock = self.tenant_lock(account.tenant_id);
        let _guard = lock.lock().await;

        // Fresh read under the lock; the pre-lock snapshot may be stale.
        let account = self.store.get_account(account_id).await?;
        if account.enabled {
            return Ok(());
        }

        self.check_headroom(account.tenant_id, 1).await?;
        self.store.set_account_enabled(account_id, true).await?;
        info!(
            tenant_id = %account.tenant_id,
            account_id = %account_id,
            "Account enabled"
        );
        Ok(())
    }

    /// Disable an account. Only reduces usage, so no ceiling check; routed
    /// through the same lock for simplicity.
    pub async fn disable_account(&self, account_id: AccountId) -> QuotaResult<()> {
        let account = self.store.get_account(account_id).await?;
        let lock = self.tenant_lock(account.tenant_id);
        let _guard = lock.lock().await;

        self.store.set_account_enabled(account_id, false).await?;
        info!(
            tenant_id = %account.tenant_id,
            account_id = %account_id,
            "Account disabled"
        );
        Ok(())
    }

    /// Delete an account. Deleting an enabled account changes the count, so
    /// it runs under the tenant's lock like the other mutations.
    pub async fn delete_account(&self, account_id: AccountId) -> QuotaResult<()> {
        let account = self.store.get_account(account_id).await?;
        let lock = self.tenant_lock(account.tenant_id);
        let _guard = lock.lock().await;

        self.store.delete_account(account_id).await?;
        info!(
            tenant_id = %account.tenant_id,
            account_id = %account_id,
            "Account deleted"
        );
        Ok(())
    }
}

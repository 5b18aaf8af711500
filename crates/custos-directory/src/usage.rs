//! Point-in-time usage counting.

use std::sync::Arc;

use custos_core::TenantId;
use serde::{Deserialize, Serialize};

use crate::error::DirectoryResult;
use crate::inventory::ResourceInventory;
use crate::store::DirectoryStore;

/// A point-in-time read of the counts the license ceilings apply to.
///
/// Never cached across calls; each snapshot is assembled from fresh reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Number of tenant groups.
    pub tenant_count: i64,
    /// Number of enabled accounts across all tenants.
    pub enabled_user_count: i64,
    /// Number of managed resource units.
    pub unit_count: i64,
}

/// Read-only usage queries against the identity store and the inventory.
#[derive(Clone)]
pub struct UsageCounter {
    store: Arc<dyn DirectoryStore>,
    inventory: Arc<dyn ResourceInventory>,
}

impl UsageCounter {
    /// Create a new usage counter.
    pub fn new(store: Arc<dyn DirectoryStore>, inventory: Arc<dyn ResourceInventory>) -> Self {
        Self { store, inventory }
    }

    /// Assemble a fresh snapshot of all three counts.
    pub async fn snapshot(&self) -> DirectoryResult<UsageSnapshot> {
        let tenant_count = self.store.count_tenants().await?;
        let enabled_user_count = self.store.count_enabled_accounts(None).await?;
        let unit_count = self.inventory.count_managed_units().await?;

        Ok(UsageSnapshot {
            tenant_count,
            enabled_user_count,
            unit_count,
        })
    }

    /// Fresh enabled-account count for a single tenant.
    pub async fn tenant_enabled_count(&self, tenant_id: TenantId) -> DirectoryResult<i64> {
        self.store.count_enabled_accounts(Some(tenant_id)).await
    }
}

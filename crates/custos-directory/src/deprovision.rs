//! Best-effort tenant deprovisioning.

use custos_core::TenantId;
use tracing::{info, warn};

use crate::error::DirectoryResult;
use crate::store::DirectoryStore;

/// Per-item outcome of removing a tenant and its accounts.
///
/// Account deletions are best-effort: one failure does not stop the rest of
/// the batch, and the tenant group itself is only removed once every account
/// deletion has been attempted.
#[derive(Debug, Clone, Default)]
pub struct DeprovisionReport {
    /// Accounts successfully deleted.
    pub accounts_deleted: usize,
    /// Per-account failures, as caller-safe descriptions.
    pub failures: Vec<String>,
    /// Whether the tenant group record itself was removed.
    pub tenant_deleted: bool,
}

impl DeprovisionReport {
    /// Whether every step succeeded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.tenant_deleted && self.failures.is_empty()
    }
}

/// Delete a tenant's accounts one by one, then the tenant group.
///
/// When any account deletion fails the group record is kept so the
/// operation can be retried; the report carries the partial results.
pub async fn deprovision_tenant(
    store: &dyn DirectoryStore,
    tenant_id: TenantId,
) -> DirectoryResult<DeprovisionReport> {
    let accounts = store.list_accounts(tenant_id).await?;
    let mut report = DeprovisionReport::default();

    for account in &accounts {
        match store.delete_account(account.id).await {
            Ok(()) => report.accounts_deleted += 1,
            Err(e) => {
                warn!(
                    tenant_id = %tenant_id,
                    account_id = %account.id,
                    error = %e,
                    "Failed to delete account during tenant deprovisioning"
                );
                report.failures.push(format!("account {}: {}", account.id, e.public_message()));
            }
        }
    }

    if report.failures.is_empty() {
        store.delete_tenant(tenant_id).await?;
        report.tenant_deleted = true;
        info!(
            tenant_id = %tenant_id,
            accounts = report.accounts_deleted,
            "Tenant deprovisioned"
        );
    } else {
        warn!(
            tenant_id = %tenant_id,
            failed = report.failures.len(),
            "Tenant group kept: account cleanup was incomplete"
        );
    }

    Ok(report)
}

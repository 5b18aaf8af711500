//! Applying lifecycle notifications against the identity store.

use std::sync::Arc;

use custos_directory::{deprovision_tenant, DirectoryStore, TenantRecord};
use tracing::{info, warn};

use crate::error::EventError;
use crate::event::TenantLifecycleEvent;

/// Dispatches decoded lifecycle events onto the identity store.
#[derive(Clone)]
pub struct TenantEventHandler {
    store: Arc<dyn DirectoryStore>,
}

impl TenantEventHandler {
    /// Create a new handler.
    pub fn new(store: Arc<dyn DirectoryStore>) -> Self {
        Self { store }
    }

    /// Apply one event. Deletion cleans up the tenant's accounts
    /// best-effort before removing the group record.
    pub async fn apply(&self, event: TenantLifecycleEvent) -> Result<(), EventError> {
        match event {
            TenantLifecycleEvent::Created {
                tenant_id,
                name,
                max_enabled_users,
            } => {
                self.store
                    .create_tenant(&TenantRecord {
                        id: tenant_id,
                        name,
                        active: true,
                        max_enabled_users,
                    })
                    .await?;
                info!(tenant_id = %tenant_id, "Tenant created from lifecycle event");
            }
            TenantLifecycleEvent::Activated { tenant_id } => {
                self.store.set_tenant_active(tenant_id, true).await?;
                info!(tenant_id = %tenant_id, "Tenant activated from lifecycle event");
            }
            TenantLifecycleEvent::Deactivated { tenant_id } => {
                self.store.set_tenant_active(tenant_id, false).await?;
                info!(tenant_id = %tenant_id, "Tenant deactivated from lifecycle event");
            }
            TenantLifecycleEvent::Deleted { tenant_id } => {
                let report = deprovision_tenant(self.store.as_ref(), tenant_id).await?;
                if !report.is_complete() {
                    warn!(
                        tenant_id = %tenant_id,
                        failed = report.failures.len(),
                        "Tenant deletion event applied partially"
                    );
                }
            }
            TenantLifecycleEvent::Modified {
                tenant_id,
                name,
                max_enabled_users,
            } => {
                let mut record = self.store.get_tenant(tenant_id).await?;
                if let Some(name) = name {
                    record.name = name;
                }
                if max_enabled_users.is_some() {
                    record.max_enabled_users = max_enabled_users;
                }
                self.store.create_tenant(&record).await?;
                info!(tenant_id = %tenant_id, "Tenant attributes updated from lifecycle event");
            }
        }

        Ok(())
    }
}

//! Shared application state for the admin API.

use std::sync::Arc;

use custos_directory::{DirectoryStore, UsageCounter};
use custos_license::EnforcementService;
use custos_quota::TenantQuotaGate;

/// State threaded through every handler.
#[derive(Clone)]
pub struct AppState {
    /// The identity-store client.
    pub store: Arc<dyn DirectoryStore>,
    /// The per-tenant quota gate; every account mutation goes through it.
    pub gate: Arc<TenantQuotaGate>,
    /// License verification, enforcement, and the write-access flag.
    pub enforcement: EnforcementService,
    /// Read-only usage queries.
    pub usage: UsageCounter,
}

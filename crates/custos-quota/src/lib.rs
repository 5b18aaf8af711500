//! Per-tenant quota enforcement for account-mutating operations.
//!
//! The [`TenantQuotaGate`] is the single entry point for every operation
//! that can change a tenant's enabled-account count. See the [`gate`]
//! module docs for the locking model and its known limitation.

pub mod error;
pub mod gate;

pub use error::{QuotaError, QuotaResult};
pub use gate::TenantQuotaGate;

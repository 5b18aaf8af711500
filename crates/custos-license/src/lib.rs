//! License verification and write-access enforcement for custos.
//!
//! The subsystem has three moving parts:
//!
//! 1. [`LicenseVerifier`] decodes a signed envelope and checks its
//!    signatures against the one pinned certificate.
//! 2. [`evaluate`] combines a license (or its absence) with a fresh
//!    [`custos_directory::UsageSnapshot`] into a write-access decision and a
//!    set of operator messages.
//! 3. [`MessageReconciler`] applies the minimal add/remove delta to the
//!    external message store so the published set always matches the latest
//!    decision.
//!
//! [`EnforcementService`] wires the three together and owns the process-wide
//! [`WriteAccessFlag`].

pub mod enforcer;
pub mod envelope;
pub mod error;
pub mod flag;
pub mod license;
pub mod messages;
pub mod reconciler;
pub mod service;

pub use enforcer::{evaluate, EnforcementDecision, EXPIRY_WARNING_DAYS};
pub use envelope::LicenseVerifier;
pub use error::{LicenseError, LicenseResult};
pub use flag::WriteAccessFlag;
pub use license::License;
pub use messages::LICENSE_TAG;
pub use reconciler::{MessageReconciler, ReconcileReport};
pub use service::{EnforcementService, LicenseStatus, LICENSE_ATTRIBUTE};

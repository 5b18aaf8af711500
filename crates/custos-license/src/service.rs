//! Enforcement orchestration: verify, count, decide, publish.

use std::sync::Arc;

use chrono::Utc;
use custos_directory::{DirectoryStore, UsageCounter, UsageSnapshot};
use serde::Serialize;
use tracing::{info, warn};

use crate::enforcer::{evaluate, EnforcementDecision};
use crate::envelope::LicenseVerifier;
use crate::error::{LicenseError, LicenseResult};
use crate::flag::WriteAccessFlag;
use crate::license::License;
use crate::reconciler::MessageReconciler;

/// Realm attribute under which the raw signed blob persists. The identity
/// store is the only place the license is stored.
pub const LICENSE_ATTRIBUTE: &str = "custos.license";

/// Operator-facing license status.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseStatus {
    /// The stored license, if one verifies.
    pub license: Option<License>,
    /// Current usage counts.
    pub usage: UsageSnapshot,
    /// Whether account-mutating operations are currently permitted.
    pub write_access: bool,
}

/// Ties the subsystem together: license verification, usage counting, the
/// decision table, the write-access flag, and message reconciliation.
///
/// Runs on license upload and after any account-count change; the binary
/// also drives it on a periodic interval.
#[derive(Clone)]
pub struct EnforcementService {
    verifier: LicenseVerifier,
    store: Arc<dyn DirectoryStore>,
    usage: UsageCounter,
    reconciler: MessageReconciler,
    flag: WriteAccessFlag,
}

impl EnforcementService {
    /// Create a new enforcement service.
    pub fn new(
        verifier: LicenseVerifier,
        store: Arc<dyn DirectoryStore>,
        usage: UsageCounter,
        reconciler: MessageReconciler,
        flag: WriteAccessFlag,
    ) -> Self {
        Self {
            verifier,
            store,
            usage,
            reconciler,
            flag,
        }
    }

    /// The shared write-access flag.
    #[must_use]
    pub fn write_access(&self) -> &WriteAccessFlag {
        &self.flag
    }

    /// Install an uploaded license document.
    ///
    /// Verifies the envelope, rejects a lapsed license without touching the
    /// previously stored blob, persists the raw document, and recomputes
    /// enforcement.
    pub async fn install(&self, raw: &str) -> LicenseResult<License> {
        let license = self.verifier.verify(raw)?;

        if license.is_expired(Utc::now()) {
            return Err(LicenseError::Expired {
                valid_until: license.valid_until,
            });
        }

        self.store.set_realm_attribute(LICENSE_ATTRIBUTE, raw).await?;
        info!(
            customer_id = %license.customer_id,
            valid_until = %license.valid_until,
            "License installed"
        );

        self.re_evaluate().await?;
        Ok(license)
    }

    /// Load and verify the stored license blob.
    ///
    /// A blob that no longer verifies is treated as no license (and logged);
    /// only collaborator failures propagate.
    pub async fn stored_license(&self) -> LicenseResult<Option<License>> {
        let Some(raw) = self.store.get_realm_attribute(LICENSE_ATTRIBUTE).await? else {
            return Ok(None);
        };

        match self.verifier.verify(&raw) {
            Ok(license) => Ok(Some(license)),
            Err(e) if e.is_rejection() => {
                warn!(error = %e, "Stored license blob does not verify, treating as absent");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Recompute the write-access decision from the stored license and a
    /// fresh usage snapshot, then push the flag and the message delta.
    pub async fn re_evaluate(&self) -> LicenseResult<EnforcementDecision> {
        let license = self.stored_license().await?;
        let usage = self.usage.snapshot().await?;

        let decision = evaluate(license.as_ref(), &usage, Utc::now());
        self.flag.set(decision.write_access);

        let report = self.reconciler.reconcile(&decision.messages).await?;
        if !report.failures.is_empty() {
            warn!(
                failed = report.failures.len(),
                "Some enforcement messages could not be updated"
            );
        }

        info!(
            write_access = decision.write_access,
            messages = decision.messages.len(),
            created = report.created,
            deleted = report.deleted,
            "License enforcement recomputed"
        );
        Ok(decision)
    }

    /// Assemble the operator-facing status view.
    pub async fn status(&self) -> LicenseResult<LicenseStatus> {
        let license = self.stored_license().await?;
        let usage = self.usage.snapshot().await?;
        Ok(LicenseStatus {
            license,
            usage,
            write_access: self.flag.is_allowed(),
        })
    }
}

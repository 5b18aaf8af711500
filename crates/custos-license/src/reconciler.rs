//! Diff-based reconciliation of published operator messages.
//!
//! Compares the message set the latest enforcement run wants published with
//! what the message store currently holds, and applies the minimal
//! add/remove delta. Identity is content equality, so an unchanged desired
//! set results in zero writes.

use std::collections::BTreeSet;
use std::sync::Arc;

use custos_directory::{DirectoryResult, MessageStore, OperatorMessage};
use tracing::{debug, warn};

use crate::messages::LICENSE_TAG;

/// Summary of one reconciliation pass.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    /// Messages newly published.
    pub created: usize,
    /// Stale messages removed.
    pub deleted: usize,
    /// Messages left untouched.
    pub unchanged: usize,
    /// Per-item failures; these did not stop the rest of the batch.
    pub failures: Vec<String>,
}

impl ReconcileReport {
    /// Whether the pass changed nothing and hit no failures.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.created == 0 && self.deleted == 0 && self.failures.is_empty()
    }
}

/// Applies a desired message set to the external message store.
#[derive(Clone)]
pub struct MessageReconciler {
    store: Arc<dyn MessageStore>,
}

impl MessageReconciler {
    /// Create a new reconciler.
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// Reconcile the published license messages with `desired`.
    ///
    /// Fetches the currently published messages carrying the license tag,
    /// deletes the ones no longer desired, and creates the missing ones.
    /// Individual add/delete failures are collected into the report rather
    /// than aborting the batch; only a failing initial fetch is fatal.
    pub async fn reconcile(
        &self,
        desired: &BTreeSet<OperatorMessage>,
    ) -> DirectoryResult<ReconcileReport> {
        let published = self.store.list_messages(LICENSE_TAG).await?;
        let published_contents: BTreeSet<&OperatorMessage> =
            published.iter().map(|stored| &stored.message).collect();

        let mut report = ReconcileReport::default();

        for stored in &published {
            if desired.contains(&stored.message) {
                report.unchanged += 1;
                continue;
            }
            match self.store.delete_message(&stored.id).await {
                Ok(()) => report.deleted += 1,
                Err(e) => {
                    warn!(message_id = %stored.id, error = %e, "Failed to delete stale message");
                    report
                        .failures
                        .push(format!("delete {}: {e}", stored.id));
                }
            }
        }

        for message in desired {
            if published_contents.contains(message) {
                continue;
            }
            match self.store.create_message(message).await {
                Ok(stored) => {
                    debug!(message_id = %stored.id, "Published enforcement message");
                    report.created += 1;
                }
                Err(e) => {
                    warn!(severity = %message.severity, error = %e, "Failed to publish message");
                    report.failures.push(format!("create: {e}"));
                }
            }
        }

        Ok(report)
    }
}

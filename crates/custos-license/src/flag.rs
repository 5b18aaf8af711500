//! The process-wide write-access flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Advisory gate for account-mutating operations.
///
/// Initialized to restricted at startup; only the enforcement recomputation
/// writes it, every gated mutation reads it. Reads are not synchronized with
/// the enforcement run: a mutation that proceeds just as the flag flips is
/// acceptable.
#[derive(Debug, Clone)]
pub struct WriteAccessFlag {
    allowed: Arc<AtomicBool>,
}

impl WriteAccessFlag {
    /// Create a flag in the restricted state.
    #[must_use]
    pub fn restricted() -> Self {
        Self {
            allowed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether account-mutating operations may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        self.allowed.load(Ordering::SeqCst)
    }

    /// Update the flag. Called only by the enforcement recomputation.
    pub fn set(&self, allowed: bool) {
        self.allowed.store(allowed, Ordering::SeqCst);
    }
}

impl Default for WriteAccessFlag {
    fn default() -> Self {
        Self::restricted()
    }
}

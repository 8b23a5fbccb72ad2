//! Cooperative cancellation of a scan
//!
//! Fuzzy matching every node of a large filing can run long. The caller
//! holds a clone of the token; the scan checks it between node visits and
//! abandons the run, discarding records assembled so far.

use crate::error::{TaggerError, TaggerResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag checked between node visits.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation; takes effect at the next checkpoint.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// `Err(Cancelled)` once cancellation has been requested.
    pub fn checkpoint(&self) -> TaggerResult<()> {
        if self.is_cancelled() {
            Err(TaggerError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_token_passes_checkpoint() {
        let token = CancellationToken::new();
        assert!(token.checkpoint().is_ok());
    }

    #[test]
    fn clones_observe_cancellation() {
        let token = CancellationToken::new();
        let held_by_caller = token.clone();
        held_by_caller.cancel();

        assert!(token.is_cancelled());
        assert!(matches!(token.checkpoint(), Err(TaggerError::Cancelled)));
    }
}

use std::sync::atomic::{AtomicU64, Ordering};

use crate::requester::{RequestOutcome, Verdict};

/// Counters shared by every in-flight request task.
#[derive(Debug, Default)]
pub struct Summary {
    total_hits: AtomicU64,
    success: AtomicU64,
    failed: AtomicU64,
    unreachable: AtomicU64,
}

/// Snapshot of a [`Summary`], taken once every task has finished.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub total_hits: u64,
    pub success: u64,
    pub failed: u64,
    /// Kept out of the printed report.
    pub unreachable: u64,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, outcome: &RequestOutcome) -> Verdict {
        let verdict = outcome.verdict();
        match verdict {
            Verdict::Success => {
                self.success.fetch_add(1, Ordering::SeqCst);
                self.total_hits.fetch_add(1, Ordering::SeqCst);
            }
            Verdict::Failed => {
                self.failed.fetch_add(1, Ordering::SeqCst);
                self.total_hits.fetch_add(1, Ordering::SeqCst);
            }
            Verdict::Unreachable => {
                self.unreachable.fetch_add(1, Ordering::SeqCst);
            }
        }
        verdict
    }

    pub fn totals(&self) -> Totals {
        Totals {
            total_hits: self.total_hits.load(Ordering::SeqCst),
            success: self.success.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
            unreachable: self.unreachable.load(Ordering::SeqCst),
        }
    }
}

impl Totals {
    /// Every request issued, reachable or not.
    pub fn attempted(&self) -> u64 {
        self.total_hits.saturating_add(self.unreachable)
    }
}

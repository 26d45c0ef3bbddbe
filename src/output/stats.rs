//! Per-run harvest statistics
//!
//! Counters are updated by the workers as URLs reach a terminal state and
//! turned into a [`HarvestReport`] when the run ends.

use crate::state::UrlState;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Summary of one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    /// URLs that entered `Visiting`
    pub visited: u64,
    pub saved: u64,
    pub skipped: u64,
    pub failed: u64,
    /// Sections that were extracted but could not be written
    pub persist_failures: u64,
    /// True if the run stopped because of a cancellation request
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl HarvestReport {
    /// Returns the number of URLs in a terminal state
    pub fn total_terminal(&self) -> u64 {
        self.saved + self.skipped + self.failed
    }

    /// Returns the share of visited URLs that produced a saved section, as a percentage
    pub fn success_rate(&self) -> f64 {
        let terminal = self.total_terminal();
        if terminal == 0 {
            return 0.0;
        }
        (self.saved as f64 / terminal as f64) * 100.0
    }
}

/// Lock-free counters shared by the harvest workers
#[derive(Debug, Default)]
pub struct HarvestCounters {
    visited: AtomicU64,
    saved: AtomicU64,
    skipped: AtomicU64,
    failed: AtomicU64,
    persist_failures: AtomicU64,
    cancelled: AtomicBool,
}

impl HarvestCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a URL state change
    ///
    /// `Visiting` counts a visit, terminal states count outcomes, and
    /// `Unvisited` is ignored.
    pub fn record(&self, state: UrlState) {
        let counter = match state {
            UrlState::Unvisited => return,
            UrlState::Visiting => &self.visited,
            UrlState::Saved => &self.saved,
            UrlState::Skipped => &self.skipped,
            UrlState::Failed => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_persist_failure(&self) {
        self.persist_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn mark_cancelled(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn snapshot(&self, elapsed: Duration) -> HarvestReport {
        HarvestReport {
            visited: self.visited.load(Ordering::Relaxed),
            saved: self.saved.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            persist_failures: self.persist_failures.load(Ordering::Relaxed),
            cancelled: self.cancelled.load(Ordering::Relaxed),
            elapsed,
        }
    }
}

/// Prints a harvest report to stdout
pub fn print_report(report: &HarvestReport) {
    println!("=== Harvest Summary ===\n");
    println!("Visited:          {}", report.visited);
    println!("Saved:            {}", report.saved);
    println!("Skipped:          {}", report.skipped);
    println!("Failed:           {}", report.failed);
    println!("Persist failures: {}", report.persist_failures);
    println!("Success rate:     {:.2}%", report.success_rate());
    println!("Elapsed:          {:.2?}", report.elapsed);
    if report.cancelled {
        println!("\nRun was cancelled before the frontier was exhausted");
    }
}

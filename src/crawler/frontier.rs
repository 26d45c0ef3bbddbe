//! Shared crawl frontier for the harvest workers
//!
//! This module handles:
//! - The stack of URLs waiting to be processed
//! - The visited set, with an atomic test-and-set at claim time
//! - Scope and depth filtering of discovered links
//! - Detecting when the crawl is exhausted or cancelled
//!
//! Discovered links are pushed in reverse page order onto a stack, so a
//! single worker visits pages in depth-first pre-order.

use crate::url::Scope;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use url::Url;

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// The URL to fetch
    pub url: String,

    /// Link distance from the start URL
    pub depth: u32,
}

#[derive(Debug, Default)]
struct FrontierState {
    pending: Vec<FrontierEntry>,
    visited: HashSet<String>,
    in_flight: usize,
    claimed: u64,
}

enum Claim {
    Ready(FrontierEntry),
    Wait,
    Exhausted,
}

/// Frontier shared by all harvest workers
///
/// A URL is claimed at most once per run: the visited check and insert
/// happen under the same lock when an entry is popped.
pub struct Frontier {
    state: Mutex<FrontierState>,
    notify: Notify,
    scope: Scope,
    max_depth: Option<u32>,
    max_pages: Option<u64>,
    cancel: CancellationToken,
}

impl Frontier {
    /// Creates an empty frontier
    ///
    /// # Arguments
    ///
    /// * `scope` - Decides which discovered links are admitted
    /// * `max_depth` - Links deeper than this are dropped
    /// * `max_pages` - No more URLs are claimed after this many
    /// * `cancel` - Stops handing out URLs once cancelled
    pub fn new(
        scope: Scope,
        max_depth: Option<u32>,
        max_pages: Option<u64>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            state: Mutex::new(FrontierState::default()),
            notify: Notify::new(),
            scope,
            max_depth,
            max_pages,
            cancel,
        }
    }

    /// Seeds the frontier with the start URL at depth 0
    ///
    /// The URL is serialized the same way resolved links are, so
    /// `https://host` and a later link to `/` are one page. Only host scope
    /// applies here; skip patterns are for discovered links. Returns the
    /// seeded URL, or `None` if it was not admitted.
    pub fn seed(&self, url: &str) -> Option<String> {
        let url = Url::parse(url).ok()?.to_string();
        if !self.scope.is_valid_url(&url) {
            return None;
        }

        let mut state = self.lock();
        if state.visited.contains(&url) {
            return None;
        }
        state.pending.push(FrontierEntry {
            url: url.clone(),
            depth: 0,
        });
        drop(state);

        self.notify.notify_waiters();
        Some(url)
    }

    /// Waits for the next URL to process
    ///
    /// Returns `None` when nothing is pending and no other worker is still
    /// processing a page, when the page budget is spent, or on cancellation.
    pub async fn next(&self) -> Option<FrontierEntry> {
        loop {
            let notified = self.notify.notified();

            if self.cancel.is_cancelled() {
                return None;
            }

            match self.try_claim() {
                Claim::Ready(entry) => return Some(entry),
                Claim::Exhausted => {
                    self.notify.notify_waiters();
                    return None;
                }
                Claim::Wait => {}
            }

            tokio::select! {
                _ = notified => {}
                _ = self.cancel.cancelled() => return None,
            }
        }
    }

    fn try_claim(&self) -> Claim {
        let mut state = self.lock();

        if let Some(max) = self.max_pages {
            if state.claimed >= max {
                return Claim::Exhausted;
            }
        }

        while let Some(entry) = state.pending.pop() {
            if state.visited.insert(entry.url.clone()) {
                state.in_flight += 1;
                state.claimed += 1;
                return Claim::Ready(entry);
            }
        }

        if state.in_flight == 0 {
            Claim::Exhausted
        } else {
            Claim::Wait
        }
    }

    /// Marks a claimed entry as processed and queues the links found on it
    ///
    /// `links` must already be absolute. Each one goes through
    /// [`Scope::should_process`] against the visited set; links beyond the
    /// depth limit are dropped as well.
    pub fn complete(&self, entry: &FrontierEntry, links: Vec<String>) {
        let depth = entry.depth + 1;
        let within_depth = self.max_depth.map_or(true, |max| depth <= max);

        let mut state = self.lock();
        if within_depth {
            for link in links.into_iter().rev() {
                if self.scope.should_process(&link, &state.visited) {
                    state.pending.push(FrontierEntry { url: link, depth });
                }
            }
        }
        state.in_flight = state.in_flight.saturating_sub(1);
        drop(state);

        self.notify.notify_waiters();
    }

    pub fn visited_count(&self) -> usize {
        self.lock().visited.len()
    }

    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> MutexGuard<'_, FrontierState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Limits that abort a search.
//!
//! Each leaf may cost a network round trip, so the clock is read on every
//! node rather than every few thousand.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Node cap, wall-clock cap and external stop flag for one search.
///
/// The default budget is unlimited.
#[derive(Debug, Clone, Default)]
pub struct SearchBudget {
    max_nodes: Option<u64>,
    time_limit: Option<Duration>,
    stop: StopHandle,
    started: Option<Instant>,
}

impl SearchBudget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// A handle another thread can use to stop the search.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Start the clock. Called when the search begins.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Elapsed time since [`SearchBudget::start`], zero if never started.
    pub fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or(Duration::ZERO)
    }

    /// Whether a search that has visited `nodes` nodes must stop now.
    pub fn exhausted(&self, nodes: u64) -> bool {
        if self.stop.is_stopped() {
            return true;
        }
        if let Some(max) = self.max_nodes
            && nodes >= max
        {
            return true;
        }
        matches!(self.time_limit, Some(limit) if self.elapsed() >= limit)
    }
}

/// Shared stop flag; cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
#[path = "budget_tests.rs"]
mod budget_tests;

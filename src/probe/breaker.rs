// src/probe/breaker.rs
// =============================================================================
// The circuit breaker: a shared counter of consecutive failed probes.
//
// Why?
// - A target that starts refusing connections (firewall, rate limit, crash)
//   should not keep getting hammered by dozens of workers
// - A run of consecutive failures is the cheapest signal we have
// - Any single success resets the counter, so short blips are tolerated
//
// Every worker touches this counter, so it is a single AtomicUsize.
// Concurrent increments and resets never lose updates.
// =============================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct CircuitBreaker {
    consecutive: AtomicUsize,
    max_errors: usize,
}

impl CircuitBreaker {
    pub fn new(max_errors: usize) -> Self {
        Self {
            consecutive: AtomicUsize::new(0),
            max_errors,
        }
    }

    /// A probe got an HTTP response, whatever its status
    pub fn record_success(&self) {
        self.consecutive.store(0, Ordering::SeqCst);
    }

    /// A probe failed at the transport level. Returns the new count.
    pub fn record_failure(&self) -> usize {
        self.consecutive.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_tripped(&self) -> bool {
        self.consecutive() >= self.max_errors
    }

    pub fn consecutive(&self) -> usize {
        self.consecutive.load(Ordering::SeqCst)
    }

    pub fn max_errors(&self) -> usize {
        self.max_errors
    }
}

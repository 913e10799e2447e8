// src/probe/gate.rs
// =============================================================================
// The concurrency gate: at most `capacity` probes may be in flight at once.
//
// This is a tokio Semaphore with one permit per allowed probe. A probe holds
// a GatePermit for as long as it runs. The permit goes back when the guard is
// dropped, which covers every way a probe can end:
// - the request succeeded
// - the request failed
// - the task was aborted in the middle of an .await
//
// When a run is aborted the gate is closed: anyone still waiting for a slot
// gets GateClosed instead of a permit, so no new request starts while the
// remaining tasks are being torn down.
// =============================================================================

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use crate::error::ProbeError;

#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// Held while a probe runs; dropping it releases the slot
#[derive(Debug)]
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a slot is free
    pub async fn acquire(&self) -> Result<GatePermit, ProbeError> {
        let permit = Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| ProbeError::GateClosed)?;
        Ok(GatePermit { _permit: permit })
    }

    /// Refuses every pending and future acquire; held permits still return
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

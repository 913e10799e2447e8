// src/probe/mod.rs
// =============================================================================
// This module contains the probing engine.
//
// Submodules:
// - job: turns a wordlist + methods into (method, path) jobs
// - filter: include/exclude rules on status codes
// - breaker: consecutive-failure counter that stops a run
// - gate: concurrency ceiling (how many probes may run at once)
// - context: the per-run bundle of client, origin, gate and breaker
// - worker: performs a single probe
// - runner: spawns all probes, collects results, handles aborts
//
// Data flow:
//   job -> gate -> worker (breaker in, request, breaker out) -> filter -> sink
// =============================================================================

mod breaker;
mod context;
mod filter;
mod gate;
mod job;
mod runner;
mod worker;

#[cfg(test)]
pub(crate) mod mock;

// Re-export what main.rs and output.rs need
pub use context::{build_client, RunContext};
pub use filter::FilterRule;
pub use job::{enumerate_jobs, HttpMethod};
pub use runner::{run, AbortReason, RunOutcome};
pub use worker::ProbeResult;

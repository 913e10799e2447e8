// src/probe/runner.rs
// =============================================================================
// The orchestrator: runs every job and decides when the run is over.
//
// How it works:
// 1. Spawn one tokio task per job into a JoinSet (the gate keeps at most
//    `threads` of them talking to the target at once)
// 2. Collect results as tasks finish, in completion order, and pass the
//    accepted ones to the sink right away
// 3. Stop early when either
//    - a task reports that the circuit breaker tripped, or
//    - the shutdown token is cancelled (Ctrl-C)
// 4. On an early stop, close the gate so nothing new gets a slot, abort
//    every remaining task and wait for all of them to be gone
//
// The JoinSet owns every task, so nothing spawned here outlives `run`.
// Results of probes that finished before the stop are kept.
//
// Rust concepts:
// - JoinSet: a group of spawned tasks we can join one by one or abort together
// - tokio::select!: wait for whichever happens first
// - Arc: every task shares the same RunContext
// =============================================================================

use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::context::RunContext;
use super::filter::FilterRule;
use super::job::Job;
use super::worker::{probe, ProbeResult};
use crate::error::ProbeError;
use crate::output::ResultSink;

/// Why a run ended before every job was probed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbortReason {
    TooManyErrors { consecutive: usize, max: usize },
    Interrupted,
}

#[derive(Debug)]
pub enum RunOutcome {
    Completed {
        results: Vec<ProbeResult>,
    },
    Aborted {
        reason: AbortReason,
        results: Vec<ProbeResult>,
    },
}

impl RunOutcome {
    /// Every probe that finished, accepted or not
    pub fn results(&self) -> &[ProbeResult] {
        match self {
            RunOutcome::Completed { results } => results,
            RunOutcome::Aborted { results, .. } => results,
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, RunOutcome::Aborted { .. })
    }

    /// 0 for a full run, 1 for a breaker trip or an interrupt
    pub fn exit_code(&self) -> i32 {
        if self.is_aborted() {
            1
        } else {
            0
        }
    }
}

// Probes every job against ctx.origin
//
// Parameters:
//   ctx: the run context shared with every task
//   jobs: usually enumerate_jobs(...)
//   filter: which results go to the sink
//   sink: receives accepted results as they complete
//   shutdown: cancel it to stop the run (same path as a breaker trip)
pub async fn run<I, S>(
    ctx: Arc<RunContext>,
    jobs: I,
    filter: &FilterRule,
    sink: &mut S,
    shutdown: &CancellationToken,
) -> RunOutcome
where
    I: IntoIterator<Item = Job>,
    S: ResultSink + ?Sized,
{
    let mut tasks = JoinSet::new();
    for job in jobs {
        let ctx = Arc::clone(&ctx);
        tasks.spawn(async move { probe(&ctx, job).await });
    }

    tracing::info!(
        origin = %ctx.origin,
        jobs = tasks.len(),
        threads = ctx.gate.capacity(),
        max_errors = ctx.breaker.max_errors(),
        "run started"
    );

    let mut results = Vec::new();

    let abort = loop {
        let joined = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break Some(AbortReason::Interrupted),
            joined = tasks.join_next() => joined,
        };

        let Some(joined) = joined else {
            break None;
        };

        match joined {
            Ok(Ok(result)) => collect(result, filter, sink, &mut results),
            Ok(Err(ProbeError::TooManyErrors { consecutive, max })) => {
                break Some(AbortReason::TooManyErrors { consecutive, max });
            }
            Ok(Err(ProbeError::GateClosed)) => {
                // the gate is only closed on the abort path below
                tracing::warn!("probe skipped, concurrency gate closed");
            }
            Err(e) => {
                tracing::warn!(error = %e, "probe task failed");
            }
        }
    };

    let Some(reason) = abort else {
        tracing::info!(results = results.len(), "run completed");
        return RunOutcome::Completed { results };
    };

    tracing::warn!(reason = ?reason, pending = tasks.len(), "aborting run");
    ctx.gate.close();
    tasks.abort_all();

    // Drain: cancelled tasks come back as JoinErrors and are dropped,
    // anything that finished before the abort landed still counts.
    while let Some(joined) = tasks.join_next().await {
        if let Ok(Ok(result)) = joined {
            collect(result, filter, sink, &mut results);
        }
    }

    tracing::info!(results = results.len(), "run aborted");
    RunOutcome::Aborted { reason, results }
}

fn collect<S>(
    result: ProbeResult,
    filter: &FilterRule,
    sink: &mut S,
    results: &mut Vec<ProbeResult>,
) where
    S: ResultSink + ?Sized,
{
    if filter.accepts_result(&result) {
        if let Err(e) = sink.emit(&result) {
            tracing::warn!(error = %e, "failed to write result");
        }
    }
    results.push(result);
}

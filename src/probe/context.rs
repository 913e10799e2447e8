// src/probe/context.rs
// =============================================================================
// Everything one run shares between its probe tasks.
//
// A RunContext is created per invocation and handed to every worker behind
// an Arc. There are no globals: two runs in the same process (the tests do
// this all the time) never see each other's breaker or gate.
//
// Contents:
// - client: one reqwest Client for the whole run, so connections are pooled
// - origin: the target URL every path is appended to
// - gate: the concurrency ceiling
// - breaker: the consecutive-failure counter
// =============================================================================

use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;

use super::breaker::CircuitBreaker;
use super::gate::ConcurrencyGate;

#[derive(Debug)]
pub struct RunContext {
    pub client: Client,
    pub origin: String,
    pub gate: ConcurrencyGate,
    pub breaker: CircuitBreaker,
}

impl RunContext {
    pub fn new(
        client: Client,
        origin: impl Into<String>,
        threads: usize,
        max_errors: usize,
    ) -> Self {
        Self {
            client,
            origin: origin.into(),
            gate: ConcurrencyGate::new(threads),
            breaker: CircuitBreaker::new(max_errors),
        }
    }
}

// Builds the HTTP client used for every probe of a run
//
// Settings:
// - no redirect following: a 301 is a result we want to report, not follow
// - invalid certificates accepted: targets with self-signed certs are common
// - a per-request timeout so one hung connection can't hold a gate slot forever
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .danger_accept_invalid_certs(true)
        .user_agent(concat!("path-scout/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")
}

// src/error.rs
// =============================================================================
// Typed errors for path-scout.
//
// Most of the application uses anyhow::Result (see main.rs), but the probe
// engine needs errors it can match on:
// - ProbeError::TooManyErrors is how a worker tells the orchestrator that the
//   circuit breaker has tripped and the whole run must stop
// - ConfigError describes flags that parsed fine but make no sense together
//
// Transport failures (connection refused, DNS, TLS, timeouts) are NOT errors
// here. They are ordinary outcomes of a probe and become a failed ProbeResult.
// =============================================================================

use thiserror::Error;

/// Errors a single probe task can return to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// The circuit breaker tripped before this probe was allowed to start
    #[error("too many consecutive errors ({consecutive} >= {max}), aborting run")]
    TooManyErrors { consecutive: usize, max: usize },

    /// The run was aborted and its concurrency gate closed before this
    /// probe got a slot
    #[error("concurrency gate closed")]
    GateClosed,
}

/// Configuration that clap accepted but that we cannot run with
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid target URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("--threads must be at least 1")]
    ZeroThreads,

    #[error("--max_errors must be at least 1")]
    ZeroMaxErrors,
}

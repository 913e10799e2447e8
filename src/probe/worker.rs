// src/probe/worker.rs
// =============================================================================
// This module performs one probe: one HTTP request for one Job.
//
// Steps for every probe:
// 1. Wait for a slot in the concurrency gate
// 2. Bail out if the circuit breaker has tripped (no request is sent)
// 3. Send `<METHOD> <origin>/<path>` without following redirects
// 4. Read the whole body and count its bytes
// 5. Tell the breaker how it went (success resets, failure increments)
//
// Transport failures (refused, DNS, TLS, timeout) are expected against a
// half-alive target. They become a failed ProbeResult, never an Err.
// The only Err a probe returns is the "stop the run" signal.
//
// Rust concepts:
// - Drop guards: the gate permit is released when `_permit` goes out of scope
// - Streams: bytes_stream() hands us the body chunk by chunk
// - Option<T>: status/length are None when there was no HTTP response
// =============================================================================

use futures::StreamExt;
use reqwest::Client;
use serde::Serialize;

use super::context::RunContext;
use super::job::{HttpMethod, Job};
use crate::error::ProbeError;

// The outcome of one probe
//
// When `failed` is true there was no HTTP response, so `status` and
// `content_length` are None.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResult {
    pub method: HttpMethod,
    pub url: String,
    pub path: String,
    #[serde(rename = "statusCode")]
    pub status: Option<u16>,
    pub content_length: Option<u64>,
    pub failed: bool,
}

impl ProbeResult {
    pub fn response(
        method: HttpMethod,
        url: String,
        path: String,
        status: u16,
        content_length: u64,
    ) -> Self {
        Self {
            method,
            url,
            path,
            status: Some(status),
            content_length: Some(content_length),
            failed: false,
        }
    }

    pub fn failure(method: HttpMethod, url: String, path: String) -> Self {
        Self {
            method,
            url,
            path,
            status: None,
            content_length: None,
            failed: true,
        }
    }
}

// Joins the origin and a wordlist entry with a single '/'
//
// No normalization on purpose: "http://host/" + "admin" gives
// "http://host//admin", exactly what the operator asked for.
pub fn build_url(origin: &str, path: &str) -> String {
    format!("{}/{}", origin, path)
}

// Runs one job against the target
//
// Returns:
//   Ok(result) for both HTTP responses and transport failures
//   Err(TooManyErrors) if the breaker tripped before we could start
//   Err(GateClosed) if the run was aborted while we waited for a slot
pub async fn probe(ctx: &RunContext, job: Job) -> Result<ProbeResult, ProbeError> {
    let _permit = ctx.gate.acquire().await?;

    if ctx.breaker.is_tripped() {
        return Err(ProbeError::TooManyErrors {
            consecutive: ctx.breaker.consecutive(),
            max: ctx.breaker.max_errors(),
        });
    }

    let url = build_url(&ctx.origin, &job.path);

    match fetch(&ctx.client, job.method, &url).await {
        Ok((status, content_length)) => {
            ctx.breaker.record_success();
            tracing::trace!(
                method = %job.method,
                url = %url,
                status,
                content_length,
                "probe answered"
            );
            Ok(ProbeResult::response(job.method, url, job.path, status, content_length))
        }
        Err(error) => {
            let consecutive = ctx.breaker.record_failure();
            tracing::debug!(
                method = %job.method,
                url = %url,
                consecutive,
                kind = categorize_error(&error),
                error = %error,
                "probe failed"
            );
            Ok(ProbeResult::failure(job.method, url, job.path))
        }
    }
}

// Sends the request and measures the body
//
// We count the bytes we actually receive instead of trusting the
// Content-Length header, which may be missing or wrong.
async fn fetch(
    client: &Client,
    method: HttpMethod,
    url: &str,
) -> Result<(u16, u64), reqwest::Error> {
    let response = client.request(method.into(), url).send().await?;
    let status = response.status().as_u16();

    let mut body = response.bytes_stream();
    let mut length = 0u64;
    while let Some(chunk) = body.next().await {
        length += chunk?.len() as u64;
    }

    Ok((status, length))
}

// Short label for a transport error, used in debug logs
fn categorize_error(error: &reqwest::Error) -> &'static str {
    if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_body() || error.is_decode() {
        "body"
    } else if error.is_builder() {
        "invalid-url"
    } else {
        "request"
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `let _permit = ...` and not `let _ = ...`?
//    - `let _ = x` drops x immediately, the permit would be released at once
//    - `let _permit = x` keeps it alive until the end of the function
//    - If the task is aborted, the future is dropped and so is `_permit`
//
// 2. Why is a failed request `Ok(...)`?
//    - Failures are normal data for a prober, they go into the breaker
//    - Err is reserved for "the whole run must stop"
// -----------------------------------------------------------------------------

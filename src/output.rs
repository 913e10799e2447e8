// src/output.rs
// =============================================================================
// Where accepted probe results go.
//
// Two outputs:
// - a line per result, written as soon as the probe finishes (ConsoleSink)
// - an optional JSON report with every HTTP response, written at the end
//
// The orchestrator only knows about the ResultSink trait, so tests can
// collect results into a Vec instead of printing them.
// =============================================================================

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::probe::ProbeResult;

/// Receives every accepted result, in completion order
pub trait ResultSink {
    fn emit(&mut self, result: &ProbeResult) -> std::io::Result<()>;
}

// Writes one formatted line per result
//
// Generic over the writer so we can point it at stdout in main.rs
// and at a Vec<u8> in tests.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn emit(&mut self, result: &ProbeResult) -> std::io::Result<()> {
        writeln!(self.out, "{}", format_line(result))?;
        self.out.flush()
    }
}

impl ResultSink for Vec<ProbeResult> {
    fn emit(&mut self, result: &ProbeResult) -> std::io::Result<()> {
        self.push(result.clone());
        Ok(())
    }
}

// Formats a result as: METHOD  URL  STATUS  LENGTH
//
// Column widths are cosmetic; long URLs simply push the rest of the line out.
pub fn format_line(result: &ProbeResult) -> String {
    let status = result
        .status
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let length = result
        .content_length
        .map(|l| l.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<8}{:<40}\t{:>5}\t{:>8}",
        result.method.as_str(),
        result.url,
        status,
        length
    )
}

// Writes the final JSON report
//
// Parameters:
//   path: where to write the file (overwritten if it exists)
//   results: the results to include, every non-failed probe in main.rs
pub fn write_json_report(path: &Path, results: &[&ProbeResult]) -> Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    Ok(())
}

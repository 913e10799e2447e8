// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate them into a ProbeConfig and load the wordlist
// 3. Run the probe engine, printing accepted results as they arrive
// 4. Exit with proper code (0 = full run, 1 = aborted, 2 = error)
//
// Results go to stdout, everything else (progress, warnings, logs) goes to
// stderr, so `path-scout ... > found.txt` captures only the findings.
//
// Rust concepts used:
// - async/await: Because we need to make many network requests concurrently
// - Result<T, E>: For error handling (T = success type, E = error type)
// - Arc: Sharing one RunContext between many tasks
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;        // src/cli.rs - command-line parsing
mod config;     // src/config.rs - validated run settings
mod error;      // src/error.rs - typed errors
mod output;     // src/output.rs - result lines and JSON report
mod probe;      // src/probe/ - the probing engine
mod wordlist;   // src/wordlist.rs - wordlist loading

use clap::Parser;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use anyhow::Result;
use cli::Cli;
use config::ProbeConfig;
use output::ConsoleSink;
use probe::{AbortReason, RunContext, RunOutcome};

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.debug);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // Configuration problems and unreadable files end up here,
            // before any request has been sent
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr; our crate at the requested level, dependencies kept quiet
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("path_scout={},reqwest=warn,hyper=warn", level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

// This is the main application logic
// Returns:
//   Ok(0) = every job was probed
//   Ok(1) = the run was aborted (too many errors or Ctrl-C)
//   Err = configuration or I/O error, nothing was probed
async fn run(cli: Cli) -> Result<i32> {
    let config = ProbeConfig::from_cli(cli)?;

    // Ctrl-C cancels the run exactly like a tripped circuit breaker does.
    // Installed before loading so an early Ctrl-C still ends with exit code 1.
    let shutdown = CancellationToken::new();
    let interrupt = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            interrupt.cancel();
        }
    });

    let paths = wordlist::read_wordlist(&config.wordlist).await?;

    eprintln!("🔍 Probing {}", config.origin);
    eprintln!(
        "📄 {} path(s) x {} method(s), {} thread(s), max {} consecutive error(s)",
        paths.len(),
        config.methods.len(),
        config.threads,
        config.max_errors
    );

    if shutdown.is_cancelled() {
        eprintln!("⛔ Interrupted before probing started");
        return Ok(1);
    }

    let client = probe::build_client(config.timeout)?;
    let ctx = Arc::new(RunContext::new(
        client,
        config.origin.clone(),
        config.threads,
        config.max_errors,
    ));

    let mut sink = ConsoleSink::new(std::io::stdout());
    let outcome = probe::run(
        ctx,
        probe::enumerate_jobs(&paths, &config.methods),
        &config.filter,
        &mut sink,
        &shutdown,
    )
    .await;

    let results = outcome.results();
    match &outcome {
        RunOutcome::Completed { .. } => {
            let shown = results
                .iter()
                .filter(|r| config.filter.accepts_result(r))
                .count();
            // The report holds every HTTP response, filters only affect stdout
            let answered: Vec<_> = results.iter().filter(|r| !r.failed).collect();
            let failed = results.len() - answered.len();

            eprintln!();
            eprintln!("📊 Summary:");
            eprintln!("   ✅ Shown: {}", shown);
            eprintln!("   ❌ Failed: {}", failed);
            eprintln!("   📋 Total: {}", results.len());

            if let Some(path) = &config.output {
                output::write_json_report(path, &answered)?;
                eprintln!("💾 Report written to {}", path.display());
            }
        }
        RunOutcome::Aborted { reason, .. } => {
            match reason {
                AbortReason::TooManyErrors { consecutive, max } => eprintln!(
                    "⛔ Too many consecutive errors ({} >= {}), aborting after {} probe(s)",
                    consecutive,
                    max,
                    results.len()
                ),
                AbortReason::Interrupted => {
                    eprintln!("⛔ Interrupted, aborting after {} probe(s)", results.len())
                }
            }
            // Partial runs are never written to --output
        }
    }

    Ok(outcome.exit_code())
}

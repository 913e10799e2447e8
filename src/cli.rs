// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the Cli struct below IS the interface, and clap
// generates the parsing, validation, --help and --version from it.
//
// Validation that clap does for us:
// - --url and --wordlist are required
// - --threads and --max_errors must be at least 1
// - --methods only accepts DELETE, GET, HEAD, OPTIONS, PATCH, POST, PUT, TRACE
// - status code lists must be numbers
//
// Anything clap rejects is a configuration error: we exit before sending a
// single request.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use crate::probe::HttpMethod;

#[derive(Parser, Debug)]
#[command(
    name = "path-scout",
    version,
    about = "Discover content on a web server by probing paths from a wordlist",
    long_about = "path-scout sends one request per (method, path) pair from a wordlist to a target \
                  origin, prints every response whose status passes the filters, and stops the \
                  whole run once too many requests in a row have failed."
)]
pub struct Cli {
    /// Target origin, e.g. https://example.com
    #[arg(short = 'u', long)]
    pub url: String,

    /// Path to a newline-delimited wordlist
    #[arg(short = 'w', long)]
    pub wordlist: PathBuf,

    /// Maximum number of requests in flight at once
    #[arg(
        short = 't',
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub threads: u32,

    /// Comma-separated HTTP methods to send for every path
    ///
    /// Example: --methods GET,POST,OPTIONS
    #[arg(
        short = 'm',
        long,
        value_enum,
        value_delimiter = ',',
        ignore_case = true,
        default_value = "GET"
    )]
    pub methods: Vec<HttpMethod>,

    /// Abort the run after this many consecutive failed requests
    #[arg(
        long = "max_errors",
        visible_alias = "max-errors",
        default_value_t = 30,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_errors: u32,

    /// Comma-separated status codes that are always shown
    #[arg(long = "filter_include", visible_alias = "filter-include", value_delimiter = ',')]
    pub filter_include: Vec<u16>,

    /// Comma-separated status codes that are hidden unless included
    #[arg(
        long = "filter_exclude",
        visible_alias = "filter-exclude",
        value_delimiter = ',',
        default_value = "404"
    )]
    pub filter_exclude: Vec<u16>,

    /// Write every HTTP response to this file as JSON at the end of a full run
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Log progress to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Log every failed request to stderr
    #[arg(long)]
    pub debug: bool,
}

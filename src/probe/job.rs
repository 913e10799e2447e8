// src/probe/job.rs
// =============================================================================
// This module turns a wordlist and a set of HTTP methods into probe jobs.
//
// How it works:
// - Every (path, method) combination becomes one Job
// - Paths are the outer loop, methods the inner loop, so for a wordlist
//   ["admin", "login"] and methods [GET, POST] we get:
//     GET admin, POST admin, GET login, POST login
// - Jobs are produced lazily by an iterator, nothing is allocated up front
//
// Rust concepts:
// - Iterators: flat_map builds the Cartesian product without a Vec
// - Enums: HttpMethod is the allow-list, an invalid method cannot exist
// - Derive macros: clap::ValueEnum lets clap validate --methods for us
// =============================================================================

use clap::ValueEnum;
use serde::Serialize;
use std::fmt;

// The HTTP methods we are allowed to send
//
// Anything outside this list is rejected by clap while parsing --methods,
// so a bad method is a configuration error and never reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[value(name = "DELETE")]
    Delete,
    #[value(name = "GET")]
    Get,
    #[value(name = "HEAD")]
    Head,
    #[value(name = "OPTIONS")]
    Options,
    #[value(name = "PATCH")]
    Patch,
    #[value(name = "POST")]
    Post,
    #[value(name = "PUT")]
    Put,
    #[value(name = "TRACE")]
    Trace,
}

impl HttpMethod {
    /// The method name as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Trace => reqwest::Method::TRACE,
        }
    }
}

// One unit of work: send `method` to `<origin>/<path>`
//
// Jobs are never mutated after creation and each one is consumed by exactly
// one probe task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub method: HttpMethod,
    pub path: String,
}

// Enumerates every (method, path) pair, methods varying fastest
//
// Parameters:
//   paths: wordlist entries, already trimmed
//   methods: the validated method set
//
// Returns: a lazy iterator. Call the function again to restart it.
// An empty wordlist (or method set) yields nothing, which is an empty run.
pub fn enumerate_jobs<'a>(
    paths: &'a [String],
    methods: &'a [HttpMethod],
) -> impl Iterator<Item = Job> + 'a {
    paths.iter().flat_map(move |path| {
        methods.iter().map(move |&method| Job {
            method,
            path: path.clone(),
        })
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `impl Iterator<Item = Job> + 'a`?
//    - The iterator borrows `paths` and `methods`, so it cannot outlive them
//    - The 'a lifetime says exactly that
//    - Callers don't need to know the concrete (very long) iterator type
//
// 2. What does `move |&method|` do?
//    - `move` copies `path` (a reference) into the inner closure
//    - `|&method|` destructures the &HttpMethod, which works because
//      HttpMethod is Copy
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_enumerates_every_pair_once() {
        let paths = words(&["admin", "login", "xyz123"]);
        let methods = [HttpMethod::Get, HttpMethod::Post];

        let jobs: Vec<Job> = enumerate_jobs(&paths, &methods).collect();
        assert_eq!(jobs.len(), paths.len() * methods.len());

        for path in &paths {
            for method in &methods {
                let count = jobs
                    .iter()
                    .filter(|j| &j.path == path && j.method == *method)
                    .count();
                assert_eq!(count, 1, "{} {} should appear once", method, path);
            }
        }
    }

    #[test]
    fn test_method_varies_fastest() {
        let paths = words(&["a", "b"]);
        let methods = [HttpMethod::Get, HttpMethod::Head];

        let order: Vec<(HttpMethod, String)> = enumerate_jobs(&paths, &methods)
            .map(|j| (j.method, j.path))
            .collect();

        assert_eq!(
            order,
            vec![
                (HttpMethod::Get, "a".to_string()),
                (HttpMethod::Head, "a".to_string()),
                (HttpMethod::Get, "b".to_string()),
                (HttpMethod::Head, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_wordlist_is_empty_run() {
        let paths: Vec<String> = Vec::new();
        assert_eq!(enumerate_jobs(&paths, &[HttpMethod::Get]).count(), 0);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let paths = words(&["admin", "admin"]);
        assert_eq!(enumerate_jobs(&paths, &[HttpMethod::Get]).count(), 2);
    }

    #[test]
    fn test_method_conversion() {
        assert_eq!(reqwest::Method::from(HttpMethod::Trace), reqwest::Method::TRACE);
        assert_eq!(HttpMethod::Options.to_string(), "OPTIONS");
    }
}

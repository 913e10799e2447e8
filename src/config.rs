// src/config.rs
// =============================================================================
// Turns parsed CLI flags into a validated run configuration.
//
// clap already checked the shape of every flag. This is where we check the
// things clap can't: that --url is a real absolute http(s) URL, and that the
// numeric limits make sense even when a ProbeConfig is built by hand.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::probe::{FilterRule, HttpMethod};

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Kept exactly as typed, paths are appended with a single '/'
    pub origin: String,
    pub wordlist: PathBuf,
    pub threads: usize,
    pub methods: Vec<HttpMethod>,
    pub max_errors: usize,
    pub filter: FilterRule,
    pub output: Option<PathBuf>,
    pub timeout: Duration,
}

impl ProbeConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let config = Self {
            origin: cli.url,
            wordlist: cli.wordlist,
            threads: cli.threads as usize,
            methods: cli.methods,
            max_errors: cli.max_errors as usize,
            filter: FilterRule::new(cli.filter_include, cli.filter_exclude),
            output: cli.output,
            timeout: Duration::from_secs(cli.timeout),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let parsed = Url::parse(&self.origin).map_err(|source| ConfigError::InvalidUrl {
            url: self.origin.clone(),
            source,
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        if self.threads == 0 {
            return Err(ConfigError::ZeroThreads);
        }
        if self.max_errors == 0 {
            return Err(ConfigError::ZeroMaxErrors);
        }
        Ok(())
    }
}

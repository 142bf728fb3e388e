use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_COUNT: u32 = 30;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(200);
pub const DEFAULT_MAX_WORKERS: usize = 8;

/// Slack added on top of the per-packet budget before a probe is killed.
pub const PROCESS_OVERHEAD: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub region: String,
    pub subregion: String,
    pub label: String,
    pub host: String,
}

impl Target {
    pub fn new(
        region: impl Into<String>,
        subregion: impl Into<String>,
        label: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            subregion: subregion.into(),
            label: label.into(),
            host: host.into(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} / {} -> {}",
            self.region, self.subregion, self.label, self.host
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeConfig {
    pub count: u32,
    pub timeout: Duration,
    pub interval: Duration,
    pub max_workers: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            timeout: DEFAULT_TIMEOUT,
            interval: DEFAULT_INTERVAL,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::InvalidCount { value: self.count });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        if self.max_workers == 0 {
            return Err(ConfigError::InvalidWorkers {
                value: self.max_workers,
            });
        }
        Ok(())
    }

    pub fn effective_workers(&self, target_count: usize) -> usize {
        self.max_workers.min(target_count)
    }

    /// Upper bound on how long a single probe process may run.
    pub fn wall_clock_limit(&self) -> Duration {
        let per_packet = self.timeout.saturating_add(self.interval);
        per_packet
            .saturating_mul(self.count)
            .saturating_add(PROCESS_OVERHEAD)
    }
}

/// Problems that abort a whole run before (or instead of) producing results.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ping executable `{program}` was not found; install ping and make sure it is on PATH")]
    ExecutableNotFound { program: PathBuf },
    #[error("target catalog is empty")]
    EmptyCatalog,
    #[error("target catalog lists host `{host}` more than once")]
    DuplicateHost { host: String },
    #[error("target `{label}` has an invalid host `{host}`")]
    InvalidHost { label: String, host: String },
    #[error("probe count must be greater than zero (got {value})")]
    InvalidCount { value: u32 },
    #[error("probe timeout must be greater than zero")]
    InvalidTimeout,
    #[error("worker count must be greater than zero (got {value})")]
    InvalidWorkers { value: usize },
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

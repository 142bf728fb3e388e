mod command;
mod helpers;
mod process;

pub use command::{Platform, build_args};

use crate::config::{ConfigError, ProbeConfig, Target};
use crate::probe::{ProbeError, ProbeErrorKind, RawProbeResult};
use process::run_with_deadline;
use std::io;
use std::path::{Path, PathBuf};

pub const PING_PROGRAM: &str = "ping";

/// Runs one probe against one target.
///
/// Per-target trouble (timeouts, non-zero exits, unreachable hosts) is
/// reported inside [`RawProbeResult::process_error`]. `Err` is reserved for
/// conditions that make the whole run pointless, such as a missing
/// executable.
pub trait ProbeRunner: Send + Sync {
    fn run(&self, target: &Target, config: &ProbeConfig) -> Result<RawProbeResult, ConfigError>;
}

/// [`ProbeRunner`] backed by the operating system's `ping`.
#[derive(Clone, Debug)]
pub struct SystemPing {
    program: PathBuf,
    platform: Platform,
}

impl SystemPing {
    pub fn locate() -> Result<Self, ConfigError> {
        let program = which::which(PING_PROGRAM).map_err(|err| {
            tracing::debug!(%err, "ping lookup failed");
            ConfigError::ExecutableNotFound {
                program: PathBuf::from(PING_PROGRAM),
            }
        })?;
        Ok(Self::with_program(program, Platform::current()))
    }

    pub fn with_program(program: impl Into<PathBuf>, platform: Platform) -> Self {
        Self {
            program: program.into(),
            platform,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl ProbeRunner for SystemPing {
    fn run(&self, target: &Target, config: &ProbeConfig) -> Result<RawProbeResult, ConfigError> {
        let args = build_args(self.platform, &target.host, config);
        let limit = config.wall_clock_limit();
        tracing::debug!(program = %self.program.display(), ?args, ?limit, "spawning probe");

        let output = match run_with_deadline(&self.program, &args, limit) {
            Ok(output) => output,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ConfigError::ExecutableNotFound {
                    program: self.program.clone(),
                });
            }
            Err(err) => {
                return Ok(RawProbeResult {
                    target: target.clone(),
                    raw_text: String::new(),
                    process_error: Some(ProbeError::new(
                        ProbeErrorKind::Io,
                        format!("failed to run {}: {err}", self.program.display()),
                    )),
                });
            }
        };

        let process_error = if output.timed_out {
            Some(ProbeError::new(
                ProbeErrorKind::Timeout,
                format!("probe exceeded {limit:?} and was killed"),
            ))
        } else {
            match output.status {
                Some(status) if status.success() => None,
                Some(status) => Some(ProbeError::new(
                    ProbeErrorKind::NonZeroExit,
                    status.to_string(),
                )),
                None => Some(ProbeError::new(
                    ProbeErrorKind::Io,
                    "exit status unavailable",
                )),
            }
        };

        Ok(RawProbeResult {
            target: target.clone(),
            raw_text: output.text,
            process_error,
        })
    }
}

use crate::config::{DEFAULT_COUNT, DEFAULT_MAX_WORKERS, ProbeConfig};
use crate::data_model::settings::AppSettings;
use crate::report::ReportFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "pingrank")]
#[command(about = "Ping a catalog of endpoints concurrently and rank them by latency", long_about = None)]
pub struct CliArgs {
    /// Echo requests sent to each host
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    count: u32,

    /// Per-reply timeout, e.g. 2s or 500ms
    #[arg(short, long, default_value = "2s")]
    timeout: String,

    /// Delay between echo requests, e.g. 200ms or 0.2s (ignored on Windows)
    #[arg(short, long, default_value = "200ms")]
    interval: String,

    /// Maximum number of hosts probed at once
    #[arg(short, long, default_value_t = DEFAULT_MAX_WORKERS)]
    workers: usize,

    /// JSON file with the target catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Report format: text|json
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("probe count must be greater than zero (got {value})")]
    InvalidCount { value: u32 },
    #[error("worker count must be greater than zero (got {value})")]
    InvalidWorkers { value: usize },
    #[error("invalid {field} duration `{value}` (expected e.g. 2s, 500ms or 0.2)")]
    InvalidDuration { field: &'static str, value: String },
    #[error("timeout must be greater than zero")]
    ZeroTimeout,
    #[error("unknown report format `{value}` (expected text or json)")]
    InvalidFormat { value: String },
}

pub fn load_from_cli() -> Result<AppSettings, SettingsError> {
    let args = CliArgs::parse();
    from_args(args)
}

pub fn from_args(args: CliArgs) -> Result<AppSettings, SettingsError> {
    if args.count == 0 {
        return Err(SettingsError::InvalidCount { value: args.count });
    }
    if args.workers == 0 {
        return Err(SettingsError::InvalidWorkers {
            value: args.workers,
        });
    }

    let timeout = parse_duration(&args.timeout).ok_or_else(|| SettingsError::InvalidDuration {
        field: "timeout",
        value: args.timeout.clone(),
    })?;
    if timeout.is_zero() {
        return Err(SettingsError::ZeroTimeout);
    }
    let interval =
        parse_duration(&args.interval).ok_or_else(|| SettingsError::InvalidDuration {
            field: "interval",
            value: args.interval.clone(),
        })?;

    let format = ReportFormat::parse_cli(&args.format).ok_or_else(|| {
        SettingsError::InvalidFormat {
            value: args.format.clone(),
        }
    })?;

    Ok(AppSettings {
        probe: ProbeConfig {
            count: args.count,
            timeout,
            interval,
            max_workers: args.workers,
        },
        catalog_path: args.catalog,
        format,
    })
}

/// Accepts `500ms`, `2s`, `0.2s` and bare (possibly fractional) seconds.
fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if let Some(value) = input.strip_suffix("ms") {
        value.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(value) = input.strip_suffix('s') {
        parse_seconds(value.trim())
    } else {
        parse_seconds(input)
    }
}

fn parse_seconds(value: &str) -> Option<Duration> {
    let (whole, frac) = value.split_once('.').unwrap_or((value, ""));
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let is_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || !is_digits(frac) || frac.len() > 9 {
        return None;
    }
    let secs = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().ok()?
    };
    let nanos = if frac.is_empty() {
        0
    } else {
        format!("{frac:0<9}").parse::<u32>().ok()?
    };
    Some(Duration::new(secs, nanos))
}

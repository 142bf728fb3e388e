use crate::config::ProbeConfig;
use std::time::Duration;

/// Command-line dialect of the system `ping`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Platform {
    /// iputils, BSD and busybox: summary mode with count, timeout and interval.
    Posix,
    /// `ping.exe`: no interval flag, timeout in milliseconds.
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

pub fn build_args(platform: Platform, host: &str, config: &ProbeConfig) -> Vec<String> {
    match platform {
        Platform::Posix => vec![
            "-n".to_string(),
            "-q".to_string(),
            "-c".to_string(),
            config.count.to_string(),
            "-W".to_string(),
            whole_seconds(config.timeout).to_string(),
            "-i".to_string(),
            fractional_seconds(config.interval),
            host.to_string(),
        ],
        Platform::Windows => vec![
            "-n".to_string(),
            config.count.to_string(),
            "-w".to_string(),
            config.timeout.as_millis().max(1).to_string(),
            host.to_string(),
        ],
    }
}

// `-W` only takes whole seconds on iputils.
fn whole_seconds(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    let rounded = if duration.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    };
    rounded.max(1)
}

fn fractional_seconds(duration: Duration) -> String {
    let millis = duration.as_millis();
    let whole = millis / 1000;
    let frac = millis % 1000;
    if frac == 0 {
        whole.to_string()
    } else {
        format!("{whole}.{frac:03}")
            .trim_end_matches('0')
            .to_string()
    }
}

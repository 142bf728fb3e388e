use crate::config::{ConfigError, ProbeConfig, Target};
use crate::metrics::Metrics;
use crate::parser;
use crate::probe::{ProbeError, ProbeErrorKind, RawProbeResult};
use crate::probe_engine::ProbeRunner;
use crossbeam_channel::{Receiver, Sender};
use std::collections::{BTreeMap, HashSet};
use std::thread;

/// Parsed metrics for one host plus the raw diagnostic they came from.
#[derive(Clone, Debug)]
pub struct ProbeOutcome {
    pub metrics: Metrics,
    pub raw_text: String,
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    fn from_raw(raw: RawProbeResult) -> Self {
        let metrics = match &raw.process_error {
            Some(err) if discards_output(err.kind) => Metrics::absent(),
            _ => parser::parse(&raw.raw_text),
        };
        Self {
            metrics,
            raw_text: raw.raw_text,
            error: raw.process_error,
        }
    }
}

/// Results keyed by host, independent of completion order.
pub type RunResults = BTreeMap<String, ProbeOutcome>;

enum WorkerMessage {
    Done { host: String, outcome: ProbeOutcome },
    Fatal { host: String, error: ConfigError },
}

// A non-zero exit still carries a usable summary (ping exits 1 on loss).
fn discards_output(kind: ProbeErrorKind) -> bool {
    match kind {
        ProbeErrorKind::Timeout | ProbeErrorKind::Io => true,
        ProbeErrorKind::NonZeroExit => false,
    }
}

/// Probes every target with at most `min(max_workers, targets.len())`
/// probes in flight, blocking until all of them have finished.
pub fn run_all<R>(
    runner: &R,
    targets: &[Target],
    config: &ProbeConfig,
) -> Result<RunResults, ConfigError>
where
    R: ProbeRunner + ?Sized,
{
    config.validate()?;
    if targets.is_empty() {
        return Err(ConfigError::EmptyCatalog);
    }
    let mut hosts = HashSet::with_capacity(targets.len());
    for target in targets {
        if !hosts.insert(target.host.as_str()) {
            return Err(ConfigError::DuplicateHost {
                host: target.host.clone(),
            });
        }
    }

    let workers = config.effective_workers(targets.len());
    let (job_tx, job_rx) = crossbeam_channel::bounded(targets.len());
    for target in targets {
        // capacity equals the number of targets, so this never blocks
        let _ = job_tx.send(target);
    }
    drop(job_tx);

    tracing::info!(
        targets = targets.len(),
        workers,
        count = config.count,
        "starting probe run"
    );

    let (result_tx, result_rx) = crossbeam_channel::unbounded();
    thread::scope(|scope| {
        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || run_worker(runner, config, job_rx, result_tx));
        }
        drop(result_tx);
        collect(result_rx, targets.len())
    })
}

fn run_worker<R>(
    runner: &R,
    config: &ProbeConfig,
    jobs: Receiver<&Target>,
    results: Sender<WorkerMessage>,
) where
    R: ProbeRunner + ?Sized,
{
    for target in jobs.iter() {
        tracing::info!(endpoint = %target, "probing");
        let host = target.host.clone();
        let (message, fatal) = match runner.run(target, config) {
            Ok(raw) => (
                WorkerMessage::Done {
                    host,
                    outcome: ProbeOutcome::from_raw(raw),
                },
                false,
            ),
            Err(error) => (WorkerMessage::Fatal { host, error }, true),
        };
        // the collector hangs up after the first fatal error
        if results.send(message).is_err() || fatal {
            break;
        }
    }
}

/// Gathers worker messages until every worker is done. Returning on a fatal
/// error drops `results`, which stops the remaining workers at their next send.
fn collect(results: Receiver<WorkerMessage>, total: usize) -> Result<RunResults, ConfigError> {
    let mut collected = RunResults::new();

    for message in results.iter() {
        match message {
            WorkerMessage::Done { host, outcome } => {
                let completed = collected.len() + 1;
                match &outcome.error {
                    Some(err) if discards_output(err.kind) => {
                        tracing::warn!(%host, completed, total, error = %err, "probe failed");
                    }
                    _ => {
                        tracing::info!(
                            %host,
                            completed,
                            total,
                            avg_ms = ?outcome.metrics.avg_ms,
                            loss_percent = ?outcome.metrics.loss_percent,
                            "probe finished"
                        );
                    }
                }
                collected.insert(host, outcome);
            }
            WorkerMessage::Fatal { host, error } => {
                tracing::error!(%host, %error, "probe run aborted");
                return Err(error);
            }
        }
    }

    Ok(collected)
}

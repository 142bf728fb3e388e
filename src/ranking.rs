use crate::config::Target;
use crate::metrics::Metrics;
use crate::runtime::RunResults;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq)]
pub struct RankedRow {
    pub target: Target,
    pub metrics: Metrics,
    pub sort_key: f64,
}

/// Flattened row handed to report writers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub region: String,
    pub subregion: String,
    pub label: String,
    pub host: String,
    pub sent: Option<u32>,
    pub received: Option<u32>,
    pub loss_percent: Option<f64>,
    pub min_ms: Option<f64>,
    pub avg_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub jitter_ms: Option<f64>,
}

impl RankedRow {
    pub fn new(target: Target, metrics: Metrics) -> Self {
        Self {
            sort_key: metrics.sort_key(),
            target,
            metrics,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.sort_key.is_finite()
    }

    pub fn report_row(&self) -> ReportRow {
        ReportRow {
            region: self.target.region.clone(),
            subregion: self.target.subregion.clone(),
            label: self.target.label.clone(),
            host: self.target.host.clone(),
            sent: self.metrics.sent,
            received: self.metrics.received,
            loss_percent: self.metrics.loss_percent,
            min_ms: self.metrics.min_ms,
            avg_ms: self.metrics.avg_ms,
            max_ms: self.metrics.max_ms,
            jitter_ms: self.metrics.jitter_ms,
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        self.sort_key.total_cmp(&other.sort_key).then_with(|| {
            self.metrics
                .tie_break_loss()
                .total_cmp(&other.metrics.tie_break_loss())
        })
    }
}

/// Orders the catalog by latency: lowest usable average first, then by loss.
///
/// Emits exactly one row per catalog entry; hosts missing from `results`
/// rank as unusable. Equal keys keep catalog order.
pub fn rank(results: &BTreeMap<String, Metrics>, catalog: &[Target]) -> Vec<RankedRow> {
    let mut rows: Vec<RankedRow> = catalog
        .iter()
        .map(|target| {
            let metrics = results.get(&target.host).copied().unwrap_or_default();
            RankedRow::new(target.clone(), metrics)
        })
        .collect();
    rows.sort_by(RankedRow::compare);
    rows
}

/// Convenience over [`rank`] for the scheduler's output.
pub fn rank_outcomes(results: &RunResults, catalog: &[Target]) -> Vec<RankedRow> {
    let metrics: BTreeMap<String, Metrics> = results
        .iter()
        .map(|(host, outcome)| (host.clone(), outcome.metrics))
        .collect();
    rank(&metrics, catalog)
}

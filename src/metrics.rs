use serde::{Deserialize, Serialize};

/// Summary statistics scraped from one probe run.
///
/// Every field is optional: an absent value means the probe output did not
/// report it, which is distinct from a reported zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub sent: Option<u32>,
    pub received: Option<u32>,
    pub loss_percent: Option<f64>,
    pub min_ms: Option<f64>,
    pub avg_ms: Option<f64>,
    pub max_ms: Option<f64>,
    pub jitter_ms: Option<f64>,
}

impl Metrics {
    pub fn absent() -> Self {
        Self::default()
    }

    pub fn is_absent(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_total_loss(&self) -> bool {
        self.loss_percent.is_some_and(|loss| loss >= 100.0)
    }

    /// Ranking key: average RTT of a usable result, `+inf` otherwise.
    ///
    /// A result is usable only when loss was reported and is below 100%;
    /// unparseable output and total loss both rank as unusable.
    pub fn sort_key(&self) -> f64 {
        match (self.avg_ms, self.loss_percent) {
            (Some(avg), Some(_)) if !self.is_total_loss() => avg,
            _ => f64::INFINITY,
        }
    }

    /// Loss used to break sort-key ties; missing loss counts as total loss.
    pub fn tie_break_loss(&self) -> f64 {
        self.loss_percent.unwrap_or(100.0)
    }
}

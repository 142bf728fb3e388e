//! Probe output parsing.
//!
//! `parse` turns the combined output of one `ping` run into [`Metrics`].
//! Packet counters and RTT statistics are matched independently, each
//! against an ordered list of grammars where the first consistent match
//! wins. Supporting a new platform or locale means appending a grammar.

mod grammar;

use crate::metrics::Metrics;
use grammar::{PACKET_GRAMMARS, RTT_GRAMMARS};

/// Parses probe output. Never fails; unrecognized text yields absent fields.
pub fn parse(raw: &str) -> Metrics {
    let mut metrics = Metrics::absent();

    if let Some((name, stats)) = PACKET_GRAMMARS
        .iter()
        .find_map(|grammar| grammar.packet_stats(raw).map(|stats| (grammar.name, stats)))
    {
        tracing::trace!(grammar = name, "matched packet summary");
        metrics.sent = Some(stats.sent);
        metrics.received = Some(stats.received);
        metrics.loss_percent = Some(stats.loss_percent);
    }

    if let Some((name, stats)) = RTT_GRAMMARS
        .iter()
        .find_map(|grammar| grammar.rtt_stats(raw).map(|stats| (grammar.name, stats)))
    {
        tracing::trace!(grammar = name, "matched rtt summary");
        metrics.min_ms = Some(stats.min_ms);
        metrics.avg_ms = Some(stats.avg_ms);
        metrics.max_ms = Some(stats.max_ms);
        metrics.jitter_ms = stats.jitter_ms;
    }

    metrics
}

#[cfg(test)]
mod tests;

use crate::ranking::{RankedRow, ReportRow};
use chrono::{Local, NaiveDateTime};
use std::fmt::Write as _;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const TEXT_HEADER: &str = "ranked by average latency (ascending, ms); 100% loss last";
const NOT_AVAILABLE: &str = "NA";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

pub fn render(rows: &[RankedRow], format: ReportFormat) -> serde_json::Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(rows, Local::now().naive_local())),
        ReportFormat::Json => render_json(rows),
    }
}

/// A timestamp line, a legend, then one line per row: average, loss,
/// location path and host, tab separated.
///
/// The average is printed whenever the output reported one, even for a row
/// ranked last because of total loss.
pub fn render_text(rows: &[RankedRow], generated_at: NaiveDateTime) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "generated at: {}", generated_at.format(TIMESTAMP_FORMAT));
    let _ = writeln!(out, "{TEXT_HEADER}");
    for row in rows {
        let avg = row
            .metrics
            .avg_ms
            .filter(|avg| avg.is_finite())
            .map(|avg| format!("{avg:.3}"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let loss = row
            .metrics
            .loss_percent
            .map(|loss| format!("{loss:.1}%"))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let target = &row.target;
        let _ = writeln!(
            out,
            "{avg}\tloss:{loss}\t{} / {} / {}\t{}",
            target.region, target.subregion, target.label, target.host
        );
    }
    out
}

pub fn render_json(rows: &[RankedRow]) -> serde_json::Result<String> {
    let report: Vec<ReportRow> = rows.iter().map(RankedRow::report_row).collect();
    serde_json::to_string_pretty(&report)
}

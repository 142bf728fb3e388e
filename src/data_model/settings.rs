use crate::config::ProbeConfig;
use crate::report::ReportFormat;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub probe: ProbeConfig,
    pub catalog_path: Option<PathBuf>,
    pub format: ReportFormat,
}

// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
    pub chart: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Courtesy pause before the single request.
    pub delay: Duration,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: s!(CATALOG_URL),
            user_agent: s!(USER_AGENT),
            timeout: Duration::from_secs(TIMEOUT_SECS),
            delay: Duration::from_millis(REQUEST_PAUSE_MS),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_path: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_path: PathBuf::from(DEFAULT_CSV) }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartOptions {
    pub out_path: PathBuf,
    pub bins: usize,
    pub width: u32,
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_CHART),
            bins: HIST_BINS,
            width: CHART_W,
            height: CHART_H,
        }
    }
}

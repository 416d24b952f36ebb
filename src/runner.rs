// src/runner.rs
use std::{path::{Path, PathBuf}, thread};

use tracing::{error, info};

use crate::{
    analysis::{self, Analysis},
    config::options::{AppOptions, ChartOptions},
    core::net::Transport,
    error::RunError,
    progress::Progress,
    scrape, store,
};

/// What a full run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub scraped: usize,
    pub skipped: usize,
    pub csv_path: PathBuf,
    pub chart_path: PathBuf,
    pub analysis: Analysis,
}

/// Fetch → extract → save → analyze, each step gated on the previous one.
/// Zero books, a failed save or a failed analysis stop the run with a `RunError`.
pub fn run(
    opts: &AppOptions,
    transport: &dyn Transport,
    progress: &mut dyn Progress,
) -> Result<RunSummary, RunError> {
    let url = &opts.scrape.url;
    progress.log(&format!("Scraping books from {url}"));

    if !opts.scrape.delay.is_zero() {
        thread::sleep(opts.scrape.delay); // be polite
    }

    let extraction = scrape::fetch_books(transport, url, progress);
    if extraction.books.is_empty() {
        progress.log("No books scraped. Exiting.");
        return Err(RunError::NoRecords);
    }
    progress.log(&format!("Scraped {} books", extraction.books.len()));
    if !extraction.skipped.is_empty() {
        progress.log(&format!("Skipped {} books", extraction.skipped.len()));
    }

    let csv_path = match store::save_books(&extraction.books, &opts.export.out_path) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "saving book table failed");
            progress.log(&format!("Error saving to CSV: {e}"));
            return Err(RunError::Save(e));
        }
    };
    progress.log(&format!("Data saved to {}", csv_path.display()));

    let (analysis, chart_path) = analyze(&csv_path, &opts.chart, progress)?;

    Ok(RunSummary {
        scraped: extraction.books.len(),
        skipped: extraction.skipped.len(),
        csv_path,
        chart_path,
        analysis,
    })
}

/// Analyze an existing table and render its histogram. Prints the summary
/// only when the whole analysis succeeded.
pub fn analyze(
    csv_path: &Path,
    chart: &ChartOptions,
    progress: &mut dyn Progress,
) -> Result<(Analysis, PathBuf), RunError> {
    match analysis::analyze_file(csv_path, chart) {
        Ok((analysis, chart_path)) => {
            info!(path = %chart_path.display(), "analysis complete");
            progress.log(&analysis.report());
            progress.log(&format!("\nPrice distribution histogram saved as '{}'", chart_path.display()));
            Ok((analysis, chart_path))
        }
        Err(e) => {
            error!(error = %e, "analysis failed");
            progress.log(&format!("Error during analysis: {e}"));
            Err(RunError::Analysis(e))
        }
    }
}

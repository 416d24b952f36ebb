// src/cli.rs
use std::{path::PathBuf, time::Duration};

use clap::builder::RangedU64ValueParser;
use clap::Parser;

use crate::config::consts::*;
use crate::config::options::{AppOptions, ChartOptions, ExportOptions, ScrapeOptions};
use crate::core::net::HttpTransport;
use crate::progress::ConsoleProgress;
use crate::runner;

#[derive(Parser, Debug)]
#[command(name = "book_scrape", version, about = "Scrape a book catalog page, save it as CSV and plot prices")]
pub struct Args {
    /// Catalog page to scrape
    #[arg(long, default_value = CATALOG_URL)]
    pub url: String,

    /// CSV table to write (and read back for analysis)
    #[arg(short, long, default_value = DEFAULT_CSV)]
    pub out: PathBuf,

    /// Histogram image to write
    #[arg(long, default_value = DEFAULT_CHART)]
    pub chart: PathBuf,

    /// Number of histogram bins (1 to 1000)
    #[arg(long, default_value_t = HIST_BINS, value_parser = bins_in_range())]
    pub bins: usize,

    /// Request timeout in seconds
    #[arg(long, default_value_t = TIMEOUT_SECS)]
    pub timeout: u64,

    /// Pause before the request, in milliseconds
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub delay_ms: u64,

    /// Skip scraping; analyze the existing CSV at --out
    #[arg(long)]
    pub analyze_only: bool,
}

fn bins_in_range() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..=MAX_BINS as u64)
}

impl Args {
    pub fn to_options(&self) -> AppOptions {
        AppOptions {
            scrape: ScrapeOptions {
                url: self.url.clone(),
                timeout: Duration::from_secs(self.timeout),
                delay: Duration::from_millis(self.delay_ms),
                ..ScrapeOptions::default()
            },
            export: ExportOptions { out_path: self.out.clone() },
            chart: ChartOptions {
                out_path: self.chart.clone(),
                bins: self.bins,
                ..ChartOptions::default()
            },
        }
    }
}

pub fn run() -> color_eyre::Result<()> {
    let args = Args::parse();
    let opts = args.to_options();
    let mut console = ConsoleProgress;

    if args.analyze_only {
        runner::analyze(&opts.export.out_path, &opts.chart, &mut console)?;
        return Ok(());
    }

    let transport = HttpTransport::from_options(&opts.scrape)?;
    runner::run(&opts, &transport, &mut console)?;
    Ok(())
}

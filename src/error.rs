// src/error.rs
//! Error taxonomy, one enum per boundary.
//!
//! - `FetchError`: transport (client, network, non-2xx). Degrades to zero records.
//! - `SkipReason`: one listing could not be read. The listing is dropped, extraction goes on.
//! - `StoreError`: writing or reading the CSV table.
//! - `ChartError`: rendering the histogram.
//! - `AnalysisError`: anything that stops the summary from being computed.
//! - `RunError`: why the pipeline stopped early.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP error: {status} for {url}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("missing title")]
    MissingTitle,

    #[error("missing price")]
    MissingPrice,

    #[error("invalid price format: {0}")]
    InvalidPrice(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("could not move finished table into {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unexpected header in {}: {found:?}", .path.display())]
    BadHeader { path: PathBuf, found: Vec<String> },

    #[error("invalid row at line {line} in {}: {reason}", .path.display())]
    InvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no prices to plot")]
    Empty,

    #[error("bin count {bins} out of range 1..={max}")]
    Bins { bins: usize, max: usize },

    #[error("chart font could not be loaded")]
    Font,

    #[error("failed to draw chart: {0}")]
    Draw(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("no books to analyse")]
    Empty,

    #[error("price total overflowed")]
    Overflow,

    #[error("price {0} cannot be plotted")]
    Unplottable(rust_decimal::Decimal),

    #[error(transparent)]
    Load(#[from] StoreError),

    #[error(transparent)]
    Chart(#[from] ChartError),
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no books scraped")]
    NoRecords,

    #[error("saving books failed")]
    Save(#[source] StoreError),

    #[error("analysis failed")]
    Analysis(#[source] AnalysisError),
}

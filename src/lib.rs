// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod progress;
pub mod specs;

pub mod analysis;
pub mod chart;
pub mod runner;
pub mod scrape;
pub mod store;

pub use specs::books::{extract, extract_books, BookRecord, Extraction};

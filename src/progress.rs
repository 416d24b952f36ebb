// src/progress.rs
use crate::specs::books::Skipped;

/// Human-facing status lines for a run (scrape start, skips, counts, summary).
/// Frontends implement this; diagnostics for operators go through `tracing`.
pub trait Progress {
    /// Extraction found `total` listings on the page.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called once per listing that was dropped during extraction.
    fn item_skipped(&mut self, _skip: &Skipped) {}

    /// Every listing has been accounted for.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints every line to stdout.
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_skipped(&mut self, skip: &Skipped) {
        println!("{skip}");
    }
}

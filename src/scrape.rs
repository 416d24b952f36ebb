// src/scrape.rs
use tracing::{error, info, warn};

use crate::{
    core::net::Transport,
    progress::Progress,
    specs::books::{self, Extraction},
};

/// Fetch one catalog page and extract its listings.
///
/// Never fails: a transport error is logged and yields an empty `Extraction`,
/// so the caller only has to check for zero books.
pub fn fetch_books(
    transport: &dyn Transport,
    url: &str,
    progress: &mut dyn Progress,
) -> Extraction {
    let markup = match transport.get(url) {
        Ok(m) => m,
        Err(e) => {
            error!(%url, error = %e, "catalog fetch failed");
            progress.log(&format!("Error during scraping: {e}"));
            return Extraction::default();
        }
    };

    let extraction = books::extract(&markup);
    info!(
        listings = extraction.listings(),
        kept = extraction.books.len(),
        skipped = extraction.skipped.len(),
        "catalog page extracted"
    );

    progress.begin(extraction.listings());
    for skip in &extraction.skipped {
        warn!(index = skip.index, title = ?skip.title, reason = %skip.reason, "listing skipped");
        progress.item_skipped(skip);
    }
    progress.finish();

    extraction
}

// src/specs/mod.rs
//! # Scraping “specs” module
//!
//! Page-specific extraction: *where the data lives in the HTML* and *how to read
//! it tolerantly*. Specs are pure: markup in, typed records out.
//!
//! ## What lives here
//! - CSS selector choice for each field and the fallbacks between them.
//! - Field validation (price pattern, rating lexicon).
//! - Per-listing skip reporting, so callers can log what was dropped.
//!
//! ## What does **not** live here
//! - Networking (`core::net`), persistence (`store`), statistics (`analysis`).
//! - Console output. Skips are returned as values; `scrape` reports them.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::fetch_books → core::net::Transport::get
//!                             ↘ specs::books::extract → Extraction { books, skipped }
//! ```
//!
//! ## Testing notes
//! Specs are tested offline against inline HTML snippets shaped like the real page.
pub mod books;

// src/specs/books.rs
//! Scraping *spec* for the catalog page.
//!
//! One listing is one `<article class="product_pod">`. Inside it:
//! - **title**: `h3 > a[title]`, trimmed; falls back to the link text when the
//!   attribute is missing or blank.
//! - **price**: the first `\d+\.\d{2}` inside `p.price_color`.
//! - **rating**: the word class on `p.star-rating` (`One`..`Five`), `0` otherwise.
//!
//! A listing with no title or no price is skipped and reported; the remaining
//! listings are still read. A missing or unknown rating never skips.
//! Output order is document order.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::core::html::{attr_trimmed, first, text_of};
use crate::core::sanitize::price_digits;
use crate::error::SkipReason;

/// One parsed listing. Field order is the CSV column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    pub title: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub rating: u8,
}

impl BookRecord {
    pub fn new(title: impl Into<String>, price: Decimal, rating: u8) -> Self {
        Self { title: title.into(), price, rating }
    }
}

/// A listing that did not make it into the output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Skipped {
    /// Zero-based position among the listings on the page.
    pub index: usize,
    pub title: Option<String>,
    pub reason: SkipReason,
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(t) => write!(f, "Skipping book '{}' due to {}", t, self.reason),
            None => write!(f, "Skipping book #{} due to {}", self.index + 1, self.reason),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub books: Vec<BookRecord>,
    pub skipped: Vec<Skipped>,
}

impl Extraction {
    /// Number of listings seen, kept or not.
    pub fn listings(&self) -> usize {
        self.books.len() + self.skipped.len()
    }
}

/// Star rating lexicon. Case-sensitive, anything else is 0.
pub fn rating_from_word(word: &str) -> u8 {
    match word {
        "One" => 1,
        "Two" => 2,
        "Three" => 3,
        "Four" => 4,
        "Five" => 5,
        _ => 0,
    }
}

/// Strict price parse: pattern match first, then exact decimal (scale kept).
pub fn parse_price(text: &str) -> Option<Decimal> {
    Decimal::from_str(price_digits(text)?).ok()
}

pub struct Extractor {
    listing: Selector,
    title_link: Selector,
    price: Selector,
    rating: Selector,
}

impl Default for Extractor {
    fn default() -> Self { Self::new() }
}

impl Extractor {
    pub fn new() -> Self {
        // Constant selectors; parse cannot fail.
        Self {
            listing: Selector::parse("article.product_pod").unwrap(),
            title_link: Selector::parse("h3 a").unwrap(),
            price: Selector::parse("p.price_color").unwrap(),
            rating: Selector::parse("p.star-rating").unwrap(),
        }
    }

    pub fn extract(&self, markup: &str) -> Extraction {
        let doc = Html::parse_document(markup);
        let mut out = Extraction::default();

        for (index, pod) in doc.select(&self.listing).enumerate() {
            match self.extract_fragment(pod) {
                Ok(book) => out.books.push(book),
                Err(reason) => out.skipped.push(Skipped {
                    index,
                    title: self.title_of(pod),
                    reason,
                }),
            }
        }
        out
    }

    /// Read one listing. Pure: no logging, no partial records.
    pub fn extract_fragment(&self, pod: ElementRef<'_>) -> Result<BookRecord, SkipReason> {
        let title = self.title_of(pod).ok_or(SkipReason::MissingTitle)?;

        let price_el = first(pod, &self.price).ok_or(SkipReason::MissingPrice)?;
        let price_text = text_of(price_el);
        let price = parse_price(&price_text).ok_or(SkipReason::InvalidPrice(price_text))?;

        Ok(BookRecord { title, price, rating: self.rating_of(pod) })
    }

    fn title_of(&self, pod: ElementRef<'_>) -> Option<String> {
        let link = first(pod, &self.title_link)?;
        attr_trimmed(link, "title")
            .map(|t| s!(t))
            .or_else(|| Some(text_of(link)).filter(|t| !t.is_empty()))
    }

    fn rating_of(&self, pod: ElementRef<'_>) -> u8 {
        first(pod, &self.rating)
            .and_then(|p| p.value().classes().map(rating_from_word).find(|&r| r > 0))
            .unwrap_or(0)
    }
}

/// Extract every listing from a catalog page.
pub fn extract(markup: &str) -> Extraction {
    Extractor::new().extract(markup)
}

/// Same as [`extract`], dropping the skip report.
pub fn extract_books(markup: &str) -> Vec<BookRecord> {
    extract(markup).books
}

// src/analysis.rs
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::info;

use crate::chart;
use crate::config::consts::CURRENCY;
use crate::config::options::ChartOptions;
use crate::error::AnalysisError;
use crate::specs::books::BookRecord;
use crate::store;

/// Summary of one book table. Derived, never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub total: usize,
    pub average_price: Decimal,
    pub min_price: Decimal,
    pub max_price: Decimal,
    /// Only ratings that occur, ascending.
    pub rating_counts: BTreeMap<u8, usize>,
}

/// Mean price and per-rating counts. An empty slice is an error, not NaN.
pub fn summarize(books: &[BookRecord]) -> Result<Analysis, AnalysisError> {
    let first = books.first().ok_or(AnalysisError::Empty)?;

    let mut sum = Decimal::ZERO;
    let mut min_price = first.price;
    let mut max_price = first.price;
    let mut rating_counts = BTreeMap::new();

    for b in books {
        sum = sum.checked_add(b.price).ok_or(AnalysisError::Overflow)?;
        min_price = min_price.min(b.price);
        max_price = max_price.max(b.price);
        *rating_counts.entry(b.rating).or_insert(0) += 1;
    }

    let average_price = sum
        .checked_div(Decimal::from(books.len()))
        .ok_or(AnalysisError::Overflow)?;

    Ok(Analysis { total: books.len(), average_price, min_price, max_price, rating_counts })
}

impl Analysis {
    /// Console summary block.
    pub fn report(&self) -> String {
        let mut avg = self.average_price.round_dp(2);
        avg.rescale(2);

        let mut out = s!();
        let _ = writeln!(out, "\nAnalysis Results:");
        let _ = writeln!(out, "Books analysed: {}", self.total);
        let _ = writeln!(out, "Average Book Price: {CURRENCY}{avg}");
        let _ = writeln!(out, "\nRating Distribution:");
        for (rating, count) in &self.rating_counts {
            let _ = writeln!(out, "{rating} Star(s): {count} books");
        }
        out.trim_end().to_string()
    }
}

/// Load the table at `src`, summarize it and render the price histogram.
/// Returns the summary and the path of the written image.
pub fn analyze_file(src: &Path, chart_opts: &ChartOptions) -> Result<(Analysis, PathBuf), AnalysisError> {
    let books = store::load_books(src)?;
    let analysis = summarize(&books)?;
    info!(
        total = analysis.total,
        average = %analysis.average_price,
        "book table analysed"
    );

    let prices = plot_prices(&books)?;
    let image = chart::render_prices(&prices, chart_opts)?;
    Ok((analysis, image))
}

/// One `f64` per book, in order. Every book must make it onto the chart.
fn plot_prices(books: &[BookRecord]) -> Result<Vec<f64>, AnalysisError> {
    books
        .iter()
        .map(|b| b.price.to_f64().ok_or(AnalysisError::Unplottable(b.price)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(title: &str, cents: i64, rating: u8) -> BookRecord {
        BookRecord::new(title, Decimal::new(cents, 2), rating)
    }

    #[test]
    fn empty_is_an_error() {
        assert!(matches!(summarize(&[]), Err(AnalysisError::Empty)));
    }

    #[test]
    fn two_row_average_and_counts() {
        let a = summarize(&[book("X", 500, 1), book("Y", 1500, 5)]).unwrap();
        assert_eq!(a.average_price, Decimal::new(1000, 2));
        assert_eq!(a.rating_counts, BTreeMap::from([(1, 1), (5, 1)]));
        assert_eq!(a.min_price, Decimal::new(500, 2));
        assert_eq!(a.max_price, Decimal::new(1500, 2));
        assert_eq!(a.total, 2);
    }

    #[test]
    fn counts_cover_present_ratings_and_sum_to_total() {
        let books = [book("a", 100, 3), book("b", 200, 0), book("c", 300, 3), book("d", 400, 1)];
        let a = summarize(&books).unwrap();
        let keys: Vec<u8> = a.rating_counts.keys().copied().collect();
        assert_eq!(keys, [0, 1, 3]);
        assert_eq!(a.rating_counts.values().sum::<usize>(), books.len());
    }

    #[test]
    fn average_is_exact_not_float() {
        // 0.10 + 0.20 + 0.30 would drift in f64
        let a = summarize(&[book("a", 10, 1), book("b", 20, 1), book("c", 30, 1)]).unwrap();
        assert_eq!(a.average_price, Decimal::new(20, 2));
    }

    #[test]
    fn every_price_is_plotted() {
        let books = [book("a", 100, 3), book("b", 5177, 0), book("c", 0, 3)];
        assert_eq!(plot_prices(&books).unwrap(), vec![1.0, 51.77, 0.0]);
        let big = BookRecord::new("d", Decimal::MAX, 1);
        assert_eq!(plot_prices(&[big]).unwrap().len(), 1);
    }

    #[test]
    fn report_formats_two_decimals_and_breakdown() {
        let a = summarize(&[book("X", 500, 1), book("Y", 1500, 5), book("Z", 1001, 5)]).unwrap();
        let text = a.report();
        assert!(text.contains("Average Book Price: £10.00"), "{text}");
        assert!(text.contains("1 Star(s): 1 books"));
        assert!(text.contains("5 Star(s): 2 books"));
        let one = text.find("1 Star(s)").unwrap();
        let five = text.find("5 Star(s)").unwrap();
        assert!(one < five);
    }
}

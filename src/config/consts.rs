// src/config/consts.rs

// Net config
pub const CATALOG_URL: &str = "http://books.toscrape.com/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";
pub const TIMEOUT_SECS: u64 = 15;
pub const REQUEST_PAUSE_MS: u64 = 1000; // be polite

// Export
pub const DEFAULT_CSV: &str = "books.csv";
pub const CSV_HEADERS: [&str; 3] = ["title", "price", "rating"];

// Chart
pub const DEFAULT_CHART: &str = "price_distribution.png";
pub const HIST_BINS: usize = 10;
pub const MAX_BINS: usize = 1000;
pub const CHART_W: u32 = 1000; // 10 x 6 units at 100 px
pub const CHART_H: u32 = 600;
pub const CHART_TITLE: &str = "Distribution of Book Prices";
pub const X_LABEL: &str = "Price";
pub const Y_LABEL: &str = "Number of Books";

// Console
pub const CURRENCY: char = '£';

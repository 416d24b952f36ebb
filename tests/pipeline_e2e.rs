// tests/pipeline_e2e.rs
//
// Full runs against a stub transport: no network, real files in a temp dir.
//
use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::time::Duration;

use book_scrape::config::options::AppOptions;
use book_scrape::core::net::Transport;
use book_scrape::error::{FetchError, RunError, StoreError};
use book_scrape::progress::{NullProgress, Progress};
use book_scrape::runner;
use book_scrape::specs::books::Skipped;
use rust_decimal::Decimal;

const CATALOG: &str = include_str!("fixtures/catalog.html");

enum Reply {
    Page(&'static str),
    Status(u16),
}

struct StubTransport {
    reply: Reply,
    calls: Cell<usize>,
}

impl StubTransport {
    fn new(reply: Reply) -> Self { Self { reply, calls: Cell::new(0) } }
}

impl Transport for StubTransport {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        self.calls.set(self.calls.get() + 1);
        match self.reply {
            Reply::Page(body) => Ok(body.to_string()),
            Reply::Status(status) => Err(FetchError::Status { url: url.to_string(), status }),
        }
    }
}

#[derive(Default)]
struct Recorder {
    lines: Vec<String>,
    skipped: Vec<Skipped>,
    listings: Option<usize>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.listings = Some(total); }
    fn finish(&mut self) { self.finished = true; }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn item_skipped(&mut self, skip: &Skipped) { self.skipped.push(skip.clone()); }
}

impl Recorder {
    fn saw(&self, needle: &str) -> bool { self.lines.iter().any(|l| l.contains(needle)) }
}

fn options_in(dir: &Path) -> AppOptions {
    let mut opts = AppOptions::default();
    opts.scrape.url = "http://catalog.test/".into();
    opts.scrape.delay = Duration::ZERO;
    opts.export.out_path = dir.join("books.csv");
    opts.chart.out_path = dir.join("price_distribution.png");
    opts
}

#[test]
fn full_run_writes_table_summary_and_chart() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());
    let transport = StubTransport::new(Reply::Page(CATALOG));
    let mut progress = Recorder::default();

    let summary = runner::run(&opts, &transport, &mut progress).unwrap();

    assert_eq!(transport.calls.get(), 1);
    assert_eq!(summary.scraped, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(
        fs::read_to_string(&summary.csv_path).unwrap(),
        "title,price,rating\n\
         A Light in the Attic,51.77,3\n\
         Tipping the Velvet,53.74,1\n\
         \"Sharp Objects, Vol. 1\",47.82,0\n"
    );

    assert_eq!(summary.analysis.total, 3);
    assert_eq!(summary.analysis.rating_counts.keys().copied().collect::<Vec<_>>(), [0, 1, 3]);
    assert_eq!(image::image_dimensions(&summary.chart_path).unwrap(), (1000, 600));

    assert_eq!(progress.listings, Some(4));
    assert!(progress.finished);
    assert_eq!(progress.skipped.len(), 1);
    assert_eq!(progress.skipped[0].title.as_deref(), Some("Soumission"));
    assert!(progress.saw("Scraping books from http://catalog.test/"));
    assert!(progress.saw("Scraped 3 books"));
    assert!(progress.saw("Data saved to"));
    assert!(progress.saw("Average Book Price: £51.11"));
    assert!(progress.saw("0 Star(s): 1 books"));
    assert!(progress.saw("histogram saved as"));
}

#[test]
fn non_success_status_stops_before_saving() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());
    let transport = StubTransport::new(Reply::Status(503));
    let mut progress = Recorder::default();

    let err = runner::run(&opts, &transport, &mut progress).unwrap_err();

    assert!(matches!(err, RunError::NoRecords));
    assert!(!opts.export.out_path.exists());
    assert!(!opts.chart.out_path.exists());
    assert_eq!(progress.listings, None);
    assert!(progress.saw("503"));
    assert!(progress.saw("No books scraped"));
    assert!(!progress.saw("Analysis Results"));
}

#[test]
fn page_without_valid_listings_stops_before_saving() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());
    let page = r#"<article class="product_pod"><h3><a title="X">X</a></h3>
                  <p class="price_color">sold out</p></article>"#;
    let transport = StubTransport::new(Reply::Page(page));
    let mut progress = Recorder::default();

    let err = runner::run(&opts, &transport, &mut progress).unwrap_err();

    assert!(matches!(err, RunError::NoRecords));
    assert_eq!(progress.skipped.len(), 1);
    assert!(!opts.export.out_path.exists());
}

#[test]
fn failed_save_halts_before_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());
    fs::create_dir(&opts.export.out_path).unwrap();
    let transport = StubTransport::new(Reply::Page(CATALOG));
    let mut progress = Recorder::default();

    let err = runner::run(&opts, &transport, &mut progress).unwrap_err();

    assert!(matches!(err, RunError::Save(StoreError::Persist { .. })), "{err:?}");
    assert!(!opts.chart.out_path.exists());
    assert!(progress.saw("Error saving to CSV"));
    assert!(!progress.saw("Data saved to"));
}

#[test]
fn analyze_only_reads_existing_table() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());
    fs::write(&opts.export.out_path, "title,price,rating\nX,5.00,1\nY,15.00,5\n").unwrap();

    let (analysis, chart) = runner::analyze(&opts.export.out_path, &opts.chart, &mut NullProgress).unwrap();

    assert_eq!(analysis.average_price, Decimal::new(1000, 2));
    assert!(chart.is_file());
}

#[test]
fn analyze_of_header_only_table_is_an_error_without_summary() {
    let dir = tempfile::tempdir().unwrap();
    let opts = options_in(dir.path());
    fs::write(&opts.export.out_path, "title,price,rating\n").unwrap();
    let mut progress = Recorder::default();

    let err = runner::analyze(&opts.export.out_path, &opts.chart, &mut progress).unwrap_err();

    assert!(matches!(err, RunError::Analysis(_)));
    assert!(!progress.saw("Average Book Price"));
    assert!(progress.saw("Error during analysis"));
    assert!(!opts.chart.out_path.exists());
}

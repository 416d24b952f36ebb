// src/chart/mod.rs
//! Price histogram: binning plus a PNG rendering of it.
//!
//! Bins are equal-width over the observed `[min, max]`; the maximum value lands
//! in the last bin. With a single distinct value the range is widened by 0.5 on
//! each side so the bar still has a width.
//!
//! Drawing goes through `plotters` into an in-memory RGB buffer, which `image`
//! then encodes as PNG. Text uses the bundled DejaVu Sans.

use std::fmt::Display;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use image::{ImageFormat, RgbImage};
use plotters::prelude::*;
use plotters::style::register_font;
use tracing::debug;

use crate::config::consts::{CHART_TITLE, CURRENCY, MAX_BINS, X_LABEL, Y_LABEL};
use crate::config::options::ChartOptions;
use crate::error::ChartError;

static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const FONT: &str = "sans-serif";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const GRID: RGBColor = RGBColor(176, 176, 176);
const GRID_ALPHA: f64 = 0.3;

const TITLE_SIZE: u32 = 28;
const DESC_SIZE: u32 = 20;
const TICK_SIZE: u32 = 15;
const MAX_X_TICK_LABELS: usize = 10;
const Y_TICKS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub lo: f64,
    pub hi: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bins(&self) -> usize { self.counts.len() }
    pub fn bin_width(&self) -> f64 { (self.hi - self.lo) / self.bins() as f64 }
    pub fn total(&self) -> usize { self.counts.iter().sum() }
    pub fn max_count(&self) -> usize { self.counts.iter().copied().max().unwrap_or(0) }

    /// `bins + 1` bin boundaries, first is `lo`, last is `hi`.
    pub fn edges(&self) -> Vec<f64> {
        let w = self.bin_width();
        (0..=self.bins())
            .map(|i| if i == self.bins() { self.hi } else { self.lo + w * i as f64 })
            .collect()
    }
}

/// Bin `values` into `bins` equal-width buckets. Non-finite values are ignored;
/// `None` when nothing is left to bin. `bins` is clamped to `1..=MAX_BINS`.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    let bins = bins.clamp(1, MAX_BINS);
    let vals: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let mut lo = vals.iter().copied().reduce(f64::min)?;
    let mut hi = vals.iter().copied().reduce(f64::max)?;
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in vals {
        let i = (((v - lo) / width) as usize).min(bins - 1);
        counts[i] += 1;
    }
    Some(Histogram { lo, hi, counts })
}

/// Bin `prices` and write the chart to `opts.out_path`, replacing any old file.
pub fn render_prices(prices: &[f64], opts: &ChartOptions) -> Result<PathBuf, ChartError> {
    if !(1..=MAX_BINS).contains(&opts.bins) {
        return Err(ChartError::Bins { bins: opts.bins, max: MAX_BINS });
    }
    let hist = histogram(prices, opts.bins).ok_or(ChartError::Empty)?;
    render(&hist, opts)
}

pub fn render(hist: &Histogram, opts: &ChartOptions) -> Result<PathBuf, ChartError> {
    let img = paint(hist, opts.width, opts.height)?;

    let path = opts.out_path.clone();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| ChartError::Io { path: path.clone(), source })?;
        }
    }
    img.save_with_format(&path, ImageFormat::Png)
        .map_err(|source| ChartError::Image { path: path.clone(), source })?;

    debug!(path = %path.display(), bins = hist.bins(), "histogram written");
    Ok(path)
}

/// Round the y axis up to a whole number of evenly spaced integer ticks.
fn y_axis(max_count: usize) -> (usize, usize) {
    let step = max_count.div_ceil(Y_TICKS).max(1);
    let top = max_count.div_ceil(step).max(1) * step;
    (step, top)
}

fn ensure_font() -> Result<(), ChartError> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| register_font(FONT, FontStyle::Normal, FONT_DATA).is_ok());
    if ok { Ok(()) } else { Err(ChartError::Font) }
}

fn draw_err(e: impl Display) -> ChartError {
    ChartError::Draw(e.to_string())
}

fn paint(hist: &Histogram, width: u32, height: u32) -> Result<RgbImage, ChartError> {
    ensure_font()?;

    let edges = hist.edges();
    let (step, top) = y_axis(hist.max_count());
    let every = hist.bins().div_ceil(MAX_X_TICK_LABELS);
    let x_keys: Vec<f64> = edges.iter().copied().step_by(every).collect();
    let y_keys: Vec<usize> = (0..=top).step_by(step).collect();
    let price_label = |v: &f64| format!("{CURRENCY}{v:.2}");

    let mut buf = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CHART_TITLE, (FONT, TITLE_SIZE))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(
                (hist.lo..hist.hi).with_key_points(x_keys),
                (0..top).with_key_points(y_keys),
            )
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc(X_LABEL)
            .y_desc(Y_LABEL)
            .axis_desc_style((FONT, DESC_SIZE))
            .label_style((FONT, TICK_SIZE))
            .bold_line_style(GRID.mix(GRID_ALPHA))
            .light_line_style(TRANSPARENT)
            .x_label_formatter(&price_label)
            .draw()
            .map_err(draw_err)?;

        let bars = || {
            hist.counts
                .iter()
                .enumerate()
                .filter(|&(_, &n)| n > 0)
                .map(|(i, &n)| [(edges[i], 0), (edges[i + 1], n)])
        };
        chart
            .draw_series(bars().map(|corners| Rectangle::new(corners, SKY_BLUE.filled())))
            .map_err(draw_err)?;
        chart
            .draw_series(bars().map(|corners| Rectangle::new(corners, BLACK.stroke_width(1))))
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
    }

    RgbImage::from_raw(width, height, buf).ok_or_else(|| draw_err("bitmap size mismatch"))
}

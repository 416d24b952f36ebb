// src/store.rs
//! The book table on disk: `title,price,rating`, one row per book.
//!
//! Writes go to a temp file next to the destination and are moved into place
//! only once complete, so the destination is either the previous table or the
//! new one, never a partial write. Reads are strict: a row that breaks the
//! record invariants is an error, not something to skip.

use std::{
    fs::{self, File},
    io::{self, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::config::consts::CSV_HEADERS;
use crate::error::StoreError;
use crate::specs::books::BookRecord;

/* ---------------- Writing ---------------- */

/// Replace `dest` with a table holding `books` in order.
/// The header is always written, even for an empty slice.
pub fn save_books(books: &[BookRecord], dest: &Path) -> Result<PathBuf, StoreError> {
    let io_err = |source| StoreError::Io { path: dest.to_path_buf(), source };
    let csv_err = |source| StoreError::Csv { path: dest.to_path_buf(), source };

    let dir = parent_dir(dest);
    ensure_directory(&dir).map_err(io_err)?;

    let tmp = temp_table(&dir, dest).map_err(io_err)?;
    {
        let mut w = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(tmp.as_file());

        w.write_record(CSV_HEADERS).map_err(csv_err)?;
        for book in books {
            w.serialize(book).map_err(csv_err)?;
        }
        w.flush().map_err(io_err)?;
    }
    tmp.as_file().sync_all().map_err(io_err)?;

    tmp.persist(dest).map_err(|e| StoreError::Persist {
        path: dest.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %dest.display(), rows = books.len(), "book table written");
    Ok(dest.to_path_buf())
}

/// Temp file for a table about to land on `dest`. A new table gets the usual
/// `0o666 & !umask`; a rewrite keeps the mode of the file it replaces.
fn temp_table(dir: &Path, dest: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".books").suffix(".csv.tmp");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let tmp = builder.tempfile_in(dir)?;

    if let Ok(meta) = fs::metadata(dest) {
        if meta.is_file() {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
    }
    Ok(tmp)
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

/* ---------------- Reading ---------------- */

/// Load a table written by [`save_books`]. Any malformed row aborts the load.
pub fn load_books(src: &Path) -> Result<Vec<BookRecord>, StoreError> {
    let file = File::open(src).map_err(|source| StoreError::Io { path: src.to_path_buf(), source })?;
    let csv_err = |source| StoreError::Csv { path: src.to_path_buf(), source };

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file));

    let headers = rdr.headers().map_err(csv_err)?;
    if headers.iter().ne(CSV_HEADERS.iter().copied()) {
        return Err(StoreError::BadHeader {
            path: src.to_path_buf(),
            found: headers.iter().map(|h| s!(h)).collect(),
        });
    }

    let mut books = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let book = parse_row(&record).map_err(|reason| StoreError::InvalidRow {
            path: src.to_path_buf(),
            line,
            reason,
        })?;
        books.push(book);
    }
    Ok(books)
}

fn parse_row(record: &StringRecord) -> Result<BookRecord, String> {
    if record.len() != CSV_HEADERS.len() {
        return Err(format!("expected {} fields, found {}", CSV_HEADERS.len(), record.len()));
    }

    let title = &record[0];
    if title.trim().is_empty() {
        return Err(s!("empty title"));
    }

    let price_field = record[1].trim();
    let price = Decimal::from_str(price_field)
        .map_err(|_| format!("non-numeric price '{price_field}'"))?;
    if price.is_sign_negative() {
        return Err(format!("negative price '{price_field}'"));
    }

    let rating_field = record[2].trim();
    let rating: u8 = rating_field
        .parse()
        .map_err(|_| format!("rating '{rating_field}' is not an integer in 0..=5"))?;
    if rating > 5 {
        return Err(format!("rating {rating} out of range 0..=5"));
    }

    Ok(BookRecord::new(title, price, rating))
}

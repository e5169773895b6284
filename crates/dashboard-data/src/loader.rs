//! CSV file loading with per-path memoization.
//!
//! Reads a delimited file into a [`RawTable`] holding the headers exactly as
//! written plus every row as strings. A missing or unreadable file yields
//! `None` (the absence marker) so the dashboard can report "not found"
//! instead of halting. Successful parses are cached per path in a
//! [`LoadCache`], which callers own and inject; repeated loads of the same
//! path never touch the disk again for the lifetime of the cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

// ── RawTable ──────────────────────────────────────────────────────────────────

/// An unprocessed CSV table: headers as originally named, cells as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Path the table was read from.
    pub path: PathBuf,
    /// Header row, original casing preserved.
    pub headers: Vec<String>,
    /// Data rows; each padded or truncated to the header width.
    pub records: Vec<Vec<String>>,
}

impl RawTable {
    pub fn rows(&self) -> usize {
        self.records.len()
    }

    pub fn columns(&self) -> usize {
        self.headers.len()
    }
}

// ── LoadCache ─────────────────────────────────────────────────────────────────

/// Per-path parse cache, keyed by the path as given.
///
/// Holds every successful parse for the lifetime of the cache. There is no
/// invalidation; the dashboard treats its inputs as a static snapshot. The
/// cache is an owned value rather than a global so tests can inject a fresh
/// one.
#[derive(Debug, Default)]
pub struct LoadCache {
    entries: HashMap<PathBuf, Arc<RawTable>>,
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached parses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Load the CSV at `path`, returning the cached parse when one exists.
///
/// Returns `None` when the file is missing or unreadable; only the absence
/// is reported (via `warn!`), never an error. Rows whose cell count differs
/// from the header width are padded with empty cells or truncated rather
/// than rejected.
pub fn load_csv(path: &Path, cache: &mut LoadCache) -> Option<Arc<RawTable>> {
    if let Some(table) = cache.entries.get(path) {
        debug!("returning cached parse for {}", path.display());
        return Some(Arc::clone(table));
    }

    if !path.exists() {
        warn!("input file not found: {}", path.display());
        return None;
    }

    let mut reader = match csv::ReaderBuilder::new().flexible(true).from_path(path) {
        Ok(r) => r,
        Err(e) => {
            warn!("failed to open {}: {}", path.display(), e);
            return None;
        }
    };

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(|s| s.to_string()).collect(),
        Err(e) => {
            warn!("failed to read header row of {}: {}", path.display(), e);
            return None;
        }
    };

    let width = headers.len();
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                debug!("skipping unreadable row in {}: {}", path.display(), e);
                skipped += 1;
                continue;
            }
        };
        let mut cells: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        cells.resize(width, String::new());
        records.push(cells);
    }

    if skipped > 0 {
        warn!("{}: {} unreadable rows skipped", path.display(), skipped);
    }

    let table = Arc::new(RawTable {
        path: path.to_path_buf(),
        headers,
        records,
    });

    debug!(
        "parsed {}: {} rows, {} columns",
        path.display(),
        table.rows(),
        table.columns()
    );

    cache.entries.insert(path.to_path_buf(), Arc::clone(&table));
    Some(table)
}

/// List every `*.csv` file under `data_dir` (non-recursive paths included),
/// sorted by path. Used by the status panel to mention files the dashboard
/// is not configured to read.
pub fn discover_csv_files(data_dir: &Path) -> Vec<PathBuf> {
    if !data_dir.exists() {
        warn!("data directory does not exist: {}", data_dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_dir)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    // ── load_csv ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_csv_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "Facebook.csv",
            &["Date,Campaign,Spend", "2024-01-01,Spring,10.5"],
        );

        let mut cache = LoadCache::new();
        let table = load_csv(&path, &mut cache).unwrap();

        assert_eq!(table.headers, vec!["Date", "Campaign", "Spend"]);
        assert_eq!(table.rows(), 1);
        assert_eq!(table.columns(), 3);
        assert_eq!(table.records[0], vec!["2024-01-01", "Spring", "10.5"]);
    }

    #[test]
    fn test_load_csv_missing_file_returns_none() {
        let dir = TempDir::new().unwrap();
        let mut cache = LoadCache::new();
        let result = load_csv(&dir.path().join("Missing.csv"), &mut cache);
        assert!(result.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_load_csv_memoizes_per_path() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "Google.csv", &["date,spend", "2024-01-01,5"]);

        let mut cache = LoadCache::new();
        let first = load_csv(&path, &mut cache).unwrap();

        // Delete the file: a second load must come from the cache, proving
        // the disk is never re-read.
        std::fs::remove_file(&path).unwrap();
        let second = load_csv(&path, &mut cache).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_load_csv_absence_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Late.csv");

        let mut cache = LoadCache::new();
        assert!(load_csv(&path, &mut cache).is_none());

        // The file appears afterwards; the next load picks it up.
        write_csv(dir.path(), "Late.csv", &["date,orders", "2024-01-01,3"]);
        let table = load_csv(&path, &mut cache).unwrap();
        assert_eq!(table.rows(), 1);
    }

    #[test]
    fn test_load_csv_ragged_rows_padded_and_truncated() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "TikTok.csv",
            &[
                "date,campaign,spend",
                "2024-01-01,Spring",
                "2024-01-02,Brand,3.5,extra",
            ],
        );

        let mut cache = LoadCache::new();
        let table = load_csv(&path, &mut cache).unwrap();

        assert_eq!(table.rows(), 2);
        assert_eq!(table.records[0], vec!["2024-01-01", "Spring", ""]);
        assert_eq!(table.records[1], vec!["2024-01-02", "Brand", "3.5"]);
    }

    #[test]
    fn test_load_csv_empty_data_file() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "Empty.csv", &["date,spend"]);

        let mut cache = LoadCache::new();
        let table = load_csv(&path, &mut cache).unwrap();
        assert_eq!(table.rows(), 0);
        assert_eq!(table.columns(), 2);
    }

    // ── discover_csv_files ────────────────────────────────────────────────────

    #[test]
    fn test_discover_csv_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "b.csv", &["x"]);
        write_csv(dir.path(), "a.CSV", &["x"]);
        write_csv(dir.path(), "notes.txt", &["x"]);

        let files = discover_csv_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.CSV", "b.csv"]);
    }

    #[test]
    fn test_discover_csv_files_missing_dir() {
        let files = discover_csv_files(Path::new("/tmp/does-not-exist-dashboard-test"));
        assert!(files.is_empty());
    }
}

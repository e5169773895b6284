//! Process-lifetime data manager.
//!
//! Owns the per-path [`LoadCache`] and the built [`DashboardData`]. The
//! input files are treated as a static snapshot: the first [`get_data`] call
//! runs the load pipeline, every later call returns the same build, and
//! there is no invalidation; a file that changes on disk after startup is
//! intentionally not detected.
//!
//! [`get_data`]: DataManager::get_data

use std::path::PathBuf;

use dashboard_data::loader::LoadCache;
use dashboard_data::pipeline::{load_dashboard_data, DashboardData};

/// Snapshot-for-process-lifetime wrapper around the load pipeline.
pub struct DataManager {
    /// Directory the input CSVs live in.
    data_dir: PathBuf,
    /// Per-path parse cache, injected so tests control its lifetime.
    cache: LoadCache,
    /// The built data, populated on first access.
    data: Option<DashboardData>,
}

impl DataManager {
    /// Create a manager for `data_dir` with a fresh cache.
    pub fn new(data_dir: PathBuf) -> Self {
        Self::with_cache(data_dir, LoadCache::new())
    }

    /// Create a manager with an explicit cache (test seam).
    pub fn with_cache(data_dir: PathBuf, cache: LoadCache) -> Self {
        Self {
            data_dir,
            cache,
            data: None,
        }
    }

    /// Return the dashboard data, running the load pipeline on first call.
    pub fn get_data(&mut self) -> &DashboardData {
        let data_dir = &self.data_dir;
        let cache = &mut self.cache;
        self.data.get_or_insert_with(|| {
            tracing::debug!("first access; loading data from {}", data_dir.display());
            load_dashboard_data(data_dir, cache)
        })
    }

    /// Consume the manager, returning the built data (loading if needed).
    pub fn into_data(mut self) -> DashboardData {
        self.get_data();
        self.data.unwrap_or_default()
    }

    /// Directory the manager reads from.
    pub fn data_dir(&self) -> &std::path::Path {
        &self.data_dir
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &std::path::Path, name: &str, lines: &[&str]) {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    #[test]
    fn test_get_data_loads_once() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "Facebook.csv",
            &["Date,Spend", "2024-01-01,10.0"],
        );

        let mut manager = DataManager::new(dir.path().to_path_buf());
        let first_rows = manager.get_data().marketing.len();

        // Mutate the file after the first load: the static snapshot must not
        // pick the change up.
        write_csv(
            dir.path(),
            "Facebook.csv",
            &["Date,Spend", "2024-01-01,10.0", "2024-01-02,20.0"],
        );
        let second_rows = manager.get_data().marketing.len();

        assert_eq!(first_rows, 1);
        assert_eq!(second_rows, 1);
    }

    #[test]
    fn test_into_data_builds_when_unaccessed() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "Google.csv",
            &["Date,Spend", "2024-01-01,5.0"],
        );

        let manager = DataManager::new(dir.path().to_path_buf());
        let data = manager.into_data();
        assert_eq!(data.marketing.len(), 1);
    }

    #[test]
    fn test_empty_dir_yields_empty_data() {
        let dir = TempDir::new().unwrap();
        let mut manager = DataManager::new(dir.path().to_path_buf());
        let data = manager.get_data();
        assert!(data.marketing.is_empty());
        assert!(data.business_missing());
    }
}

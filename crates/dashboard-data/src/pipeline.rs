//! Top-level ingestion pipeline.
//!
//! Loads the fixed set of input files from the data directory, normalizes
//! and unions the marketing tables, and returns a [`DashboardData`] carrying
//! everything the runtime needs: the combined marketing table, the optional
//! business table, and a per-file status list for the data-status panel.

use std::path::Path;

use chrono::NaiveDate;
use tracing::{debug, warn};

use dashboard_core::filters::ALL_CAMPAIGNS;
use dashboard_core::models::{BusinessTable, FileStatus, MarketingTable, SourceStatus};

use crate::combine::combine_marketing;
use crate::loader::{discover_csv_files, load_csv, LoadCache};
use crate::normalize::{source_from_path, to_business, to_marketing};

/// Marketing platform exports expected in the data directory.
pub const MARKETING_FILES: &[&str] = &["Facebook.csv", "Google.csv", "TikTok.csv"];

/// Business outcome export expected in the data directory.
pub const BUSINESS_FILE: &str = "Business.csv";

// ── DashboardData ─────────────────────────────────────────────────────────────

/// Everything one load pass produces.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    /// All marketing platforms unioned into one table.
    pub marketing: MarketingTable,
    /// The business table, or `None` when `Business.csv` is absent.
    pub business: Option<BusinessTable>,
    /// Per-file load status, in the order of [`MARKETING_FILES`] then
    /// [`BUSINESS_FILE`].
    pub statuses: Vec<SourceStatus>,
    /// CSV files present in the data directory that the dashboard is not
    /// configured to read. Informational only.
    pub extra_files: Vec<String>,
}

impl DashboardData {
    /// Full observed date span: marketing dates when any exist, otherwise
    /// business dates, otherwise `None`.
    pub fn observed_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.marketing
            .date_span()
            .or_else(|| self.business.as_ref().and_then(|b| b.date_span()))
    }

    /// Distinct platform identifiers, first-seen order.
    pub fn source_options(&self) -> Vec<String> {
        self.marketing.sources()
    }

    /// Campaign picker options: the `"All"` sentinel followed by the
    /// distinct campaign names.
    pub fn campaign_options(&self) -> Vec<String> {
        let mut options = vec![ALL_CAMPAIGNS.to_string()];
        options.extend(self.marketing.campaigns());
        options
    }

    /// `true` when `Business.csv` was not found, the blocking condition for
    /// business KPIs.
    pub fn business_missing(&self) -> bool {
        self.business.is_none()
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// Run the full load pass over `data_dir`.
///
/// Never fails: a missing file becomes a `NotFound` status, a malformed row
/// becomes nulls. The `cache` memoizes parses per path across calls.
pub fn load_dashboard_data(data_dir: &Path, cache: &mut LoadCache) -> DashboardData {
    let mut statuses: Vec<SourceStatus> = Vec::new();
    let mut platform_tables: Vec<MarketingTable> = Vec::new();

    for file in MARKETING_FILES {
        let path = data_dir.join(file);
        match load_csv(&path, cache) {
            Some(raw) => {
                statuses.push(SourceStatus {
                    file: (*file).to_string(),
                    status: FileStatus::Loaded {
                        rows: raw.rows(),
                        columns: raw.columns(),
                    },
                });
                let source = source_from_path(&path);
                platform_tables.push(to_marketing(&raw, &source));
            }
            None => {
                statuses.push(SourceStatus {
                    file: (*file).to_string(),
                    status: FileStatus::NotFound,
                });
            }
        }
    }

    let business_path = data_dir.join(BUSINESS_FILE);
    let business = match load_csv(&business_path, cache) {
        Some(raw) => {
            statuses.push(SourceStatus {
                file: BUSINESS_FILE.to_string(),
                status: FileStatus::Loaded {
                    rows: raw.rows(),
                    columns: raw.columns(),
                },
            });
            Some(to_business(&raw))
        }
        None => {
            warn!("{} not found; business KPIs will be unavailable", BUSINESS_FILE);
            statuses.push(SourceStatus {
                file: BUSINESS_FILE.to_string(),
                status: FileStatus::NotFound,
            });
            None
        }
    };

    let marketing = combine_marketing(&platform_tables);

    let expected: Vec<&str> = MARKETING_FILES.iter().copied().chain([BUSINESS_FILE]).collect();
    let extra_files: Vec<String> = discover_csv_files(data_dir)
        .into_iter()
        .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|name| !expected.contains(&name.as_str()))
        .collect();

    debug!(
        "load pass complete: {} marketing rows from {} platforms, business {}",
        marketing.len(),
        platform_tables.len(),
        if business.is_some() { "loaded" } else { "missing" },
    );

    DashboardData {
        marketing,
        business,
        statuses,
        extra_files,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
    }

    fn full_fixture(dir: &Path) {
        write_csv(
            dir,
            "Facebook.csv",
            &[
                "Date,Campaign,Impressions,Clicks,Spend,Attributed_Revenue",
                "2024-01-01,Spring,1000,50,100.0,300.0",
                "2024-01-02,Spring,1200,60,110.0,280.0",
            ],
        );
        write_csv(
            dir,
            "Google.csv",
            &[
                "Date,Campaign,Impressions,Clicks,Spend,Attributed_Revenue",
                "2024-01-01,Brand,800,40,50.0,100.0",
            ],
        );
        write_csv(
            dir,
            "TikTok.csv",
            &[
                "Date,Campaign,Spend",
                "2024-01-03,Viral,25.0",
            ],
        );
        write_csv(
            dir,
            "Business.csv",
            &[
                "Date,Orders,Total_Revenue,Gross_Profit",
                "2024-01-01,20,900.0,400.0",
                "2024-01-02,15,700.0,310.0",
            ],
        );
    }

    // ── load_dashboard_data ───────────────────────────────────────────────────

    #[test]
    fn test_full_load() {
        let dir = TempDir::new().unwrap();
        full_fixture(dir.path());

        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        assert_eq!(data.marketing.len(), 4);
        assert_eq!(data.source_options(), vec!["Facebook", "Google", "TikTok"]);
        assert!(!data.business_missing());
        assert_eq!(data.business.as_ref().unwrap().len(), 2);
        assert_eq!(data.statuses.len(), 4);
        assert!(data.statuses.iter().all(|s| s.is_loaded()));
        assert!(data.extra_files.is_empty());
    }

    #[test]
    fn test_union_column_set_spans_platforms() {
        let dir = TempDir::new().unwrap();
        full_fixture(dir.path());

        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        // TikTok has no clicks column, Facebook/Google do: the union has it,
        // and TikTok's rows carry nulls.
        assert!(data.marketing.columns.clicks);
        let tiktok_rows: Vec<_> = data
            .marketing
            .rows
            .iter()
            .filter(|r| r.source == "TikTok")
            .collect();
        assert_eq!(tiktok_rows.len(), 1);
        assert_eq!(tiktok_rows[0].clicks, None);
    }

    #[test]
    fn test_missing_business_file() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "Facebook.csv",
            &["Date,Spend", "2024-01-01,10.0"],
        );

        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        assert!(data.business_missing());
        let business_status = data
            .statuses
            .iter()
            .find(|s| s.file == BUSINESS_FILE)
            .unwrap();
        assert_eq!(business_status.status, FileStatus::NotFound);
        // Marketing still loaded.
        assert_eq!(data.marketing.len(), 1);
    }

    #[test]
    fn test_empty_directory_degrades_to_empty_data() {
        let dir = TempDir::new().unwrap();
        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        assert!(data.marketing.is_empty());
        assert!(data.business_missing());
        assert_eq!(data.statuses.len(), 4);
        assert!(data.statuses.iter().all(|s| !s.is_loaded()));
        assert!(data.observed_span().is_none());
        assert_eq!(data.campaign_options(), vec!["All"]);
    }

    #[test]
    fn test_observed_span_prefers_marketing() {
        let dir = TempDir::new().unwrap();
        full_fixture(dir.path());

        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        let (lo, hi) = data.observed_span().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn test_observed_span_falls_back_to_business() {
        let dir = TempDir::new().unwrap();
        write_csv(
            dir.path(),
            "Business.csv",
            &["Date,Orders", "2024-02-01,5", "2024-02-10,7"],
        );

        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        let (lo, hi) = data.observed_span().unwrap();
        assert_eq!(lo, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(hi, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
    }

    #[test]
    fn test_campaign_options_start_with_all() {
        let dir = TempDir::new().unwrap();
        full_fixture(dir.path());

        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        assert_eq!(
            data.campaign_options(),
            vec!["All", "Spring", "Brand", "Viral"]
        );
    }

    #[test]
    fn test_extra_files_reported() {
        let dir = TempDir::new().unwrap();
        full_fixture(dir.path());
        write_csv(dir.path(), "Pinterest.csv", &["date,spend", "2024-01-01,1"]);

        let mut cache = LoadCache::new();
        let data = load_dashboard_data(dir.path(), &mut cache);

        assert_eq!(data.extra_files, vec!["Pinterest.csv"]);
    }

    #[test]
    fn test_second_load_served_from_cache() {
        let dir = TempDir::new().unwrap();
        full_fixture(dir.path());

        let mut cache = LoadCache::new();
        let first = load_dashboard_data(dir.path(), &mut cache);

        // Remove a source file; the cached parse must still be used.
        std::fs::remove_file(dir.path().join("Facebook.csv")).unwrap();
        let second = load_dashboard_data(dir.path(), &mut cache);

        assert_eq!(first.marketing.rows, second.marketing.rows);
        let fb = second
            .statuses
            .iter()
            .find(|s| s.file == "Facebook.csv")
            .unwrap();
        assert!(fb.is_loaded());
    }
}

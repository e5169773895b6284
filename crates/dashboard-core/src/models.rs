use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One marketing row at platform-campaign-day granularity.
///
/// Every attribute except `source` is optional: a `None` means the value was
/// either absent from the originating file or failed to parse. `source` is
/// attached exactly once at ingestion (the file stem of the originating CSV)
/// and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingRecord {
    /// Calendar day of the row; `None` when the date string did not parse.
    pub date: Option<NaiveDate>,
    /// Platform identifier, e.g. `"Facebook"`.
    pub source: String,
    /// Campaign name.
    #[serde(default)]
    pub campaign: Option<String>,
    /// Ad-set name within the campaign.
    #[serde(default)]
    pub adset: Option<String>,
    /// Ad impressions served.
    #[serde(default)]
    pub impressions: Option<u64>,
    /// Ad clicks received.
    #[serde(default)]
    pub clicks: Option<u64>,
    /// Money spent, in account currency.
    #[serde(default)]
    pub spend: Option<f64>,
    /// Revenue the platform claims credit for.
    #[serde(default)]
    pub attributed_revenue: Option<f64>,
}

/// One business-outcome row at day granularity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    /// Calendar day of the row; `None` when the date string did not parse.
    pub date: Option<NaiveDate>,
    /// Orders placed that day.
    #[serde(default)]
    pub orders: Option<u64>,
    /// Total business revenue (all channels).
    #[serde(default)]
    pub total_revenue: Option<f64>,
    /// Gross profit.
    #[serde(default)]
    pub gross_profit: Option<f64>,
}

// ── Column presence ───────────────────────────────────────────────────────────

/// Which logical marketing columns were present in the source header.
///
/// This is what distinguishes "the file had no `clicks` column" (dependent
/// metrics are unavailable) from "the column was there but some cells were
/// empty" (those cells are null, the metric still sums the rest).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingColumns {
    pub date: bool,
    pub campaign: bool,
    pub adset: bool,
    pub impressions: bool,
    pub clicks: bool,
    pub spend: bool,
    pub attributed_revenue: bool,
}

impl MarketingColumns {
    /// Column-set union, used when tables from several platforms are combined.
    pub fn union(self, other: Self) -> Self {
        Self {
            date: self.date || other.date,
            campaign: self.campaign || other.campaign,
            adset: self.adset || other.adset,
            impressions: self.impressions || other.impressions,
            clicks: self.clicks || other.clicks,
            spend: self.spend || other.spend,
            attributed_revenue: self.attributed_revenue || other.attributed_revenue,
        }
    }
}

/// Which logical business columns were present in the source header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessColumns {
    pub date: bool,
    pub orders: bool,
    pub total_revenue: bool,
    pub gross_profit: bool,
}

// ── Tables ────────────────────────────────────────────────────────────────────

/// Normalized marketing rows plus the column set they were built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketingTable {
    /// Logical columns present in the originating header(s).
    pub columns: MarketingColumns,
    /// Rows in stable append order.
    pub rows: Vec<MarketingRecord>,
}

impl MarketingTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Distinct platform identifiers in first-seen order.
    pub fn sources(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for row in &self.rows {
            if !seen.iter().any(|s| s == &row.source) {
                seen.push(row.source.clone());
            }
        }
        seen
    }

    /// Distinct non-null campaign names in first-seen order.
    pub fn campaigns(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for row in &self.rows {
            if let Some(campaign) = &row.campaign {
                if !seen.iter().any(|c| c == campaign) {
                    seen.push(campaign.clone());
                }
            }
        }
        seen
    }

    /// Min/max of the parseable dates, or `None` when no row has one.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_span(self.rows.iter().filter_map(|r| r.date))
    }
}

/// Normalized business rows plus the column set they were built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessTable {
    /// Logical columns present in the originating header.
    pub columns: BusinessColumns,
    /// Rows in file order.
    pub rows: Vec<BusinessRecord>,
}

impl BusinessTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Min/max of the parseable dates, or `None` when no row has one.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        date_span(self.rows.iter().filter_map(|r| r.date))
    }
}

fn date_span(dates: impl Iterator<Item = NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    let mut span: Option<(NaiveDate, NaiveDate)> = None;
    for d in dates {
        span = Some(match span {
            None => (d, d),
            Some((lo, hi)) => (lo.min(d), hi.max(d)),
        });
    }
    span
}

// ── Load status ───────────────────────────────────────────────────────────────

/// Outcome of loading one expected input file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// The file was read and parsed; counts reflect the raw table.
    Loaded { rows: usize, columns: usize },
    /// The file does not exist (or could not be read).
    NotFound,
}

/// Status line for the data-status panel: one per expected file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStatus {
    /// File name as configured, e.g. `"Facebook.csv"`.
    pub file: String,
    pub status: FileStatus,
}

impl SourceStatus {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, FileStatus::Loaded { .. })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

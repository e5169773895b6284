//! Schema normalization: canonical column names and typed records.
//!
//! Raw tables come in with arbitrary header casing and per-platform column
//! variants. This module lowercases headers (idempotently), resolves column
//! aliases into one canonical field per concept, best-effort parses dates and
//! numbers (nulling what does not parse, never dropping the row), and tags
//! marketing rows with the platform identifier derived from the file name.

use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use dashboard_core::models::{
    BusinessColumns, BusinessRecord, BusinessTable, MarketingColumns, MarketingRecord,
    MarketingTable,
};

use crate::loader::RawTable;

// ── Column aliases ────────────────────────────────────────────────────────────
//
// Ordered candidate lists, resolved once here so the rest of the pipeline
// depends on exactly one name per concept. The canonical (plural / long)
// form wins when a file carries both variants.

const DATE_ALIASES: &[&str] = &["date"];
const CAMPAIGN_ALIASES: &[&str] = &["campaign"];
const ADSET_ALIASES: &[&str] = &["adset"];
const IMPRESSIONS_ALIASES: &[&str] = &["impressions", "impression"];
const CLICKS_ALIASES: &[&str] = &["clicks", "click"];
const SPEND_ALIASES: &[&str] = &["spend"];
const ATTRIBUTED_REVENUE_ALIASES: &[&str] = &["attributed_revenue"];
const ORDERS_ALIASES: &[&str] = &["orders"];
const TOTAL_REVENUE_ALIASES: &[&str] = &["total_revenue", "revenue"];
const GROSS_PROFIT_ALIASES: &[&str] = &["gross_profit", "profit"];

/// Index of the first candidate present in `headers`, if any.
fn resolve(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h == name))
}

// ── Header normalization ──────────────────────────────────────────────────────

/// Return a copy of `table` with every header lowercased and trimmed.
///
/// Idempotent: normalizing an already-normalized table yields an equal
/// table. The input is never mutated.
pub fn normalize_headers(table: &RawTable) -> RawTable {
    RawTable {
        path: table.path.clone(),
        headers: table
            .headers
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect(),
        records: table.records.clone(),
    }
}

/// Platform identifier for a marketing table: the file stem of its path
/// (`Facebook.csv` → `"Facebook"`).
pub fn source_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Cell parsing ──────────────────────────────────────────────────────────────

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Best-effort calendar-date parse; `None` when nothing matches.
pub fn parse_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.date());
        }
    }
    None
}

/// Best-effort non-negative decimal parse. Tolerates a leading currency
/// symbol and thousands separators; a negative or non-finite value is
/// treated the same as an unparsable one.
pub fn parse_amount(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Some(v),
        _ => None,
    }
}

/// Best-effort non-negative integer parse, accepting decimal renderings of
/// whole numbers (`"1234.0"`).
pub fn parse_count(cell: &str) -> Option<u64> {
    parse_amount(cell).map(|v| v.round() as u64)
}

// ── Typed conversion ──────────────────────────────────────────────────────────

/// Convert a raw marketing table into typed records tagged with `source`.
///
/// Headers are normalized first, so callers may pass the loader's output
/// directly. Cells that fail to parse become `None`; rows are never dropped.
pub fn to_marketing(raw: &RawTable, source: &str) -> MarketingTable {
    let normalized = normalize_headers(raw);
    let headers = &normalized.headers;

    let date_idx = resolve(headers, DATE_ALIASES);
    let campaign_idx = resolve(headers, CAMPAIGN_ALIASES);
    let adset_idx = resolve(headers, ADSET_ALIASES);
    let impressions_idx = resolve(headers, IMPRESSIONS_ALIASES);
    let clicks_idx = resolve(headers, CLICKS_ALIASES);
    let spend_idx = resolve(headers, SPEND_ALIASES);
    let attributed_idx = resolve(headers, ATTRIBUTED_REVENUE_ALIASES);

    let columns = MarketingColumns {
        date: date_idx.is_some(),
        campaign: campaign_idx.is_some(),
        adset: adset_idx.is_some(),
        impressions: impressions_idx.is_some(),
        clicks: clicks_idx.is_some(),
        spend: spend_idx.is_some(),
        attributed_revenue: attributed_idx.is_some(),
    };

    let mut unparsable_dates = 0usize;
    let rows = normalized
        .records
        .iter()
        .map(|cells| {
            let date = date_idx.and_then(|i| {
                let parsed = parse_date(&cells[i]);
                if parsed.is_none() && !cells[i].trim().is_empty() {
                    unparsable_dates += 1;
                }
                parsed
            });
            MarketingRecord {
                date,
                source: source.to_string(),
                campaign: campaign_idx.and_then(|i| text_cell(&cells[i])),
                adset: adset_idx.and_then(|i| text_cell(&cells[i])),
                impressions: impressions_idx.and_then(|i| parse_count(&cells[i])),
                clicks: clicks_idx.and_then(|i| parse_count(&cells[i])),
                spend: spend_idx.and_then(|i| parse_amount(&cells[i])),
                attributed_revenue: attributed_idx.and_then(|i| parse_amount(&cells[i])),
            }
        })
        .collect();

    if unparsable_dates > 0 {
        debug!(
            "{}: {} dates did not parse and were nulled",
            raw.path.display(),
            unparsable_dates
        );
    }

    MarketingTable { columns, rows }
}

/// Convert a raw business table into typed records.
pub fn to_business(raw: &RawTable) -> BusinessTable {
    let normalized = normalize_headers(raw);
    let headers = &normalized.headers;

    let date_idx = resolve(headers, DATE_ALIASES);
    let orders_idx = resolve(headers, ORDERS_ALIASES);
    let revenue_idx = resolve(headers, TOTAL_REVENUE_ALIASES);
    let profit_idx = resolve(headers, GROSS_PROFIT_ALIASES);

    let columns = BusinessColumns {
        date: date_idx.is_some(),
        orders: orders_idx.is_some(),
        total_revenue: revenue_idx.is_some(),
        gross_profit: profit_idx.is_some(),
    };

    let rows = normalized
        .records
        .iter()
        .map(|cells| BusinessRecord {
            date: date_idx.and_then(|i| parse_date(&cells[i])),
            orders: orders_idx.and_then(|i| parse_count(&cells[i])),
            total_revenue: revenue_idx.and_then(|i| parse_amount(&cells[i])),
            gross_profit: profit_idx.and_then(|i| parse_amount(&cells[i])),
        })
        .collect();

    BusinessTable { columns, rows }
}

fn text_cell(cell: &str) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Pure filter engine over the normalized tables.
//!
//! Filtering never mutates its input: each function clones the rows that
//! satisfy the criteria into a fresh table carrying the same column set.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BusinessTable, MarketingTable};

/// The campaign-picker sentinel meaning "no campaign filter".
pub const ALL_CAMPAIGNS: &str = "All";

// ── DateRange ─────────────────────────────────────────────────────────────────

/// Inclusive calendar-day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `true` when `day` falls within `[start, end]`.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Resolve the output of a date-range picker.
    ///
    /// The picker is expected to hand back exactly two dates. Anything else
    /// (a single date mid-selection, an empty value) is malformed input and
    /// falls back to the full observed span of the data. Returns `None` only
    /// when the input is malformed and there is no data to span.
    pub fn from_picker(input: &[NaiveDate], observed: Option<(NaiveDate, NaiveDate)>) -> Option<Self> {
        match input {
            [start, end] => Some(Self::new(*start, *end)),
            _ => observed.map(|(lo, hi)| Self::new(lo, hi)),
        }
    }
}

// ── CampaignFilter ────────────────────────────────────────────────────────────

/// Campaign selection from the single-select control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignFilter {
    /// The "All" sentinel: campaign clause is a no-op.
    #[default]
    All,
    /// Exact-match on one campaign name.
    Named(String),
}

impl CampaignFilter {
    /// Interpret a picker choice, mapping the `"All"` sentinel to [`Self::All`].
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL_CAMPAIGNS {
            Self::All
        } else {
            Self::Named(choice.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

// ── FilterCriteria ────────────────────────────────────────────────────────────

/// The full set of user-facing filter controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive date range; `None` disables the date clause.
    pub date_range: Option<DateRange>,
    /// Selected platform identifiers. An empty set means "no source filter"
    /// rather than "match nothing".
    pub sources: Vec<String>,
    /// Campaign selection.
    pub campaign: CampaignFilter,
}

// ── Filter application ────────────────────────────────────────────────────────

/// Narrow a marketing table to the rows satisfying `criteria`.
///
/// Clause semantics:
/// * date: inclusive range; rows with a null date are excluded; the clause
///   is skipped entirely when the table never had a date column.
/// * source: membership in the selected set; skipped when the set is empty.
/// * campaign: exact match; skipped for the `All` sentinel or when the
///   table never had a campaign column.
pub fn filter_marketing(table: &MarketingTable, criteria: &FilterCriteria) -> MarketingTable {
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            if table.columns.date {
                if let Some(range) = &criteria.date_range {
                    match row.date {
                        Some(d) if range.contains(d) => {}
                        _ => return false,
                    }
                }
            }
            if !criteria.sources.is_empty() && !criteria.sources.iter().any(|s| s == &row.source) {
                return false;
            }
            if table.columns.campaign {
                if let CampaignFilter::Named(name) = &criteria.campaign {
                    if row.campaign.as_deref() != Some(name.as_str()) {
                        return false;
                    }
                }
            }
            true
        })
        .cloned()
        .collect();

    MarketingTable {
        columns: table.columns,
        rows,
    }
}

/// Narrow a business table to the rows within `range` (inclusive).
///
/// Only the date clause applies to business data. Rows with a null date are
/// excluded while a range is active; the clause is skipped when the table
/// never had a date column.
pub fn filter_business(table: &BusinessTable, range: Option<DateRange>) -> BusinessTable {
    let rows = table
        .rows
        .iter()
        .filter(|row| {
            if table.columns.date {
                if let Some(range) = &range {
                    return matches!(row.date, Some(d) if range.contains(d));
                }
            }
            true
        })
        .cloned()
        .collect();

    BusinessTable {
        columns: table.columns,
        rows,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

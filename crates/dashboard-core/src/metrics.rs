//! Metric aggregation over filtered tables.
//!
//! All sums use optional accumulation: a total stays `None` ("unavailable")
//! until at least one value contributes. An absent column therefore never
//! shows up as a zero, and a platform whose file lacked a column aggregates
//! to unavailable in the per-source breakdown as well.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{BusinessTable, MarketingTable};

// ── Optional accumulation ─────────────────────────────────────────────────────

fn add_opt_f64(acc: &mut Option<f64>, value: Option<f64>) {
    if let Some(v) = value {
        *acc = Some(acc.unwrap_or(0.0) + v);
    }
}

fn add_opt_u64(acc: &mut Option<u64>, value: Option<u64>) {
    if let Some(v) = value {
        *acc = Some(acc.unwrap_or(0) + v);
    }
}

// ── MetricSnapshot ────────────────────────────────────────────────────────────

/// Scalar KPI totals over one filtered marketing table and one filtered
/// business table. `None` means "unavailable", never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSnapshot {
    /// Total marketing spend.
    pub spend: Option<f64>,
    /// Total ad impressions.
    pub impressions: Option<u64>,
    /// Total ad clicks.
    pub clicks: Option<u64>,
    /// Total platform-attributed revenue.
    pub attributed_revenue: Option<f64>,
    /// Total orders (business data).
    pub orders: Option<u64>,
    /// Total business revenue.
    pub total_revenue: Option<f64>,
    /// Total gross profit.
    pub gross_profit: Option<f64>,
}

impl MetricSnapshot {
    /// Sum the scalar KPIs. `business` is `None` when `Business.csv` was
    /// absent, which leaves every business-derived KPI unavailable while the
    /// marketing KPIs still compute.
    pub fn compute(marketing: &MarketingTable, business: Option<&BusinessTable>) -> Self {
        let mut snapshot = Self::default();

        for row in &marketing.rows {
            add_opt_f64(&mut snapshot.spend, row.spend);
            add_opt_u64(&mut snapshot.impressions, row.impressions);
            add_opt_u64(&mut snapshot.clicks, row.clicks);
            add_opt_f64(&mut snapshot.attributed_revenue, row.attributed_revenue);
        }

        if let Some(business) = business {
            for row in &business.rows {
                add_opt_u64(&mut snapshot.orders, row.orders);
                add_opt_f64(&mut snapshot.total_revenue, row.total_revenue);
                add_opt_f64(&mut snapshot.gross_profit, row.gross_profit);
            }
        }

        snapshot
    }

    /// Return on ad spend: attributed revenue ÷ spend.
    ///
    /// Defined only when both totals are present and spend is positive.
    pub fn roas(&self) -> Option<f64> {
        match (self.attributed_revenue, self.spend) {
            (Some(revenue), Some(spend)) if spend > 0.0 => Some(revenue / spend),
            _ => None,
        }
    }

    /// Customer acquisition cost: spend ÷ orders.
    ///
    /// Defined only when both totals are present and orders is positive.
    pub fn cac(&self) -> Option<f64> {
        match (self.spend, self.orders) {
            (Some(spend), Some(orders)) if orders > 0 => Some(spend / orders as f64),
            _ => None,
        }
    }
}

// ── Time series ───────────────────────────────────────────────────────────────

/// One day of the marketing time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMarketing {
    pub date: NaiveDate,
    pub spend: Option<f64>,
    pub attributed_revenue: Option<f64>,
}

/// One day of the business time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBusiness {
    pub date: NaiveDate,
    pub orders: Option<u64>,
    pub total_revenue: Option<f64>,
    pub gross_profit: Option<f64>,
}

/// Group marketing rows by date, summing spend and attributed revenue.
///
/// Rows with a null date have no day to belong to and are skipped. Output is
/// one entry per distinct date, ascending.
pub fn daily_marketing(table: &MarketingTable) -> Vec<DailyMarketing> {
    let mut map: BTreeMap<NaiveDate, DailyMarketing> = BTreeMap::new();
    for row in &table.rows {
        let Some(date) = row.date else { continue };
        let entry = map.entry(date).or_insert(DailyMarketing {
            date,
            spend: None,
            attributed_revenue: None,
        });
        add_opt_f64(&mut entry.spend, row.spend);
        add_opt_f64(&mut entry.attributed_revenue, row.attributed_revenue);
    }
    map.into_values().collect()
}

/// Group business rows by date, summing orders, revenue and profit.
pub fn daily_business(table: &BusinessTable) -> Vec<DailyBusiness> {
    let mut map: BTreeMap<NaiveDate, DailyBusiness> = BTreeMap::new();
    for row in &table.rows {
        let Some(date) = row.date else { continue };
        let entry = map.entry(date).or_insert(DailyBusiness {
            date,
            orders: None,
            total_revenue: None,
            gross_profit: None,
        });
        add_opt_u64(&mut entry.orders, row.orders);
        add_opt_f64(&mut entry.total_revenue, row.total_revenue);
        add_opt_f64(&mut entry.gross_profit, row.gross_profit);
    }
    map.into_values().collect()
}

// ── Platform breakdown ────────────────────────────────────────────────────────

/// Per-platform totals. Grouping does not depend on the date, so rows with a
/// null date still contribute here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformStats {
    pub source: String,
    pub spend: Option<f64>,
    pub clicks: Option<u64>,
    pub attributed_revenue: Option<f64>,
}

/// Group marketing rows by source, one entry per distinct platform, sorted
/// by platform name.
pub fn platform_breakdown(table: &MarketingTable) -> Vec<PlatformStats> {
    let mut map: BTreeMap<String, PlatformStats> = BTreeMap::new();
    for row in &table.rows {
        let entry = map
            .entry(row.source.clone())
            .or_insert_with(|| PlatformStats {
                source: row.source.clone(),
                spend: None,
                clicks: None,
                attributed_revenue: None,
            });
        add_opt_f64(&mut entry.spend, row.spend);
        add_opt_u64(&mut entry.clicks, row.clicks);
        add_opt_f64(&mut entry.attributed_revenue, row.attributed_revenue);
    }
    map.into_values().collect()
}

// ── Campaign detail ───────────────────────────────────────────────────────────

/// The campaign detail table: the filtered rows ordered by date descending.
///
/// The sort is stable, so rows sharing a date keep their original append
/// order; rows with a null date sort after all dated rows. The column set is
/// carried through so the presentation layer can show only the columns that
/// exist.
pub fn campaign_detail(table: &MarketingTable) -> MarketingTable {
    let mut detail = table.clone();
    detail.rows.sort_by(|a, b| match (a.date, b.date) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    detail
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Filter state and snapshot recomputation.
//!
//! [`DashboardOrchestrator`] owns the loaded [`DashboardData`] and the live
//! [`FilterCriteria`]. Every filter-parameter change triggers a full
//! synchronous re-run of the filter engine and metric aggregator. There is
//! no partial invalidation and no overlapping in-flight run, so the
//! [`DashboardSnapshot`] the UI reads is always internally consistent.

use chrono::NaiveDate;

use dashboard_core::filters::{
    filter_business, filter_marketing, CampaignFilter, DateRange, FilterCriteria,
};
use dashboard_core::metrics::{
    campaign_detail, daily_business, daily_marketing, platform_breakdown, DailyBusiness,
    DailyMarketing, MetricSnapshot, PlatformStats,
};
use dashboard_core::models::MarketingTable;
use dashboard_data::pipeline::DashboardData;

// ── Notices ───────────────────────────────────────────────────────────────────

/// Severity of an inline dashboard notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// An inline message shown on the dashboard instead of a failed section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: &str) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.to_string(),
        }
    }

    fn error(message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_string(),
        }
    }
}

// ── DashboardSnapshot ─────────────────────────────────────────────────────────

/// The complete recomputed output of one filter pass: the data contract
/// between the runtime and the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    /// Scalar KPI totals.
    pub kpis: MetricSnapshot,
    /// Marketing time series, one row per day, ascending.
    pub daily_marketing: Vec<DailyMarketing>,
    /// Business time series, one row per day, ascending.
    pub daily_business: Vec<DailyBusiness>,
    /// Per-platform totals.
    pub platforms: Vec<PlatformStats>,
    /// Campaign detail rows, date descending.
    pub campaign_rows: MarketingTable,
    /// Row count of the filtered marketing table.
    pub filtered_marketing_rows: usize,
    /// Inline notices for missing data / empty sections.
    pub notices: Vec<Notice>,
}

// ── DashboardOrchestrator ─────────────────────────────────────────────────────

/// Holds the loaded data and the current filter state; recomputes the
/// snapshot on every change.
pub struct DashboardOrchestrator {
    data: DashboardData,
    criteria: FilterCriteria,
    snapshot: DashboardSnapshot,
}

impl DashboardOrchestrator {
    /// Build an orchestrator with the default criteria: the full observed
    /// date span, every observed platform selected, campaign `All`.
    pub fn new(data: DashboardData) -> Self {
        let criteria = FilterCriteria {
            date_range: data
                .observed_span()
                .map(|(lo, hi)| DateRange::new(lo, hi)),
            sources: data.source_options(),
            campaign: CampaignFilter::All,
        };
        let mut orchestrator = Self {
            data,
            criteria,
            snapshot: DashboardSnapshot::default(),
        };
        orchestrator.recompute();
        orchestrator
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// The snapshot produced by the most recent recompute.
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    // ── Filter setters (each triggers a full recompute) ───────────────────

    /// Apply the date-range picker output. Malformed input (anything but a
    /// two-date pair) falls back to the full observed span.
    pub fn set_date_range(&mut self, picker: &[NaiveDate]) {
        self.criteria.date_range = DateRange::from_picker(picker, self.data.observed_span());
        self.recompute();
    }

    /// Replace the selected-platform set. Empty means "no source filter".
    pub fn set_sources(&mut self, sources: Vec<String>) {
        self.criteria.sources = sources;
        self.recompute();
    }

    /// Toggle one platform in or out of the selection.
    pub fn toggle_source(&mut self, source: &str) {
        if let Some(pos) = self.criteria.sources.iter().position(|s| s == source) {
            self.criteria.sources.remove(pos);
        } else {
            self.criteria.sources.push(source.to_string());
        }
        self.recompute();
    }

    /// Apply the campaign picker choice (`"All"` disables the clause).
    pub fn set_campaign(&mut self, choice: &str) {
        self.criteria.campaign = CampaignFilter::from_choice(choice);
        self.recompute();
    }

    // ── Recompute ─────────────────────────────────────────────────────────

    /// Full pipeline pass: filter engine, then metric aggregator, then the
    /// inline notices.
    fn recompute(&mut self) {
        let marketing = filter_marketing(&self.data.marketing, &self.criteria);
        let business = self
            .data
            .business
            .as_ref()
            .map(|b| filter_business(b, self.criteria.date_range));

        let kpis = MetricSnapshot::compute(&marketing, business.as_ref());
        let daily_m = daily_marketing(&marketing);
        let daily_b = business.as_ref().map(daily_business).unwrap_or_default();
        let platforms = platform_breakdown(&marketing);
        let campaign_rows = campaign_detail(&marketing);

        let mut notices: Vec<Notice> = Vec::new();
        if self.data.business_missing() {
            notices.push(Notice::error(
                "Business.csv not found. Please upload Business.csv into the app folder.",
            ));
        }
        if daily_m.is_empty() {
            notices.push(Notice::info("No marketing data available for time trends."));
        }
        if daily_b.is_empty() {
            notices.push(Notice::info("No business data available for time trends."));
        }
        if platforms.is_empty() {
            notices.push(Notice::info("No platform-level data."));
        }
        if campaign_rows.is_empty() {
            notices.push(Notice::info("No campaign-level data to show."));
        }

        tracing::debug!(
            rows = marketing.len(),
            platforms = platforms.len(),
            notices = notices.len(),
            "snapshot recomputed"
        );

        self.snapshot = DashboardSnapshot {
            kpis,
            daily_marketing: daily_m,
            daily_business: daily_b,
            platforms,
            filtered_marketing_rows: marketing.len(),
            campaign_rows,
            notices,
        };
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

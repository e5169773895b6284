//! The headline KPI tile row.
//!
//! Four tiles (Total Spend, Attributed Revenue, ROAS, CAC) with the
//! dashboard's display rules: whole currency units for spend and revenue,
//! two decimals for the ratios, and the `—` glyph when a metric's inputs
//! are unavailable.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::formatting;
use dashboard_core::metrics::MetricSnapshot;

use crate::themes::Theme;

/// One rendered KPI tile: title, formatted value, availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiTile {
    pub title: &'static str,
    pub value: String,
    pub available: bool,
}

/// The KPI row for one metric snapshot.
pub struct KpiRow<'a> {
    pub kpis: &'a MetricSnapshot,
    pub theme: &'a Theme,
}

impl<'a> KpiRow<'a> {
    pub fn new(kpis: &'a MetricSnapshot, theme: &'a Theme) -> Self {
        Self { kpis, theme }
    }

    /// Build the four headline tiles.
    pub fn tiles(&self) -> Vec<KpiTile> {
        vec![
            KpiTile {
                title: "Total Spend",
                value: formatting::opt_currency_whole(self.kpis.spend),
                available: self.kpis.spend.is_some(),
            },
            KpiTile {
                title: "Attributed Revenue",
                value: formatting::opt_currency_whole(self.kpis.attributed_revenue),
                available: self.kpis.attributed_revenue.is_some(),
            },
            KpiTile {
                title: "ROAS",
                value: formatting::opt_ratio(self.kpis.roas()),
                available: self.kpis.roas().is_some(),
            },
            KpiTile {
                title: "CAC",
                value: formatting::opt_currency(self.kpis.cac()),
                available: self.kpis.cac().is_some(),
            },
        ]
    }

    /// One-line summary of the remaining totals shown under the tiles.
    pub fn totals_line(&self) -> Line<'a> {
        let theme = self.theme;
        let pairs = [
            ("Impressions", formatting::opt_count(self.kpis.impressions)),
            ("Clicks", formatting::opt_count(self.kpis.clicks)),
            ("Orders", formatting::opt_count(self.kpis.orders)),
            (
                "Revenue",
                formatting::opt_currency_whole(self.kpis.total_revenue),
            ),
            (
                "Profit",
                formatting::opt_currency_whole(self.kpis.gross_profit),
            ),
        ];

        let mut spans: Vec<Span<'a>> = Vec::new();
        for (i, (label, value)) in pairs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  |  ", theme.separator));
            }
            spans.push(Span::styled(format!("{label} "), theme.label));
            spans.push(Span::styled(value, theme.value));
        }
        Line::from(spans)
    }

    /// Render the tile row into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let tiles = self.tiles();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, tiles.len() as u32);
                tiles.len()
            ])
            .split(area);

        for (tile, chunk) in tiles.iter().zip(chunks.iter()) {
            let value_style = if tile.available {
                self.theme.kpi_value
            } else {
                self.theme.kpi_unavailable
            };
            let paragraph = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(tile.value.clone(), value_style)).centered(),
            ])
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.table_border)
                    .title(Span::styled(format!(" {} ", tile.title), self.theme.kpi_title)),
            );
            frame.render_widget(paragraph, *chunk);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

//! Breakdown and detail tables for the dashboard TUI.
//!
//! Renders bordered [`ratatui::widgets::Table`]s for the platform breakdown,
//! the daily marketing/business time series and the campaign detail view.
//! Unavailable cells show the `—` glyph, never a zero.

use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use dashboard_core::formatting;
use dashboard_core::metrics::{DailyBusiness, DailyMarketing, PlatformStats};
use dashboard_core::models::{MarketingColumns, MarketingTable};

use crate::themes::Theme;

/// Widest text cell the campaign table will show before truncation.
const TEXT_CELL_WIDTH: usize = 20;

// ── Platform breakdown ────────────────────────────────────────────────────────

/// Render the per-platform totals table into `area`.
pub fn render_platform_table(
    frame: &mut Frame,
    area: Rect,
    platforms: &[PlatformStats],
    theme: &Theme,
) {
    let header = Row::new(
        ["Platform", "Spend", "Clicks", "Attributed Revenue"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = platforms
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Row::new(vec![
                Cell::from(p.source.clone()),
                Cell::from(formatting::opt_currency(p.spend)),
                Cell::from(formatting::opt_count(p.clicks)),
                Cell::from(formatting::opt_currency(p.attributed_revenue)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(12),
        Constraint::Length(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(" Platform breakdown ", theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Daily time series ─────────────────────────────────────────────────────────

/// Render the daily marketing series (spend and attributed revenue per day).
pub fn render_daily_marketing_table(
    frame: &mut Frame,
    area: Rect,
    daily: &[DailyMarketing],
    theme: &Theme,
) {
    let header = Row::new(
        ["Date", "Spend", "Attributed Revenue"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = daily
        .iter()
        .enumerate()
        .map(|(i, d)| {
            Row::new(vec![
                Cell::from(d.date.format("%Y-%m-%d").to_string()),
                Cell::from(formatting::opt_currency(d.spend)),
                Cell::from(formatting::opt_currency(d.attributed_revenue)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(14),
        Constraint::Length(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(" Marketing by day ", theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render the daily business series (orders, revenue, profit per day).
pub fn render_daily_business_table(
    frame: &mut Frame,
    area: Rect,
    daily: &[DailyBusiness],
    theme: &Theme,
) {
    let header = Row::new(
        ["Date", "Orders", "Revenue", "Profit"]
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = daily
        .iter()
        .enumerate()
        .map(|(i, d)| {
            Row::new(vec![
                Cell::from(d.date.format("%Y-%m-%d").to_string()),
                Cell::from(formatting::opt_count(d.orders)),
                Cell::from(formatting::opt_currency(d.total_revenue)),
                Cell::from(formatting::opt_currency(d.gross_profit)),
            ])
            .style(row_style(theme, i))
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(" Business by day ", theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

// ── Campaign detail ───────────────────────────────────────────────────────────

/// Header labels for the campaign detail table, restricted to the columns
/// that actually exist in the data. `Source` is always present.
pub fn campaign_headers(columns: &MarketingColumns) -> Vec<&'static str> {
    let mut headers = Vec::new();
    if columns.date {
        headers.push("Date");
    }
    headers.push("Source");
    if columns.campaign {
        headers.push("Campaign");
    }
    if columns.adset {
        headers.push("Adset");
    }
    if columns.impressions {
        headers.push("Impressions");
    }
    if columns.clicks {
        headers.push("Clicks");
    }
    if columns.spend {
        headers.push("Spend");
    }
    if columns.attributed_revenue {
        headers.push("Attributed Revenue");
    }
    headers
}

/// Render the campaign detail table (already sorted date-descending by the
/// aggregator) into `area`.
pub fn render_campaign_table(
    frame: &mut Frame,
    area: Rect,
    detail: &MarketingTable,
    theme: &Theme,
) {
    let columns = &detail.columns;
    let headers = campaign_headers(columns);

    let header = Row::new(
        headers
            .iter()
            .map(|h| Cell::from(*h).style(theme.table_header)),
    )
    .height(1);

    let rows: Vec<Row> = detail
        .rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut cells: Vec<Cell> = Vec::with_capacity(headers.len());
            if columns.date {
                cells.push(Cell::from(
                    r.date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| formatting::UNAVAILABLE.to_string()),
                ));
            }
            cells.push(Cell::from(r.source.clone()));
            if columns.campaign {
                cells.push(Cell::from(truncate(r.campaign.as_deref(), TEXT_CELL_WIDTH)));
            }
            if columns.adset {
                cells.push(Cell::from(truncate(r.adset.as_deref(), TEXT_CELL_WIDTH)));
            }
            if columns.impressions {
                cells.push(Cell::from(formatting::opt_count(r.impressions)));
            }
            if columns.clicks {
                cells.push(Cell::from(formatting::opt_count(r.clicks)));
            }
            if columns.spend {
                cells.push(Cell::from(formatting::opt_currency(r.spend)));
            }
            if columns.attributed_revenue {
                cells.push(Cell::from(formatting::opt_currency(r.attributed_revenue)));
            }
            Row::new(cells).style(row_style(theme, i))
        })
        .collect();

    let widths: Vec<Constraint> = headers
        .iter()
        .map(|h| match *h {
            "Date" => Constraint::Length(12),
            "Source" => Constraint::Length(10),
            "Campaign" | "Adset" => Constraint::Length(TEXT_CELL_WIDTH as u16 + 2),
            "Attributed Revenue" => Constraint::Length(20),
            _ => Constraint::Length(12),
        })
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(bordered(" Campaign detail ", theme))
        .style(theme.text);

    frame.render_widget(table, area);
}

/// Render a placeholder when a view has no rows to show.
pub fn render_no_data(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.warning)),
        Line::from(""),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(text).block(bordered(" Marketing Intelligence ", theme)),
        area,
    );
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn bordered<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.table_border)
        .title(title)
}

fn row_style(theme: &Theme, index: usize) -> ratatui::style::Style {
    if index % 2 == 0 {
        theme.table_row
    } else {
        theme.table_row_alt
    }
}

/// Width-aware truncation with a `…` marker; `None` renders as the
/// unavailable glyph.
fn truncate(text: Option<&str>, max_width: usize) -> String {
    let Some(text) = text else {
        return formatting::UNAVAILABLE.to_string();
    };

    let mut width = 0usize;
    let mut result = String::new();
    for c in text.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        width += char_width;
        result.push(c);
    }
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::MarketingRecord;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── campaign_headers ──────────────────────────────────────────────────────

    #[test]
    fn test_campaign_headers_full_column_set() {
        let columns = MarketingColumns {
            date: true,
            campaign: true,
            adset: true,
            impressions: true,
            clicks: true,
            spend: true,
            attributed_revenue: true,
        };
        assert_eq!(
            campaign_headers(&columns),
            vec![
                "Date",
                "Source",
                "Campaign",
                "Adset",
                "Impressions",
                "Clicks",
                "Spend",
                "Attributed Revenue"
            ]
        );
    }

    #[test]
    fn test_campaign_headers_partial_column_set() {
        let columns = MarketingColumns {
            date: true,
            spend: true,
            ..Default::default()
        };
        assert_eq!(campaign_headers(&columns), vec!["Date", "Source", "Spend"]);
    }

    // ── truncate ──────────────────────────────────────────────────────────────

    #[test]
    fn test_truncate_none_is_unavailable() {
        assert_eq!(truncate(None, 10), formatting::UNAVAILABLE);
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate(Some("Spring"), 10), "Spring");
    }

    #[test]
    fn test_truncate_long_text_gets_ellipsis() {
        let out = truncate(Some("A very long campaign name indeed"), 10);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= 10);
    }

    // ── Render (does not panic) ───────────────────────────────────────────────

    #[test]
    fn test_render_platform_table() {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let platforms = vec![
            PlatformStats {
                source: "Facebook".to_string(),
                spend: Some(100.0),
                clicks: Some(50),
                attributed_revenue: Some(300.0),
            },
            PlatformStats {
                source: "TikTok".to_string(),
                spend: Some(25.0),
                clicks: None,
                attributed_revenue: None,
            },
        ];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_platform_table(frame, area, &platforms, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_daily_tables() {
        let backend = TestBackend::new(80, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        let marketing = vec![DailyMarketing {
            date: date(2024, 1, 1),
            spend: Some(100.0),
            attributed_revenue: None,
        }];
        let business = vec![DailyBusiness {
            date: date(2024, 1, 1),
            orders: Some(20),
            total_revenue: Some(900.0),
            gross_profit: None,
        }];

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_daily_marketing_table(frame, area, &marketing, &theme);
            })
            .unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_daily_business_table(frame, area, &business, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_campaign_table_with_null_date() {
        let backend = TestBackend::new(120, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        let detail = MarketingTable {
            columns: MarketingColumns {
                date: true,
                campaign: true,
                spend: true,
                ..Default::default()
            },
            rows: vec![
                MarketingRecord {
                    date: Some(date(2024, 1, 2)),
                    source: "Facebook".to_string(),
                    campaign: Some("Spring".to_string()),
                    spend: Some(10.0),
                    ..Default::default()
                },
                MarketingRecord {
                    date: None,
                    source: "TikTok".to_string(),
                    campaign: None,
                    spend: None,
                    ..Default::default()
                },
            ],
        };

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_campaign_table(frame, area, &detail, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_no_data() {
        let backend = TestBackend::new(60, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, "No campaign-level data to show.", &theme);
            })
            .unwrap();
    }
}

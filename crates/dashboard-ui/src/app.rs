//! Application state and TUI event loop.
//!
//! [`App`] owns the theme, the active tab and the [`DashboardOrchestrator`].
//! Keyboard input either switches tabs or mutates a filter parameter, and
//! every filter change runs the orchestrator's full recompute before the
//! next frame is drawn. Each run completes before the next input is
//! processed, so there are never overlapping in-flight recomputes.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Sparkline,
    Frame, Terminal,
};

use dashboard_runtime::orchestrator::DashboardOrchestrator;

use crate::components::kpi_row::KpiRow;
use crate::components::status_panel::StatusPanel;
use crate::table_view;
use crate::themes::Theme;

// ── Tab ───────────────────────────────────────────────────────────────────────

/// Which tab the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// KPI tiles, daily-spend sparkline and the data-status panel.
    Overview,
    /// Daily marketing and business time-series tables.
    Trends,
    /// Platform breakdown and campaign detail tables.
    Campaigns,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Overview, Tab::Trends, Tab::Campaigns];

    fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Trends => "Trends",
            Tab::Campaigns => "Campaigns",
        }
    }

    fn next(self) -> Tab {
        match self {
            Tab::Overview => Tab::Trends,
            Tab::Trends => Tab::Campaigns,
            Tab::Campaigns => Tab::Overview,
        }
    }

    fn previous(self) -> Tab {
        match self {
            Tab::Overview => Tab::Campaigns,
            Tab::Trends => Tab::Overview,
            Tab::Campaigns => Tab::Trends,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current tab.
    pub tab: Tab,
    /// Data plus live filter state.
    pub orchestrator: DashboardOrchestrator,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct the application with the given theme name.
    pub fn new(theme_name: &str, orchestrator: DashboardOrchestrator) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab: Tab::Overview,
            orchestrator,
            should_quit: false,
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until `q` / `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the loop stays
    /// responsive without busy-waiting.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key.code, key.modifiers);
                }
            }

            if self.should_quit {
                break;
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left => self.tab = self.tab.previous(),
            KeyCode::Char('a') => self.orchestrator.set_campaign("All"),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                let options = self.orchestrator.data().source_options();
                if let Some(source) = options.get(index) {
                    let source = source.clone();
                    self.orchestrator.toggle_source(&source);
                }
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(4)])
            .split(frame.area());

        self.render_header(frame, chunks[0]);

        match self.tab {
            Tab::Overview => self.render_overview(frame, chunks[1]),
            Tab::Trends => self.render_trends(frame, chunks[1]),
            Tab::Campaigns => self.render_campaigns(frame, chunks[1]),
        }
    }

    /// Title line, tab bar and active-filter summary.
    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let criteria = self.orchestrator.criteria();

        let mut tab_spans: Vec<Span> = Vec::new();
        for (i, tab) in Tab::ALL.iter().enumerate() {
            if i > 0 {
                tab_spans.push(Span::styled(" | ", theme.separator));
            }
            let style = if *tab == self.tab {
                theme.tab_active
            } else {
                theme.tab_inactive
            };
            tab_spans.push(Span::styled(tab.title(), style));
        }

        let range = match criteria.date_range {
            Some(r) => format!("{} → {}", r.start, r.end),
            None => "all dates".to_string(),
        };
        let sources = if criteria.sources.is_empty() {
            "all platforms".to_string()
        } else {
            criteria.sources.join(",")
        };
        let campaign = match &criteria.campaign {
            dashboard_core::filters::CampaignFilter::All => "All".to_string(),
            dashboard_core::filters::CampaignFilter::Named(name) => name.clone(),
        };

        let lines = vec![
            Line::from(Span::styled(
                " MARKETING INTELLIGENCE DASHBOARD ",
                theme.header,
            )),
            Line::from(tab_spans),
            Line::from(vec![
                Span::styled("[ ", theme.label),
                Span::styled(range, theme.value),
                Span::styled(" | ", theme.label),
                Span::styled(sources, theme.value),
                Span::styled(" | ", theme.label),
                Span::styled(campaign, theme.value),
                Span::styled(" ]", theme.label),
            ]),
        ];

        frame.render_widget(ratatui::widgets::Paragraph::new(lines), area);
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.orchestrator.snapshot();
        let data = self.orchestrator.data();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(1),
                Constraint::Min(4),
            ])
            .split(area);

        let kpi_row = KpiRow::new(&snapshot.kpis, &self.theme);
        kpi_row.render(frame, chunks[0]);
        frame.render_widget(
            ratatui::widgets::Paragraph::new(kpi_row.totals_line()),
            chunks[1],
        );

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);

        let spend_by_day: Vec<u64> = snapshot
            .daily_marketing
            .iter()
            .map(|d| d.spend.unwrap_or(0.0).round() as u64)
            .collect();
        let sparkline = Sparkline::default()
            .block(
                ratatui::widgets::Block::default()
                    .borders(ratatui::widgets::Borders::ALL)
                    .border_style(self.theme.table_border)
                    .title(" Daily spend "),
            )
            .data(&spend_by_day)
            .style(self.theme.chart);
        frame.render_widget(sparkline, bottom[0]);

        StatusPanel::new(
            &data.statuses,
            &snapshot.notices,
            &data.extra_files,
            &self.theme,
        )
        .render(frame, bottom[1]);
    }

    fn render_trends(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.orchestrator.snapshot();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        if snapshot.daily_marketing.is_empty() {
            table_view::render_no_data(
                frame,
                chunks[0],
                "No marketing data available for time trends.",
                &self.theme,
            );
        } else {
            table_view::render_daily_marketing_table(
                frame,
                chunks[0],
                &snapshot.daily_marketing,
                &self.theme,
            );
        }

        if snapshot.daily_business.is_empty() {
            table_view::render_no_data(
                frame,
                chunks[1],
                "No business data available for time trends.",
                &self.theme,
            );
        } else {
            table_view::render_daily_business_table(
                frame,
                chunks[1],
                &snapshot.daily_business,
                &self.theme,
            );
        }
    }

    fn render_campaigns(&self, frame: &mut Frame, area: Rect) {
        let snapshot = self.orchestrator.snapshot();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(8), Constraint::Min(4)])
            .split(area);

        if snapshot.platforms.is_empty() {
            table_view::render_no_data(frame, chunks[0], "No platform-level data.", &self.theme);
        } else {
            table_view::render_platform_table(frame, chunks[0], &snapshot.platforms, &self.theme);
        }

        if snapshot.campaign_rows.is_empty() {
            table_view::render_no_data(
                frame,
                chunks[1],
                "No campaign-level data to show.",
                &self.theme,
            );
        } else {
            table_view::render_campaign_table(
                frame,
                chunks[1],
                &snapshot.campaign_rows,
                &self.theme,
            );
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

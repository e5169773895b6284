//! The data-status panel.
//!
//! One line per expected input file ("not found" or its row/column counts),
//! followed by the inline notices raised by the last recompute and any CSV
//! files found in the data directory that the dashboard does not read.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use dashboard_core::models::{FileStatus, SourceStatus};
use dashboard_runtime::orchestrator::{Notice, NoticeLevel};

use crate::themes::Theme;

/// Status panel for one load pass.
pub struct StatusPanel<'a> {
    pub statuses: &'a [SourceStatus],
    pub notices: &'a [Notice],
    pub extra_files: &'a [String],
    pub theme: &'a Theme,
}

impl<'a> StatusPanel<'a> {
    pub fn new(
        statuses: &'a [SourceStatus],
        notices: &'a [Notice],
        extra_files: &'a [String],
        theme: &'a Theme,
    ) -> Self {
        Self {
            statuses,
            notices,
            extra_files,
            theme,
        }
    }

    /// Render the panel content as lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let theme = self.theme;
        let mut lines: Vec<Line<'a>> = Vec::new();

        for status in self.statuses {
            let mut spans = vec![
                Span::styled("- ", theme.dim),
                Span::styled(status.file.clone(), theme.label),
                Span::styled(": ", theme.dim),
            ];
            match &status.status {
                FileStatus::Loaded { rows, columns } => {
                    spans.push(Span::styled(
                        format!("{rows} rows, {columns} cols"),
                        theme.success,
                    ));
                }
                FileStatus::NotFound => {
                    spans.push(Span::styled("NOT FOUND", theme.warning));
                }
            }
            lines.push(Line::from(spans));
        }

        if !self.notices.is_empty() {
            lines.push(Line::from(""));
            for notice in self.notices {
                let style = match notice.level {
                    NoticeLevel::Info => theme.info,
                    NoticeLevel::Error => theme.error,
                };
                lines.push(Line::from(Span::styled(notice.message.clone(), style)));
            }
        }

        if !self.extra_files.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Also found: {}", self.extra_files.join(", ")),
                theme.dim,
            )));
        }

        lines
    }

    /// Render the panel into `area` inside a bordered block.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(self.to_lines()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.table_border)
                .title(" Data status "),
        );
        frame.render_widget(paragraph, area);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

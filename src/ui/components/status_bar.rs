//! Status bar component

use crate::grid::notice::{Notice, NoticeKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

/// What the status bar reports, most urgent first
pub enum StatusLine<'a> {
    Notice(&'a Notice),
    Busy(&'a str),
    Hints(&'a str),
}

pub const PAGE_HINTS: &str = "/: filters • n/p: page • +/-: size • s: sync • x: export • Enter: expand • ?: help • q: quit";
pub const DASHBOARD_HINTS: &str = "Tab/1-4: switch view • R: refresh • G: logs • ?: help • q: quit";

/// Status bar component
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar
    pub fn render(f: &mut Frame, area: Rect, status: StatusLine) {
        let (text, color) = match status {
            StatusLine::Notice(notice) => {
                let color = match notice.kind {
                    NoticeKind::Success => Color::Green,
                    NoticeKind::Failure => Color::Red,
                };
                (notice.text.as_str(), color)
            }
            StatusLine::Busy(text) => (text, Color::Yellow),
            StatusLine::Hints(text) => (text, Color::Gray),
        };

        let status_bar = Paragraph::new(text.to_string())
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color));

        f.render_widget(status_bar, area);
    }
}

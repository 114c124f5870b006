//! Page size selector and Prev/Next control.

use crate::constants::PAGE_SIZES;
use crate::grid::{PageSize, PageStatus};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn control_style(enabled: bool) -> Style {
    if enabled {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn render_pagination_bar(f: &mut Frame, rect: Rect, status: PageStatus, page_size: PageSize) {
    let mut spans = vec![Span::styled("Items per page: ", Style::default().fg(Color::Gray))];
    for size in PAGE_SIZES {
        let style = if size == page_size.get() {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", size), style));
    }

    spans.extend([
        Span::raw("   "),
        Span::styled("◀ Prev (p)", control_style(status.has_prev)),
        Span::raw("   "),
        Span::styled(status.label(), Style::default().fg(Color::White)),
        Span::raw("   "),
        Span::styled("Next (n) ▶", control_style(status.has_next)),
    ]);

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), rect);
}

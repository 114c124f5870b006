//! Filter inputs of an entity page.
//!
//! Keys with backend-provided options are edited by cycling through the
//! observed values (empty first, meaning "All"); every other key is typed.

use crate::constants::ERROR_DATE_RANGE;
use crate::grid::{FilterSet, FilterSpec};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Default)]
pub struct FilterBar {
    selected: usize,
    pub focused: bool,
}

/// What the filter bar shows besides the inputs
pub struct FilterBarStatus {
    pub invalid: bool,
    pub pending: bool,
    /// Number of known options per key, aligned with the filter keys
    pub option_counts: Vec<usize>,
}

impl FilterBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_key(&self, spec: &FilterSpec) -> Option<&'static str> {
        spec.keys.get(self.selected).copied()
    }

    pub fn next_field(&mut self, spec: &FilterSpec) {
        if !spec.keys.is_empty() {
            self.selected = (self.selected + 1) % spec.keys.len();
        }
    }

    pub fn prev_field(&mut self, spec: &FilterSpec) {
        if !spec.keys.is_empty() {
            self.selected = (self.selected + spec.keys.len() - 1) % spec.keys.len();
        }
    }

    pub fn render(&self, f: &mut Frame, rect: Rect, spec: &FilterSpec, filters: &FilterSet, status: FilterBarStatus) {
        let border_color = if self.focused { Color::Cyan } else { Color::DarkGray };
        let title = if self.focused {
            "Filters (Tab: next field, ←/→: choose, Esc: done)"
        } else {
            "Filters (/ to edit, c to reset)"
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title)
            .border_style(Style::default().fg(border_color));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let count = spec.keys.len().max(1) as u32;
        let fields = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, count); spec.keys.len()])
            .split(rows[0]);

        for (index, (key, area)) in spec.keys.iter().zip(fields.iter()).enumerate() {
            let value = filters.get(key).unwrap_or_default();
            let selected = self.focused && index == self.selected;
            let has_options = spec.has_options(key) && status.option_counts.get(index).copied().unwrap_or(0) > 0;

            let shown = match (value.is_empty(), has_options) {
                (true, true) => "All".to_string(),
                (true, false) if selected => "_".to_string(),
                (true, false) => "-".to_string(),
                (false, true) => format!("‹{}›", value),
                (false, false) if selected => format!("{}_", value),
                (false, false) => value.to_string(),
            };

            let label_style = if selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::Gray)
            };
            let line = Line::from(vec![
                Span::styled(format!("{}:", filter_label(key)), label_style),
                Span::raw(" "),
                Span::styled(shown, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ]);
            f.render_widget(Paragraph::new(line), *area);
        }

        let message = if status.invalid {
            Span::styled(ERROR_DATE_RANGE, Style::default().fg(Color::Yellow))
        } else if status.pending {
            Span::styled("…", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw("")
        };
        f.render_widget(Paragraph::new(Line::from(message)), rows[1]);
    }
}

/// Step through `""` followed by `options`, wrapping around.
pub fn cycle_option(current: &str, options: &[String], forward: bool) -> String {
    let choices = options.len() + 1;
    let position = options
        .iter()
        .position(|option| option == current)
        .map(|index| index + 1)
        .unwrap_or(0);
    let next = if forward {
        (position + 1) % choices
    } else {
        (position + choices - 1) % choices
    };
    if next == 0 {
        String::new()
    } else {
        options[next - 1].clone()
    }
}

/// Human label of a filter key
pub fn filter_label(key: &str) -> String {
    match key {
        "jiraId" => "Jira ID".to_string(),
        "entityType" => "Entity".to_string(),
        "changedField" => "Field".to_string(),
        "startDate" => "From".to_string(),
        "endDate" => "To".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

//! Dashboard: one card per collection with its stored record count.

use crate::entities::EntityKind;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph},
    Frame,
};
use std::collections::BTreeMap;

/// Shown in place of a count that failed to load
const COUNT_UNAVAILABLE: &str = "—";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountState {
    Loading,
    Loaded(u64),
    Failed(String),
}

pub struct DashboardComponent {
    counts: BTreeMap<EntityKind, CountState>,
}

impl Default for DashboardComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardComponent {
    pub fn new() -> Self {
        Self {
            counts: EntityKind::ALL.iter().map(|kind| (*kind, CountState::Loading)).collect(),
        }
    }

    pub fn count(&self, kind: EntityKind) -> &CountState {
        self.counts.get(&kind).unwrap_or(&CountState::Loading)
    }

    fn card_label(kind: EntityKind) -> &'static str {
        match kind {
            EntityKind::Projects => "Projects",
            EntityKind::Issues => "Issues",
            EntityKind::Audit => "Audit Trails",
        }
    }
}

impl Component for DashboardComponent {
    fn init(&mut self) -> Action {
        Action::RefreshDashboard
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('R') | KeyCode::Char('r') => {
                for state in self.counts.values_mut() {
                    *state = CountState::Loading;
                }
                Action::RefreshDashboard
            }
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::CountsLoaded(counts) => {
                for (kind, result) in counts {
                    let state = match result {
                        Ok(count) => CountState::Loaded(count),
                        Err(e) => CountState::Failed(e),
                    };
                    self.counts.insert(kind, state);
                }
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(7), Constraint::Min(0)])
            .split(rect);

        let title = Paragraph::new(Line::from(Span::styled(
            "Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        f.render_widget(title, chunks[0]);

        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 3); 3])
            .split(chunks[1]);

        for (kind, area) in EntityKind::ALL.iter().zip(cards.iter()) {
            let (value, color) = match self.count(*kind) {
                CountState::Loading => ("…".to_string(), Color::DarkGray),
                CountState::Loaded(count) => (count.to_string(), Color::Cyan),
                CountState::Failed(_) => (COUNT_UNAVAILABLE.to_string(), Color::Red),
            };

            let card = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(Self::card_label(*kind))
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            f.render_widget(card, *area);
        }
    }
}

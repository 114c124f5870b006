//! Modal dialogs: help, log viewer and error messages.

use crate::constants::{DIALOG_TITLE_HELP, DIALOG_TITLE_LOGS};
use crate::logger::Logger;
use crate::ui::core::{
    actions::{Action, DialogType},
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

const HELP_CONTENT: &str = r"
JIRABOARD - Jira integration dashboard
======================================

NAVIGATION
----------
Tab/S-Tab   Next/previous view
1-4         Dashboard, Projects, Issues, Audit
←↑→↓ hjkl   Move the cell cursor
Enter       Expand/collapse the selected cell
Click       Expand/collapse a cell

FILTERS
-------
/           Edit filters
Tab/S-Tab   Next/previous filter field
←/→         Choose a value (fields with options)
Typing      Edit a text or date field (dates as YYYY-MM-DD)
Backspace   Delete a character
Esc/Enter   Stop editing filters
c           Reset all filters

PAGINATION
----------
n/p         Next/previous page
+/-         Larger/smaller page size

ACTIONS
-------
s           Sync the collection with Jira
x           Export the collection to a spreadsheet
R           Reload the current page (dashboard: counts)

GENERAL
-------
G           Show logs
?           Toggle this help
q/Ctrl+C    Quit
";

pub struct DialogComponent {
    pub dialog_type: Option<DialogType>,
    pub scroll_offset: usize,
    pub scrollbar_state: ScrollbarState,
    logger: Logger,
}

impl DialogComponent {
    pub fn new(logger: Logger) -> Self {
        Self {
            dialog_type: None,
            scroll_offset: 0,
            scrollbar_state: ScrollbarState::new(0),
            logger,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dialog_type.is_some()
    }

    fn clear_dialog(&mut self) {
        self.dialog_type = None;
        self.scroll_offset = 0;
        self.scrollbar_state = ScrollbarState::new(0);
    }

    fn scroll(&mut self, key: KeyCode) -> bool {
        self.scroll_offset = match key {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_offset.saturating_add(1),
            KeyCode::PageUp => self.scroll_offset.saturating_sub(10),
            KeyCode::PageDown => self.scroll_offset.saturating_add(10),
            KeyCode::Home => 0,
            KeyCode::End => usize::MAX,
            _ => return false,
        };
        self.scrollbar_state = self.scrollbar_state.position(self.scroll_offset);
        true
    }

    fn render_scrollable(&mut self, f: &mut Frame, area: Rect, title: &str, content: &str, color: Color) {
        let dialog_area = LayoutManager::centered_rect(90, 90, area);
        f.render_widget(Clear, dialog_area);

        let lines: Vec<&str> = content.lines().collect();
        let total_lines = lines.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        let max_scroll = total_lines.saturating_sub(visible_height);
        let clamped_offset = self.scroll_offset.min(max_scroll);
        self.scroll_offset = clamped_offset;

        self.scrollbar_state = self
            .scrollbar_state
            .content_length(total_lines)
            .viewport_content_length(visible_height)
            .position(clamped_offset);

        let visible_text = lines
            .iter()
            .skip(clamped_offset)
            .take(visible_height)
            .copied()
            .collect::<Vec<_>>()
            .join("\n");

        let paragraph = Paragraph::new(visible_text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title.to_string())
                    .title_alignment(Alignment::Center)
                    .border_style(Style::default().fg(color)),
            )
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Left);

        f.render_widget(paragraph, dialog_area);

        if total_lines > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"))
                .track_symbol(Some("│"))
                .thumb_symbol("▐")
                .style(Style::default().fg(Color::Gray))
                .thumb_style(Style::default().fg(Color::White));

            f.render_stateful_widget(scrollbar, dialog_area, &mut self.scrollbar_state);
        }
    }

    fn render_error_dialog(&self, f: &mut Frame, area: Rect, message: &str) {
        let dialog_area = LayoutManager::centered_rect_lines(70, 8, area);
        f.render_widget(Clear, dialog_area);

        let paragraph = Paragraph::new(format!("{}\n\nPress any key to continue", message))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("⚠ Error")
                    .style(Style::default().fg(Color::Red)),
            )
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true });

        f.render_widget(paragraph, dialog_area);
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match &self.dialog_type {
            None => Action::None,
            Some(DialogType::Error(_)) => Action::HideDialog,
            Some(DialogType::Help) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::HideDialog,
                code => {
                    self.scroll(code);
                    Action::None
                }
            },
            Some(DialogType::Logs) => match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::HideDialog,
                code => {
                    self.scroll(code);
                    Action::None
                }
            },
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                self.clear_dialog();
                self.dialog_type = Some(dialog_type);
                Action::None
            }
            Action::HideDialog => {
                self.clear_dialog();
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        match self.dialog_type.clone() {
            Some(DialogType::Help) => {
                self.render_scrollable(f, rect, DIALOG_TITLE_HELP, HELP_CONTENT, Color::Cyan);
            }
            Some(DialogType::Logs) => {
                let logs = self.logger.get_logs();
                let content = if logs.is_empty() {
                    "No logs yet".to_string()
                } else {
                    logs.join("\n")
                };
                self.render_scrollable(f, rect, DIALOG_TITLE_LOGS, &content, Color::Gray);
            }
            Some(DialogType::Error(message)) => self.render_error_dialog(f, rect, &message),
            None => {}
        }
    }
}

//! Sidebar navigation between the dashboard and the entity pages.

use crate::entities::View;
use crate::ui::core::{actions::Action, Component};
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct SidebarComponent {
    pub selection: View,
    list_state: ListState,
    area: Rect,
}

impl Default for SidebarComponent {
    fn default() -> Self {
        Self::new(View::default())
    }
}

impl SidebarComponent {
    pub fn new(selection: View) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(selection.position()));
        Self {
            selection,
            list_state,
            area: Rect::default(),
        }
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, _key: KeyEvent) -> Action {
        // View switching keys are global and handled by the app component
        Action::None
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        let area = self.area;
        let is_in_area = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row > area.y
            && mouse.row < area.y + area.height.saturating_sub(1);

        if !is_in_area {
            return Action::None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let clicked_index = (mouse.row - area.y - 1) as usize;
                match View::ALL.get(clicked_index) {
                    Some(view) => Action::NavigateTo(*view),
                    None => Action::None,
                }
            }
            MouseEventKind::ScrollUp => Action::PreviousView,
            MouseEventKind::ScrollDown => Action::NextView,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        if let Action::NavigateTo(view) = &action {
            self.selection = *view;
            self.list_state.select(Some(view.position()));
        }
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.area = rect;

        let items: Vec<ListItem> = View::ALL
            .iter()
            .enumerate()
            .map(|(index, view)| {
                let selected = *view == self.selection;
                let style = if selected {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{} ", index + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(view.label(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Navigation")
                    .title_style(Style::default().fg(Color::White))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_symbol("▶ ")
            .style(Style::default().fg(Color::White));

        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}

//! A mounted entity page: filter bar, data table and pagination control over
//! one [`GridController`].

use crate::entities::Record;
use crate::grid::table::CellRef;
use crate::grid::{GridCommand, GridController, PageSize};
use crate::ui::components::data_table::{render_data_table, CellHitMap, DataTableProps};
use crate::ui::components::filter_bar::{cycle_option, FilterBar, FilterBarStatus};
use crate::ui::components::pagination_bar::render_pagination_bar;
use crate::ui::components::status_bar::{StatusLine, PAGE_HINTS};
use crate::ui::core::{actions::Action, Component};
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::format_last_synced;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use log::{debug, warn};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Instant;

pub struct EntityPage<T: Record> {
    controller: GridController<T>,
    filter_bar: FilterBar,
    cursor: CellRef,
    hits: CellHitMap,
}

impl<T: Record> EntityPage<T> {
    pub fn new(page_size: PageSize) -> Self {
        Self::with_controller(GridController::new(page_size))
    }

    pub fn with_controller(controller: GridController<T>) -> Self {
        Self {
            controller,
            filter_bar: FilterBar::new(),
            cursor: CellRef::new(0, 0),
            hits: Vec::new(),
        }
    }

    pub fn controller(&self) -> &GridController<T> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GridController<T> {
        &mut self.controller
    }

    pub fn cursor(&self) -> CellRef {
        self.cursor
    }

    /// True while keystrokes go to the filter inputs
    pub fn is_editing(&self) -> bool {
        self.filter_bar.focused
    }

    pub fn status_line(&self, now: Instant) -> StatusLine<'_> {
        if let Some(notice) = self.controller.notice(now) {
            StatusLine::Notice(notice)
        } else if self.controller.sync_pending() {
            StatusLine::Busy("🔄 Syncing...")
        } else if self.controller.export_pending() {
            StatusLine::Busy("📄 Exporting...")
        } else {
            StatusLine::Hints(PAGE_HINTS)
        }
    }

    fn commands(&self, commands: Vec<GridCommand>) -> Action {
        if commands.is_empty() {
            Action::None
        } else {
            Action::RunCommands {
                kind: T::KIND,
                instance: self.controller.instance(),
                commands,
            }
        }
    }

    fn clamp_cursor(&mut self) {
        let rows = self.controller.rows().len();
        let cols = self.controller.columns().len();
        self.cursor.row = self.cursor.row.min(rows.saturating_sub(1));
        self.cursor.col = self.cursor.col.min(cols.saturating_sub(1));
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        self.cursor.row = self.cursor.row.saturating_add_signed(d_row);
        self.cursor.col = self.cursor.col.saturating_add_signed(d_col);
        self.clamp_cursor();
    }

    fn toggle_cell(&mut self, cell: CellRef) {
        if let Some(expanded) = self.controller.toggle_cell(cell) {
            debug!(
                "{}: cell ({}, {}) {}",
                T::KIND,
                cell.row,
                cell.col,
                if expanded { "expanded" } else { "collapsed" }
            );
        }
    }

    fn set_filter(&mut self, key: &str, value: &str) {
        if let Err(e) = self.controller.set_filter(key, value, Instant::now()) {
            warn!("{}", e);
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Action {
        let spec = *self.controller.spec();
        let Some(filter_key) = self.filter_bar.selected_key(&spec) else {
            self.filter_bar.focused = false;
            return Action::None;
        };
        let current = self.controller.filters().get(filter_key).unwrap_or_default().to_string();
        let options = self.controller.options_for(filter_key).to_vec();
        let cycles = spec.has_options(filter_key) && !options.is_empty();

        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.filter_bar.focused = false,
            KeyCode::Tab => self.filter_bar.next_field(&spec),
            KeyCode::BackTab => self.filter_bar.prev_field(&spec),
            KeyCode::Right | KeyCode::Left if cycles => {
                let next = cycle_option(&current, &options, key.code == KeyCode::Right);
                self.set_filter(filter_key, &next);
            }
            KeyCode::Backspace => {
                let mut value = current;
                if cycles {
                    value.clear();
                } else {
                    value.pop();
                }
                self.set_filter(filter_key, &value);
            }
            KeyCode::Char(c) if !cycles => {
                let mut value = current;
                value.push(c);
                self.set_filter(filter_key, &value);
            }
            _ => {}
        }
        Action::None
    }
}

impl<T: Record> Component for EntityPage<T> {
    fn init(&mut self) -> Action {
        let commands = self.controller.mount();
        self.commands(commands)
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        if self.filter_bar.focused {
            return self.handle_filter_key(key);
        }

        let commands = match key.code {
            KeyCode::Char('/') => {
                self.filter_bar.focused = true;
                Vec::new()
            }
            KeyCode::Char('n') => self.controller.next_page(),
            KeyCode::Char('p') => self.controller.prev_page(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.controller.larger_page_size(),
            KeyCode::Char('-') => self.controller.smaller_page_size(),
            KeyCode::Char('s') => self.controller.trigger_sync(),
            KeyCode::Char('x') => self.controller.trigger_export(Local::now().date_naive()),
            KeyCode::Char('R') => self.controller.refetch(),
            KeyCode::Char('c') => self.controller.reset(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1, 0);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1, 0);
                Vec::new()
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.move_cursor(0, -1);
                Vec::new()
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.move_cursor(0, 1);
                Vec::new()
            }
            KeyCode::Enter => {
                self.toggle_cell(self.cursor);
                Vec::new()
            }
            _ => Vec::new(),
        };
        self.commands(commands)
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Action {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        let hit = self.hits.iter().find(|(area, _)| {
            mouse.column >= area.x
                && mouse.column < area.x + area.width
                && mouse.row >= area.y
                && mouse.row < area.y + area.height
        });
        if let Some((_, cell)) = hit.copied() {
            self.cursor = cell;
            self.toggle_cell(cell);
        }
        Action::None
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::PageLoaded { ticket, result } if ticket.kind == T::KIND => {
                let commands = self.controller.on_page_loaded(&ticket, result);
                self.clamp_cursor();
                self.commands(commands)
            }
            Action::FilterOptionsLoaded { kind, instance, result } if kind == T::KIND => {
                if instance == self.controller.instance() {
                    self.controller.on_filter_options_loaded(result);
                } else {
                    debug!("{}: dropping filter options for unmounted page #{}", kind, instance);
                }
                Action::None
            }
            Action::SyncFinished { kind, instance, result } if kind == T::KIND => {
                if instance != self.controller.instance() {
                    debug!("{}: dropping sync result for unmounted page #{}", kind, instance);
                    return Action::None;
                }
                let commands = self.controller.on_sync_finished(result, Instant::now());
                self.commands(commands)
            }
            Action::ExportFinished { kind, instance, result } if kind == T::KIND => {
                if instance == self.controller.instance() {
                    self.controller.on_export_finished(result, Instant::now());
                } else {
                    debug!("{}: dropping export result for unmounted page #{}", kind, instance);
                }
                Action::None
            }
            _ => action,
        }
    }

    fn on_tick(&mut self, now: Instant) -> Action {
        let commands = self.controller.tick(now);
        self.commands(commands)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let areas = LayoutManager::page_layout(rect);
        let controller = &self.controller;

        let mut header = vec![Span::styled(
            T::KIND.title(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let Some(synced) = controller.last_synced_at() {
            header.push(Span::styled(
                format!("  •  Last synced {}", format_last_synced(synced)),
                Style::default().fg(Color::Gray),
            ));
        }
        if controller.sync_pending() {
            header.push(Span::styled("  •  Syncing...", Style::default().fg(Color::Yellow)));
        }
        f.render_widget(Paragraph::new(Line::from(header)), areas.header);

        let spec = controller.spec();
        let status = FilterBarStatus {
            invalid: controller.validation_error().is_some(),
            pending: controller.has_pending_edit(),
            option_counts: spec.keys.iter().map(|key| controller.options_for(key).len()).collect(),
        };
        self.filter_bar.render(f, areas.filters, spec, controller.filters(), status);

        let table_width = areas.table.width.saturating_sub(2);
        let view = controller.table(table_width);
        let title = format!("{} ({} total)", T::KIND.title(), controller.collection().total_count);
        let cursor = (!self.filter_bar.focused).then_some(self.cursor);
        self.hits = render_data_table(
            f,
            areas.table,
            DataTableProps {
                title: &title,
                view: &view,
                cursor,
                loading: controller.loading(),
                error: controller.error(),
            },
        );

        let mut status = controller.page_status();
        if controller.has_pending_edit() {
            status.has_prev = false;
            status.has_next = false;
        }
        render_pagination_bar(f, areas.pagination, status, controller.page_size());
    }
}

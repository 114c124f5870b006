use crate::support::{buffer_text, char_key, key, project_page};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use jiraboard::constants::NO_DATA_AVAILABLE;
use jiraboard::entities::{EntityKind, Project};
use jiraboard::grid::{CellRef, FetchTicket, GridCommand, PageSize};
use jiraboard::ui::components::status_bar::StatusLine;
use jiraboard::ui::components::EntityPage;
use jiraboard::ui::core::{Action, Component};
use jiraboard::ui::layout::LayoutManager;
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use std::time::{Duration, Instant};

fn commands(action: Action) -> Vec<GridCommand> {
    match action {
        Action::RunCommands { kind, commands, .. } => {
            assert_eq!(kind, EntityKind::Projects);
            commands
        }
        Action::None => Vec::new(),
        other => panic!("expected commands, got {:?}", other),
    }
}

fn fetch_ticket(action: Action) -> FetchTicket {
    commands(action)
        .into_iter()
        .find_map(|command| match command {
            GridCommand::Fetch(ticket) => Some(ticket),
            _ => None,
        })
        .expect("a fetch command")
}

fn loaded_page(rows: usize, count: u64) -> EntityPage<Project> {
    let mut page = EntityPage::new(PageSize::default());
    let ticket = fetch_ticket(page.init());
    let follow_up = page.update(Action::PageLoaded {
        ticket,
        result: Ok(project_page(rows, count)),
    });
    assert!(matches!(follow_up, Action::None));
    page
}

fn render(page: &mut EntityPage<Project>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(120, 24)).unwrap();
    terminal.draw(|f| page.render(f, f.area())).unwrap();
    buffer_text(&terminal)
}

#[test]
fn test_empty_page_shows_no_data_row() {
    let mut page = loaded_page(0, 0);
    let text = render(&mut page);

    assert!(text.contains(NO_DATA_AVAILABLE));
    assert!(text.contains("Jira ID"));
    assert!(text.contains("Page 1 of 0"));
}

#[test]
fn test_single_page_renders_rows_and_pagination() {
    let mut page = loaded_page(3, 3);
    let text = render(&mut page);

    assert!(text.contains("Project 2"));
    assert!(text.contains("Projects (3 total)"));
    assert!(text.contains("Page 1 of 1"));
    assert!(!text.contains(NO_DATA_AVAILABLE));
}

#[test]
fn test_mount_requests_options_and_first_page() {
    let mut page: EntityPage<Project> = EntityPage::new(PageSize::default());
    let commands = commands(page.init());
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0], GridCommand::LoadFilterOptions);
}

#[test]
fn test_cursor_moves_and_toggles_cells() {
    let mut page = loaded_page(3, 3);

    page.handle_key_events(key(KeyCode::Down));
    page.handle_key_events(char_key('j'));
    page.handle_key_events(char_key('j'));
    assert_eq!(page.cursor(), CellRef::new(2, 0));

    page.handle_key_events(char_key('l'));
    page.handle_key_events(key(KeyCode::Enter));
    assert!(page.controller().is_expanded(CellRef::new(2, 1)));
    page.handle_key_events(key(KeyCode::Enter));
    assert!(!page.controller().is_expanded(CellRef::new(2, 1)));
}

#[test]
fn test_click_toggles_cell() {
    let mut page = loaded_page(3, 3);
    render(&mut page);

    // Table border, then the header row, then the first data row
    let table = LayoutManager::page_layout(Rect::new(0, 0, 120, 24)).table;
    let click = MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: table.x + 2,
        row: table.y + 3,
        modifiers: KeyModifiers::NONE,
    };
    page.handle_mouse_events(click);

    assert_eq!(page.cursor(), CellRef::new(1, 0));
    assert!(page.controller().is_expanded(CellRef::new(1, 0)));
}

#[test]
fn test_sync_key_runs_sync_once() {
    let mut page = loaded_page(3, 3);

    assert_eq!(commands(page.handle_key_events(char_key('s'))), vec![GridCommand::Sync]);
    assert!(commands(page.handle_key_events(char_key('s'))).is_empty());
    assert!(matches!(page.status_line(Instant::now()), StatusLine::Busy(_)));

    let instance = page.controller().instance();
    let refetch = commands(page.update(Action::SyncFinished {
        kind: EntityKind::Projects,
        instance,
        result: Ok(()),
    }));
    assert_eq!(refetch.len(), 1);
    assert!(matches!(refetch[0], GridCommand::Fetch(_)));
    assert!(matches!(page.status_line(Instant::now()), StatusLine::Notice(_)));
}

#[test]
fn test_results_for_other_mounts_are_dropped() {
    let mut page = loaded_page(3, 3);
    page.handle_key_events(char_key('s'));

    let action = page.update(Action::SyncFinished {
        kind: EntityKind::Projects,
        instance: page.controller().instance() + 1000,
        result: Ok(()),
    });
    assert!(matches!(action, Action::None));
    assert!(page.controller().sync_pending());

    // Other collections' results pass through untouched
    let passthrough = page.update(Action::SyncFinished {
        kind: EntityKind::Issues,
        instance: 1,
        result: Ok(()),
    });
    assert!(matches!(passthrough, Action::SyncFinished { .. }));
}

#[test]
fn test_typed_filter_is_fetched_after_debounce() {
    let mut page = loaded_page(3, 3);

    page.handle_key_events(char_key('/'));
    assert!(page.is_editing());
    page.handle_key_events(char_key('1'));
    page.handle_key_events(char_key('0'));
    page.handle_key_events(key(KeyCode::Backspace));
    page.handle_key_events(key(KeyCode::Esc));
    assert!(!page.is_editing());

    assert!(commands(page.on_tick(Instant::now())).is_empty());
    let ticket = fetch_ticket(page.on_tick(Instant::now() + Duration::from_secs(1)));
    assert_eq!(ticket.query.filters.get("jiraId"), Some("1"));
}

#[test]
fn test_option_filter_cycles_loaded_values() {
    let mut page = loaded_page(3, 3);
    let instance = page.controller().instance();
    let mut options = jiraboard::backend::FilterOptions::new();
    options.insert("status".to_string(), vec!["Open".to_string(), "Closed".to_string()]);
    page.update(Action::FilterOptionsLoaded {
        kind: EntityKind::Projects,
        instance,
        result: Ok(options),
    });

    page.handle_key_events(char_key('/'));
    // jiraId -> name -> status
    page.handle_key_events(key(KeyCode::Tab));
    page.handle_key_events(key(KeyCode::Tab));
    page.handle_key_events(key(KeyCode::Right));
    assert_eq!(page.controller().filters().get("status"), Some("Open"));

    // Typing does not edit an option field
    page.handle_key_events(char_key('z'));
    assert_eq!(page.controller().filters().get("status"), Some("Open"));

    page.handle_key_events(key(KeyCode::Backspace));
    assert_eq!(page.controller().filters().get("status"), Some(""));
}

#[test]
fn test_export_key_requests_dated_file() {
    let mut page = loaded_page(3, 3);
    let commands = commands(page.handle_key_events(char_key('x')));
    match &commands[..] {
        [GridCommand::Export { file_name }] => {
            assert!(file_name.starts_with("projects_"));
            assert!(file_name.ends_with(".xlsx"));
        }
        other => panic!("expected one export command, got {:?}", other),
    }
}

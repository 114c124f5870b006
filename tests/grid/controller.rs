use crate::support::{audit_page, project_page};
use chrono::NaiveDate;
use jiraboard::backend::FilterOptions;
use jiraboard::constants::{ERROR_SYNC_FAILED, SUCCESS_SYNC};
use jiraboard::entities::{AuditRecord, Project};
use jiraboard::grid::{CellRef, FetchTicket, FilterOptionsState, GridCommand, GridController, PageSize};
use std::time::{Duration, Instant};

const DEBOUNCE: Duration = Duration::from_millis(400);

fn projects() -> GridController<Project> {
    GridController::with_debounce(PageSize::default(), DEBOUNCE)
}

fn fetches(commands: &[GridCommand]) -> Vec<FetchTicket> {
    commands
        .iter()
        .filter_map(|command| match command {
            GridCommand::Fetch(ticket) => Some(ticket.clone()),
            _ => None,
        })
        .collect()
}

fn single_fetch(commands: &[GridCommand]) -> FetchTicket {
    let tickets = fetches(commands);
    assert_eq!(tickets.len(), 1, "expected exactly one fetch in {:?}", commands);
    tickets.into_iter().next().unwrap()
}

/// Mount and deliver the first page
fn mounted_with(rows: usize, count: u64) -> GridController<Project> {
    let mut grid = projects();
    let ticket = single_fetch(&grid.mount());
    grid.on_page_loaded(&ticket, Ok(project_page(rows, count)));
    grid
}

#[test]
fn test_mount_loads_options_and_first_page() {
    let mut grid = projects();
    let commands = grid.mount();

    assert_eq!(commands[0], GridCommand::LoadFilterOptions);
    let ticket = single_fetch(&commands);
    assert_eq!(ticket.instance, grid.instance());
    assert_eq!(ticket.query.window.page(), 1);
    assert_eq!(ticket.query.window.page_size().get(), 10);
    assert!(grid.loading());
    assert_eq!(grid.filter_options(), &FilterOptionsState::Loading);
}

#[test]
fn test_each_mount_gets_its_own_instance() {
    let a = projects();
    let b = projects();
    assert_ne!(a.instance(), b.instance());
}

#[test]
fn test_filtered_single_page_disables_both_controls() {
    let mut grid = projects();
    let first = single_fetch(&grid.mount());
    let start = Instant::now();

    grid.set_filter("status", "Open", start).unwrap();
    assert!(grid.tick(start + Duration::from_millis(100)).is_empty());
    let filtered = single_fetch(&grid.tick(start + DEBOUNCE));
    assert_eq!(filtered.query.filters.get("status"), Some("Open"));

    assert!(grid.on_page_loaded(&filtered, Ok(project_page(3, 3))).is_empty());
    // The unfiltered response comes back late and must not overwrite the rows
    assert!(grid.on_page_loaded(&first, Ok(project_page(10, 40))).is_empty());

    assert_eq!(grid.rows().len(), 3);
    let status = grid.page_status();
    assert_eq!(status.label(), "Page 1 of 1");
    assert!(!status.has_prev);
    assert!(!status.has_next);
    assert!(grid.next_page().is_empty());
    assert!(grid.prev_page().is_empty());
    assert_eq!(grid.table(120).row_count(), 3);
}

#[test]
fn test_unknown_filter_key_is_an_error() {
    let mut grid = projects();
    assert!(grid.set_filter("priority", "High", Instant::now()).is_err());
    assert!(!grid.has_pending_edit());
}

#[test]
fn test_incomplete_date_range_is_not_fetched() {
    let mut grid: GridController<AuditRecord> = GridController::with_debounce(PageSize::default(), DEBOUNCE);
    let ticket = single_fetch(&grid.mount());
    grid.on_page_loaded(&ticket, Ok(audit_page(4, 4)));
    let start = Instant::now();

    grid.set_filter("startDate", "2025-01-01", start).unwrap();
    assert!(grid.tick(start + DEBOUNCE).is_empty());
    assert!(grid.validation_error().is_some());
    // Previous rows stay on screen
    assert_eq!(grid.rows().len(), 4);

    grid.set_filter("endDate", "2025-01-31", start + DEBOUNCE).unwrap();
    let ticket = single_fetch(&grid.tick(start + DEBOUNCE * 2));
    assert!(grid.validation_error().is_none());
    assert_eq!(ticket.query.filters.get("startDate"), Some("2025-01-01"));
    assert_eq!(ticket.query.filters.get("endDate"), Some("2025-01-31"));
}

#[test]
fn test_successful_sync_refetches_once() {
    let mut grid = mounted_with(3, 3);
    let now = Instant::now();

    assert_eq!(grid.trigger_sync(), vec![GridCommand::Sync]);
    assert!(grid.sync_pending());
    assert!(grid.trigger_sync().is_empty());

    let commands = grid.on_sync_finished(Ok(()), now);
    let ticket = single_fetch(&commands);
    assert_eq!(&ticket.query, grid.committed());
    assert!(!grid.sync_pending());
    assert_eq!(grid.notice(now).unwrap().text, SUCCESS_SYNC);

    // The message expires on its own
    grid.tick(now + Duration::from_secs(5));
    assert!(grid.notice(now + Duration::from_secs(5)).is_none());
}

#[test]
fn test_failed_sync_does_not_refetch() {
    let mut grid = mounted_with(3, 3);
    let now = Instant::now();

    grid.trigger_sync();
    let commands = grid.on_sync_finished(Err("503 Service Unavailable".to_string()), now);
    assert!(commands.is_empty());
    assert_eq!(grid.notice(now).unwrap().text, ERROR_SYNC_FAILED);
    assert_eq!(grid.rows().len(), 3);
}

#[test]
fn test_page_past_the_end_is_clamped() {
    let mut grid = mounted_with(10, 48);

    let far = single_fetch(&grid.set_page(5));
    assert_eq!(far.query.window.page(), 5);

    // Records were deleted in the meantime: only 12 left
    let commands = grid.on_page_loaded(&far, Ok(project_page(0, 12)));
    let clamped = single_fetch(&commands);
    assert_eq!(clamped.query.window.page(), 2);

    grid.on_page_loaded(&clamped, Ok(project_page(2, 12)));
    assert_eq!(grid.page_status().label(), "Page 2 of 2");
}

#[test]
fn test_empty_collection_is_not_clamped() {
    let grid = mounted_with(0, 0);
    assert_eq!(grid.page_status().label(), "Page 1 of 0");
    assert_eq!(grid.table(80).row_count(), 0);
}

#[test]
fn test_emptied_collection_returns_to_first_page() {
    let mut grid = mounted_with(10, 48);
    let page_five = single_fetch(&grid.set_page(5));

    let commands = grid.on_page_loaded(&page_five, Ok(project_page(0, 0)));
    let clamped = single_fetch(&commands);
    assert_eq!(clamped.query.window.page(), 1);

    assert!(grid.on_page_loaded(&clamped, Ok(project_page(0, 0))).is_empty());
    let status = grid.page_status();
    assert_eq!(status.label(), "Page 1 of 0");
    assert!(!status.has_prev);
    assert!(!status.has_next);
}

#[test]
fn test_paging_waits_for_pending_filter_edit() {
    let mut grid = mounted_with(10, 50);
    let page_three = single_fetch(&grid.set_page(3));
    grid.on_page_loaded(&page_three, Ok(project_page(10, 50)));
    let start = Instant::now();

    grid.set_filter("status", "Done", start).unwrap();
    assert!(grid.next_page().is_empty());
    assert!(grid.prev_page().is_empty());
    assert!(grid.larger_page_size().is_empty());
    assert!(grid.has_pending_edit());

    let filtered = single_fetch(&grid.tick(start + DEBOUNCE));
    assert_eq!(filtered.query.filters.get("status"), Some("Done"));
    assert_eq!(filtered.query.window.page(), 1);
}

#[test]
fn test_next_and_previous_page() {
    let mut grid = mounted_with(10, 25);

    let next = single_fetch(&grid.next_page());
    assert_eq!(next.query.window.page(), 2);
    grid.on_page_loaded(&next, Ok(project_page(10, 25)));

    let prev = single_fetch(&grid.prev_page());
    assert_eq!(prev.query.window.page(), 1);
}

#[test]
fn test_page_size_change_returns_to_first_page() {
    let mut grid = mounted_with(10, 60);
    let next = single_fetch(&grid.next_page());
    grid.on_page_loaded(&next, Ok(project_page(10, 60)));

    let ticket = single_fetch(&grid.larger_page_size());
    assert_eq!(ticket.query.window.page(), 1);
    assert_eq!(ticket.query.window.page_size().get(), 20);
}

#[test]
fn test_reset_clears_filters() {
    let mut grid = mounted_with(3, 3);
    let start = Instant::now();

    grid.set_filter("name", "core", start).unwrap();
    let ticket = single_fetch(&grid.tick(start + DEBOUNCE));
    grid.on_page_loaded(&ticket, Ok(project_page(1, 1)));

    let ticket = single_fetch(&grid.reset());
    assert!(ticket.query.filters.is_unconstrained());
}

#[test]
fn test_fetch_error_keeps_rows() {
    let mut grid = mounted_with(3, 3);
    let ticket = single_fetch(&grid.refetch());

    grid.on_page_loaded(&ticket, Err("connection refused".to_string()));
    assert_eq!(grid.error(), Some("connection refused"));
    assert_eq!(grid.rows().len(), 3);
    assert!(!grid.loading());
}

#[test]
fn test_mismatched_page_kind_is_reported() {
    let mut grid = projects();
    let ticket = single_fetch(&grid.mount());

    grid.on_page_loaded(&ticket, Ok(audit_page(2, 2)));
    assert!(grid.error().unwrap().contains("projects"));
    assert!(grid.rows().is_empty());
}

#[test]
fn test_cell_expansion_resets_on_new_rows() {
    let mut grid = mounted_with(3, 3);

    assert_eq!(grid.toggle_cell(CellRef::new(3, 0)), None);
    assert_eq!(grid.toggle_cell(CellRef::new(0, 99)), None);
    assert_eq!(grid.toggle_cell(CellRef::new(1, 2)), Some(true));
    assert!(grid.is_expanded(CellRef::new(1, 2)));
    assert!(!grid.is_expanded(CellRef::new(1, 1)));

    let ticket = single_fetch(&grid.refetch());
    grid.on_page_loaded(&ticket, Ok(project_page(3, 3)));
    assert!(!grid.is_expanded(CellRef::new(1, 2)));
}

#[test]
fn test_export_is_named_after_entity_and_date() {
    let mut grid = mounted_with(3, 3);
    let today = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();

    assert_eq!(
        grid.trigger_export(today),
        vec![GridCommand::Export {
            file_name: "projects_2025-03-14.xlsx".to_string()
        }]
    );
    assert!(grid.export_pending());
    assert!(grid.trigger_export(today).is_empty());

    grid.on_export_finished(Err("disk full".to_string()), Instant::now());
    assert!(!grid.export_pending());
}

#[test]
fn test_filter_options() {
    let mut grid = projects();
    let mut options = FilterOptions::new();
    options.insert("status".to_string(), vec!["Open".to_string(), "Closed".to_string()]);

    grid.on_filter_options_loaded(Ok(options));
    assert_eq!(grid.options_for("status"), ["Open".to_string(), "Closed".to_string()]);
    assert!(grid.options_for("name").is_empty());

    grid.on_filter_options_loaded(Err("500".to_string()));
    assert!(grid.options_for("status").is_empty());
}

use jiraboard::entities::EntityKind;
use jiraboard::grid::query::{Commit, QueryState};
use jiraboard::grid::PageSize;
use std::time::{Duration, Instant};

const DEBOUNCE: Duration = Duration::from_millis(400);

fn issues_query() -> QueryState {
    QueryState::with_debounce(EntityKind::Issues.filter_spec(), PageSize::default(), DEBOUNCE)
}

#[test]
fn test_filter_edit_commits_after_quiet_period() {
    let mut query = issues_query();
    let start = Instant::now();

    assert_eq!(query.set_filter("title", "log", start).unwrap(), Commit::Scheduled);
    assert!(query.has_pending_edit());
    assert_eq!(query.committed().filters.get("title"), Some(""));

    assert_eq!(query.tick(start + Duration::from_millis(399)), Commit::Unchanged);
    assert_eq!(query.tick(start + DEBOUNCE), Commit::Changed);
    assert_eq!(query.committed().filters.get("title"), Some("log"));
    assert!(!query.has_pending_edit());
}

#[test]
fn test_rapid_edits_commit_only_final_value() {
    let mut query = issues_query();
    let start = Instant::now();

    query.set_filter("title", "l", start).unwrap();
    query.set_filter("title", "lo", start + Duration::from_millis(100)).unwrap();
    query.set_filter("title", "login", start + Duration::from_millis(200)).unwrap();

    // 400ms after the first edit but not after the last
    assert_eq!(query.tick(start + Duration::from_millis(450)), Commit::Unchanged);
    assert_eq!(query.committed().filters.get("title"), Some(""));

    assert_eq!(query.tick(start + Duration::from_millis(600)), Commit::Changed);
    assert_eq!(query.committed().filters.get("title"), Some("login"));
    assert_eq!(query.tick(start + Duration::from_millis(700)), Commit::Unchanged);
}

#[test]
fn test_filter_change_returns_to_first_page() {
    let mut query = issues_query();
    let start = Instant::now();

    assert!(query.set_page(3).changed());
    assert_eq!(query.committed().window.page(), 3);

    query.set_filter("status", "Done", start).unwrap();
    assert_eq!(query.window().page(), 1);
    query.tick(start + DEBOUNCE);
    assert_eq!(query.committed().window.page(), 1);
}

#[test]
fn test_page_size_change_commits_immediately_on_first_page() {
    let mut query = issues_query();

    query.set_page(2);
    let commit = query.set_page_size(PageSize::new(50).unwrap());
    assert_eq!(commit, Commit::Changed);
    assert_eq!(query.committed().window.page(), 1);
    assert_eq!(query.committed().window.page_size().get(), 50);
}

#[test]
fn test_set_page_below_one_is_ignored() {
    let mut query = issues_query();
    assert_eq!(query.set_page(0), Commit::Unchanged);
    assert_eq!(query.set_page(1), Commit::Unchanged);
    assert_eq!(query.committed().window.page(), 1);
}

#[test]
fn test_page_changes_wait_for_pending_filter_edit() {
    let mut query = issues_query();
    let start = Instant::now();
    query.set_page(3);

    query.set_filter("priority", "High", start).unwrap();
    assert_eq!(query.set_page(2), Commit::Unchanged);
    assert_eq!(query.set_page_size(PageSize::new(50).unwrap()), Commit::Unchanged);
    assert!(query.has_pending_edit());
    assert_eq!(query.committed().filters.get("priority"), Some(""));
    assert_eq!(query.committed().window.page(), 3);

    assert_eq!(query.tick(start + DEBOUNCE), Commit::Changed);
    assert_eq!(query.committed().filters.get("priority"), Some("High"));
    assert_eq!(query.committed().window.page(), 1);
    assert_eq!(query.committed().window.page_size().get(), 10);

    assert!(query.set_page(2).changed());
}

#[test]
fn test_reset_keeps_page_size() {
    let mut query = issues_query();
    let start = Instant::now();

    query.set_page_size(PageSize::new(20).unwrap());
    query.set_filter("status", "Done", start).unwrap();
    query.tick(start + DEBOUNCE);
    query.set_page(2);

    assert_eq!(query.reset(), Commit::Changed);
    assert!(query.committed().filters.is_unconstrained());
    assert_eq!(query.committed().window.page(), 1);
    assert_eq!(query.committed().window.page_size().get(), 20);

    assert_eq!(query.reset(), Commit::Unchanged);
}

#[test]
fn test_invalid_date_range_is_reported_on_committed_query() {
    let mut query = QueryState::with_debounce(EntityKind::Audit.filter_spec(), PageSize::default(), DEBOUNCE);
    let start = Instant::now();

    query.set_filter("startDate", "2025-01-01", start).unwrap();
    query.tick(start + DEBOUNCE);
    assert!(query.validation().is_err());

    query.set_filter("endDate", "2025-01-31", start + DEBOUNCE).unwrap();
    query.tick(start + DEBOUNCE * 2);
    assert!(query.validation().is_ok());
}

#[test]
fn test_clamp_page() {
    let mut query = issues_query();
    query.set_page(5);

    assert_eq!(query.clamp_page(7), Commit::Unchanged);
    assert_eq!(query.clamp_page(2), Commit::Changed);
    assert_eq!(query.committed().window.page(), 2);

    // No pages at all means page 1
    assert_eq!(query.clamp_page(0), Commit::Changed);
    assert_eq!(query.committed().window.page(), 1);
    assert_eq!(query.clamp_page(0), Commit::Unchanged);
}

use crate::support::MockBackend;
use jiraboard::entities::{EntityKind, Project};
use jiraboard::grid::{GridCommand, GridController, PageSize};
use jiraboard::ui::core::{Action, TaskManager};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

async fn next_action(rx: &mut UnboundedReceiver<Action>) -> Action {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("background task should report back")
        .expect("channel should stay open")
}

#[tokio::test]
async fn test_mount_commands_report_results() {
    let backend = Arc::new(MockBackend::default());
    let dir = tempfile::tempdir().unwrap();
    let (mut manager, mut rx) = TaskManager::new(backend.clone(), dir.path().to_path_buf());

    let mut grid: GridController<Project> = GridController::new(PageSize::new(5).unwrap());
    let commands = grid.mount();
    let ids = manager.run_commands(EntityKind::Projects, grid.instance(), commands);
    assert_eq!(ids.len(), 2);

    let mut loaded_page = false;
    let mut loaded_options = false;
    for _ in 0..2 {
        match next_action(&mut rx).await {
            Action::PageLoaded { ticket, result } => {
                assert_eq!(ticket.instance, grid.instance());
                assert!(grid.on_page_loaded(&ticket, result).is_empty());
                loaded_page = true;
            }
            Action::FilterOptionsLoaded { kind, instance, result } => {
                assert_eq!(kind, EntityKind::Projects);
                assert_eq!(instance, grid.instance());
                grid.on_filter_options_loaded(result);
                loaded_options = true;
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
    assert!(loaded_page && loaded_options);
    assert_eq!(grid.rows().len(), 3);
    assert_eq!(grid.options_for("status").len(), 2);

    let queries = backend.queries.lock().unwrap();
    let (kind, query) = &queries[0];
    assert_eq!(*kind, EntityKind::Projects);
    assert_eq!(query.page, 1);
    assert_eq!(query.limit, 5);
    assert_eq!(query.filters.len(), 3);
}

#[tokio::test]
async fn test_fetch_failure_is_reported_as_error_text() {
    let backend = Arc::new(MockBackend::default());
    let (mut manager, mut rx) = TaskManager::new(backend, std::env::temp_dir());

    let mut grid: GridController<jiraboard::entities::Issue> = GridController::new(PageSize::default());
    let ticket = grid
        .mount()
        .into_iter()
        .find_map(|command| match command {
            GridCommand::Fetch(ticket) => Some(ticket),
            _ => None,
        })
        .unwrap();
    manager.spawn_fetch(ticket);

    match next_action(&mut rx).await {
        Action::PageLoaded { result, .. } => assert!(result.unwrap_err().contains("no issues fixture")),
        other => panic!("unexpected action {:?}", other),
    }
}

#[tokio::test]
async fn test_sync_reports_outcome() {
    let failing = MockBackend {
        fail_sync: true,
        ..MockBackend::default()
    };
    let (mut manager, mut rx) = TaskManager::new(Arc::new(failing), std::env::temp_dir());

    manager.run_commands(EntityKind::Audit, 9, vec![GridCommand::Sync]);

    match next_action(&mut rx).await {
        Action::SyncFinished { kind, instance, result } => {
            assert_eq!(kind, EntityKind::Audit);
            assert_eq!(instance, 9);
            assert!(result.unwrap_err().contains("connection reset"));
        }
        other => panic!("unexpected action {:?}", other),
    }
}

#[tokio::test]
async fn test_export_saves_document() {
    let dir = tempfile::tempdir().unwrap();
    let (mut manager, mut rx) = TaskManager::new(Arc::new(MockBackend::default()), dir.path().to_path_buf());

    manager.spawn_export(EntityKind::Issues, 3, "issues_2025-03-14.xlsx".to_string());

    match next_action(&mut rx).await {
        Action::ExportFinished { result, .. } => {
            let path = result.unwrap();
            assert_eq!(path, dir.path().join("issues_2025-03-14.xlsx"));
            assert_eq!(std::fs::read(path).unwrap(), b"PK\x03\x04sheet");
        }
        other => panic!("unexpected action {:?}", other),
    }
}

#[tokio::test]
async fn test_counts_report_each_collection() {
    let (mut manager, mut rx) = TaskManager::new(Arc::new(MockBackend::default()), std::env::temp_dir());

    manager.spawn_counts();

    match next_action(&mut rx).await {
        Action::CountsLoaded(counts) => {
            assert_eq!(counts.len(), 3);
            assert_eq!(counts[0], (EntityKind::Projects, Ok(12)));
            assert!(counts[1].1.is_err());
            assert_eq!(counts[2], (EntityKind::Audit, Ok(12)));
        }
        other => panic!("unexpected action {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_all_tasks() {
    let (mut manager, _rx) = TaskManager::new(Arc::new(MockBackend::default()), std::env::temp_dir());

    manager.spawn_counts();
    manager.spawn_filter_options(EntityKind::Projects, 1);
    assert_eq!(manager.task_count(), 2);

    manager.cancel_all_tasks();
    assert_eq!(manager.task_count(), 0);
}

use chrono::NaiveDate;
use jiraboard::constants::ERROR_EXPORT_FAILED;
use jiraboard::entities::EntityKind;
use jiraboard::grid::export::{export_file_name, save_document, ExportTrigger};
use jiraboard::grid::notice::NoticeKind;
use std::path::PathBuf;
use std::time::Instant;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_export_file_name() {
    assert_eq!(export_file_name(EntityKind::Issues, date(2025, 3, 14)), "issues_2025-03-14.xlsx");
    assert_eq!(export_file_name(EntityKind::Projects, date(2025, 12, 1)), "projects_2025-12-01.xlsx");
    assert_eq!(export_file_name(EntityKind::Audit, date(2026, 1, 9)), "audit_2026-01-09.xlsx");
}

#[tokio::test]
async fn test_save_document_writes_file_without_leftovers() {
    let dir = tempfile::tempdir().unwrap();
    let target_dir = dir.path().join("downloads");

    let path = save_document(&target_dir, "issues_2025-03-14.xlsx", b"PK\x03\x04sheet")
        .await
        .unwrap();

    assert_eq!(path, target_dir.join("issues_2025-03-14.xlsx"));
    assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04sheet");

    let entries: Vec<_> = std::fs::read_dir(&target_dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(!target_dir.join("issues_2025-03-14.xlsx.part").exists());
}

#[test]
fn test_trigger_is_single_flight() {
    let mut export = ExportTrigger::new(EntityKind::Issues);
    let today = date(2025, 3, 14);

    assert_eq!(export.trigger(today).as_deref(), Some("issues_2025-03-14.xlsx"));
    assert!(export.is_pending());
    assert!(export.trigger(today).is_none());
}

#[test]
fn test_complete_records_outcome() {
    let mut export = ExportTrigger::new(EntityKind::Audit);
    let now = Instant::now();

    export.trigger(date(2025, 3, 14));
    export.complete(Err("disk full".to_string()), now);
    assert!(!export.is_pending());
    let notice = export.notice(now).unwrap();
    assert_eq!(notice.kind, NoticeKind::Failure);
    assert_eq!(notice.text, ERROR_EXPORT_FAILED);

    export.trigger(date(2025, 3, 14));
    let saved = PathBuf::from("/tmp/audit_2025-03-14.xlsx");
    export.complete(Ok(saved.clone()), now);
    assert_eq!(export.last_saved(), Some(saved.as_path()));
    assert_eq!(export.notice(now).unwrap().kind, NoticeKind::Success);
}

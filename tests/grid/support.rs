#![allow(dead_code)]

use jiraboard::backend::{ListPage, RecordPage};
use jiraboard::entities::{AuditRecord, Project};

pub fn project(id: u32, status: &str) -> Project {
    Project {
        jira_id: format!("{}", 10000 + id),
        name: format!("Project {}", id),
        jira_project_key: format!("P{}", id),
        lead: "Alex".to_string(),
        status: status.to_string(),
        created_at: "2025-01-15T14:30:00".to_string(),
    }
}

pub fn project_page(rows: usize, count: u64) -> RecordPage {
    RecordPage::Projects(ListPage {
        data: (0..rows as u32).map(|i| project(i, "Open")).collect(),
        count,
        last_synced_at: Some("2025-01-15T14:30:00Z".to_string()),
    })
}

pub fn audit_page(rows: usize, count: u64) -> RecordPage {
    RecordPage::Audit(ListPage {
        data: (0..rows)
            .map(|i| AuditRecord {
                entity_type: "issue".to_string(),
                entity_id: format!("{}", i),
                changed_field: "status".to_string(),
                old_value: "Open".to_string(),
                new_value: "Done".to_string(),
                changed_at: "2025-01-15T14:30:00".to_string(),
            })
            .collect(),
        count,
        last_synced_at: None,
    })
}

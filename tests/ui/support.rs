#![allow(dead_code)]

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jiraboard::backend::{Backend, BackendError, FilterOptions, ListPage, ListQuery, RecordPage};
use jiraboard::entities::{EntityKind, Project};
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Mutex;

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

pub fn project_page(rows: usize, count: u64) -> RecordPage {
    RecordPage::Projects(ListPage {
        data: (0..rows)
            .map(|i| Project {
                jira_id: format!("{}", 10000 + i),
                name: format!("Project {}", i),
                jira_project_key: format!("P{}", i),
                lead: "Alex".to_string(),
                status: "Open".to_string(),
                created_at: "2025-01-15T14:30:00".to_string(),
            })
            .collect(),
        count,
        last_synced_at: None,
    })
}

/// Everything drawn to a test terminal, one line per row
pub fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

/// In-memory backend recording the list queries it receives
#[derive(Default)]
pub struct MockBackend {
    pub queries: Mutex<Vec<(EntityKind, ListQuery)>>,
    pub fail_sync: bool,
}

#[async_trait]
impl Backend for MockBackend {
    fn backend_type(&self) -> &str {
        "mock"
    }

    async fn list(&self, kind: EntityKind, query: &ListQuery) -> Result<RecordPage, BackendError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push((kind, query.clone()));
        }
        match kind {
            EntityKind::Projects => Ok(project_page(query.limit.min(3), 3)),
            _ => Err(BackendError::Other(format!("no {} fixture", kind))),
        }
    }

    async fn filter_options(&self, _kind: EntityKind) -> Result<FilterOptions, BackendError> {
        let mut options = FilterOptions::new();
        options.insert("status".to_string(), vec!["Open".to_string(), "Closed".to_string()]);
        Ok(options)
    }

    async fn count(&self, kind: EntityKind) -> Result<u64, BackendError> {
        match kind {
            EntityKind::Issues => Err(BackendError::Status {
                status: 500,
                body: "database unavailable".to_string(),
            }),
            _ => Ok(12),
        }
    }

    async fn sync(&self, _kind: EntityKind) -> Result<(), BackendError> {
        if self.fail_sync {
            Err(BackendError::Network("connection reset".to_string()))
        } else {
            Ok(())
        }
    }

    async fn export(&self, _kind: EntityKind) -> Result<Vec<u8>, BackendError> {
        Ok(b"PK\x03\x04sheet".to_vec())
    }
}

//! Backend abstraction layer.
//!
//! This module defines the request/response contract of the integration
//! backend (list, count, filter options, sync and export per collection),
//! the common data types, and error handling. [`http::HttpBackend`] is the
//! production implementation; tests provide their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::entities::{AuditRecord, EntityKind, Issue, Project};
use crate::grid::query::CommittedQuery;

pub mod http;

pub use http::HttpBackend;

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid data: {0}")]
    Decode(String),

    #[error("Backend error: {0}")]
    Other(String),
}

/// One page of a list response: `{data, count, lastSyncedAt?}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPage<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub last_synced_at: Option<String>,
}

impl<T> Default for ListPage<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            count: 0,
            last_synced_at: None,
        }
    }
}

/// A list response tagged with the collection it came from.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordPage {
    Projects(ListPage<Project>),
    Issues(ListPage<Issue>),
    Audit(ListPage<AuditRecord>),
}

impl RecordPage {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Projects(_) => EntityKind::Projects,
            Self::Issues(_) => EntityKind::Issues,
            Self::Audit(_) => EntityKind::Audit,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Projects(page) => page.data.len(),
            Self::Issues(page) => page.data.len(),
            Self::Audit(page) => page.data.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distinct observed values per filter key, used to populate selection inputs.
pub type FilterOptions = BTreeMap<String, Vec<String>>;

/// Count endpoint response: `{count}`.
#[derive(Clone, Debug, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}

/// Query parameters of a list request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    /// Every filter key of the collection, empty values included
    pub filters: Vec<(String, String)>,
    pub page: usize,
    pub limit: usize,
}

impl ListQuery {
    /// All query parameters in request order: filters, then `page` and `limit`
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = self.filters.clone();
        params.push(("page".to_string(), self.page.to_string()));
        params.push(("limit".to_string(), self.limit.to_string()));
        params
    }
}

impl From<&CommittedQuery> for ListQuery {
    fn from(query: &CommittedQuery) -> Self {
        Self {
            filters: query
                .filters
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            page: query.window.page(),
            limit: query.window.page_size().get(),
        }
    }
}

/// Backend trait covering the remote collection contract.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "http").
    fn backend_type(&self) -> &str;

    /// Fetch one filtered page of a collection.
    async fn list(&self, kind: EntityKind, query: &ListQuery) -> Result<RecordPage, BackendError>;

    /// Distinct values per filter key currently present in the store.
    async fn filter_options(&self, kind: EntityKind) -> Result<FilterOptions, BackendError>;

    /// Total number of stored records, unfiltered.
    async fn count(&self, kind: EntityKind) -> Result<u64, BackendError>;

    /// Pull the latest state from the system of record into the store.
    async fn sync(&self, kind: EntityKind) -> Result<(), BackendError>;

    /// The full collection as a spreadsheet document.
    async fn export(&self, kind: EntityKind) -> Result<Vec<u8>, BackendError>;
}

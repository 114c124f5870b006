//! Query cache / fetch coordinator.
//!
//! Maps committed queries to remote fetches. Every fetch is described by a
//! [`FetchTicket`]; only the ticket issued last is allowed to update the
//! collection, so results of superseded queries are dropped on arrival no
//! matter in which order responses come back.

use log::debug;
use std::sync::Arc;

use super::pagination::PageStatus;
use super::query::CommittedQuery;
use crate::backend::ListPage;
use crate::entities::EntityKind;

/// Identifies one issued fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub kind: EntityKind,
    /// Controller instance that issued the ticket
    pub instance: u64,
    pub seq: u64,
    pub query: CommittedQuery,
}

/// Rows of the current page plus collection metadata. Replaced wholesale on
/// every successful fetch; rows are never mutated in place.
#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    pub rows: Arc<Vec<T>>,
    pub total_count: u64,
    pub last_synced_at: Option<String>,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            rows: Arc::new(Vec::new()),
            total_count: 0,
            last_synced_at: None,
        }
    }
}

impl<T> From<ListPage<T>> for RemoteCollection<T> {
    fn from(page: ListPage<T>) -> Self {
        Self {
            rows: Arc::new(page.data),
            total_count: page.count,
            last_synced_at: page.last_synced_at,
        }
    }
}

pub struct FetchCoordinator<T> {
    kind: EntityKind,
    instance: u64,
    current: Option<CommittedQuery>,
    next_seq: u64,
    latest_seq: Option<u64>,
    collection: RemoteCollection<T>,
    /// Bumped every time `collection` is replaced
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl<T> FetchCoordinator<T> {
    pub fn new(kind: EntityKind, instance: u64) -> Self {
        Self {
            kind,
            instance,
            current: None,
            next_seq: 1,
            latest_seq: None,
            collection: RemoteCollection::default(),
            generation: 0,
            loading: false,
            error: None,
        }
    }

    /// Accept a committed query. Returns a ticket only when the query differs
    /// from the one already fetched or in flight.
    pub fn request(&mut self, query: &CommittedQuery) -> Option<FetchTicket> {
        if self.current.as_ref() == Some(query) {
            debug!("{}: query unchanged, not refetching", self.kind);
            return None;
        }
        self.current = Some(query.clone());
        Some(self.issue(query.clone()))
    }

    /// Re-issue the current query unconditionally (cache bust).
    pub fn refetch(&mut self) -> Option<FetchTicket> {
        let query = self.current.clone()?;
        Some(self.issue(query))
    }

    fn issue(&mut self, query: CommittedQuery) -> FetchTicket {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest_seq = Some(seq);
        self.loading = true;
        FetchTicket {
            kind: self.kind,
            instance: self.instance,
            seq,
            query,
        }
    }

    /// Whether a result for `ticket` would still be applied
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.instance == self.instance
            && self.latest_seq == Some(ticket.seq)
            && self.current.as_ref() == Some(&ticket.query)
    }

    /// Apply a finished fetch. Superseded tickets are ignored; returns whether it was applied.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<ListPage<T>, String>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "{}: discarding superseded fetch #{} (latest #{:?})",
                self.kind, ticket.seq, self.latest_seq
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                self.collection = RemoteCollection::from(page);
                self.generation += 1;
                self.error = None;
            }
            Err(error) => {
                // Keep the previous rows on screen; only flag the failure.
                self.error = Some(error);
            }
        }
        true
    }

    pub fn collection(&self) -> &RemoteCollection<T> {
        &self.collection
    }

    pub fn rows(&self) -> &Arc<Vec<T>> {
        &self.collection.rows
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn current_query(&self) -> Option<&CommittedQuery> {
        self.current.as_ref()
    }

    /// Pagination state for the committed window against the known total.
    pub fn page_status(&self) -> Option<PageStatus> {
        self.current
            .as_ref()
            .map(|query| PageStatus::new(&query.window, self.collection.total_count))
    }
}

//! Filter/pagination state machine.
//!
//! Holds the live filter values and page window the user is editing and
//! derives the [`CommittedQuery`] that is actually sent to the backend.
//! Filter edits are debounced: each edit restarts a quiet-period timer and
//! the query is committed only once [`QueryState::tick`] observes that the
//! timer has expired. Page and page-size changes commit immediately.
//!
//! Time is passed in explicitly so the event loop's tick drives the timer.

use std::time::{Duration, Instant};

use super::filters::{FilterError, FilterSet, FilterSpec, ValidationError};
use super::pagination::{PageSize, PageWindow};
use crate::constants::FILTER_DEBOUNCE;

/// The debounced, validity-checked snapshot of filters and page window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommittedQuery {
    pub filters: FilterSet,
    pub window: PageWindow,
}

/// Whether a call changed the committed query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Changed,
    Unchanged,
    /// A filter edit was recorded and will commit after the quiet period
    Scheduled,
}

impl Commit {
    pub fn changed(&self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Debug, Clone)]
pub struct QueryState {
    spec: FilterSpec,
    filters: FilterSet,
    window: PageWindow,
    committed: CommittedQuery,
    /// Deadline of the pending debounced commit
    commit_at: Option<Instant>,
    debounce: Duration,
}

impl QueryState {
    pub fn new(spec: FilterSpec, page_size: PageSize) -> Self {
        Self::with_debounce(spec, page_size, FILTER_DEBOUNCE)
    }

    pub fn with_debounce(spec: FilterSpec, page_size: PageSize, debounce: Duration) -> Self {
        let filters = spec.defaults();
        let window = PageWindow::new(page_size);
        Self {
            spec,
            committed: CommittedQuery {
                filters: filters.clone(),
                window,
            },
            filters,
            window,
            commit_at: None,
            debounce,
        }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    /// Live filter values, including edits not yet committed
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Live page window
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    pub fn committed(&self) -> &CommittedQuery {
        &self.committed
    }

    /// Validity of the committed query; an invalid query must not be fetched.
    pub fn validation(&self) -> Result<(), ValidationError> {
        self.spec.validate(&self.committed.filters)
    }

    /// True while a debounced filter commit is outstanding
    pub fn has_pending_edit(&self) -> bool {
        self.commit_at.is_some()
    }

    /// Record a filter edit and restart the quiet-period timer.
    pub fn set_filter(&mut self, key: &str, value: &str, now: Instant) -> Result<Commit, FilterError> {
        self.filters.set(&self.spec, key, value)?;
        self.window.reset_page();
        self.commit_at = Some(now + self.debounce);
        Ok(Commit::Scheduled)
    }

    /// Jump to a page. Values below 1 are ignored; pages past the end are allowed.
    /// Ignored while a filter edit is pending, since that edit lands on page 1.
    pub fn set_page(&mut self, page: usize) -> Commit {
        if self.has_pending_edit() || !self.window.set_page(page) {
            return Commit::Unchanged;
        }
        self.commit()
    }

    /// Ignored while a filter edit is pending.
    pub fn set_page_size(&mut self, page_size: PageSize) -> Commit {
        if self.has_pending_edit() {
            return Commit::Unchanged;
        }
        self.window.set_page_size(page_size);
        self.commit()
    }

    /// Restore every filter to empty and return to page 1. The page size is kept.
    pub fn reset(&mut self) -> Commit {
        self.filters = self.spec.defaults();
        self.window.reset_page();
        self.commit()
    }

    /// Pull the page back inside `1..=total_pages` once the total is known.
    /// An empty collection clamps to page 1.
    pub fn clamp_page(&mut self, total_pages: usize) -> Commit {
        let last = total_pages.max(1);
        if self.has_pending_edit() || self.window.page() <= last {
            return Commit::Unchanged;
        }
        self.window.set_page(last);
        self.commit()
    }

    /// Commit the pending filter edit if its quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Commit {
        match self.commit_at {
            Some(deadline) if now >= deadline => self.commit(),
            _ => Commit::Unchanged,
        }
    }

    /// Snapshot the live state as the committed query.
    fn commit(&mut self) -> Commit {
        self.commit_at = None;
        let next = CommittedQuery {
            filters: self.filters.clone(),
            window: self.window,
        };
        if next == self.committed {
            return Commit::Unchanged;
        }
        self.committed = next;
        Commit::Changed
    }
}

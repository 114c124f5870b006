//! Per-page grid controller.
//!
//! One [`GridController`] backs one mounted entity page. It wires the filter
//! state machine to the fetch coordinator, runs the sync and export actions,
//! and keeps the table's expansion state in step with the rows. It never
//! performs I/O itself: every operation returns the [`GridCommand`]s the
//! caller must run, and results come back through the `on_*` methods.

use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::export::ExportTrigger;
use super::fetch::{FetchCoordinator, FetchTicket, RemoteCollection};
use super::filters::{FilterError, FilterSet, FilterSpec, ValidationError};
use super::notice::Notice;
use super::pagination::{PageSize, PageStatus};
use super::query::{Commit, CommittedQuery, QueryState};
use super::sync::{SyncOrchestrator, SyncOutcome};
use super::table::{layout_table, CellRef, Column, ExpansionState, TableView};
use crate::backend::{FilterOptions, RecordPage};
use crate::constants::FILTER_DEBOUNCE;
use crate::entities::{EntityKind, Record};

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Side effects requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridCommand {
    Fetch(FetchTicket),
    LoadFilterOptions,
    Sync,
    Export { file_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOptionsState {
    Loading,
    Loaded(FilterOptions),
    Failed(String),
}

pub struct GridController<T: Record> {
    instance: u64,
    columns: Vec<Column<T>>,
    query: QueryState,
    fetch: FetchCoordinator<T>,
    sync: SyncOrchestrator,
    export: ExportTrigger,
    options: FilterOptionsState,
    expansion: ExpansionState,
}

impl<T: Record> GridController<T> {
    pub fn new(page_size: PageSize) -> Self {
        Self::with_debounce(page_size, FILTER_DEBOUNCE)
    }

    pub fn with_debounce(page_size: PageSize, debounce: Duration) -> Self {
        let instance = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        Self {
            instance,
            columns: T::columns(),
            query: QueryState::with_debounce(T::KIND.filter_spec(), page_size, debounce),
            fetch: FetchCoordinator::new(T::KIND, instance),
            sync: SyncOrchestrator::new(T::KIND),
            export: ExportTrigger::new(T::KIND),
            options: FilterOptionsState::Loading,
            expansion: ExpansionState::new(),
        }
    }

    /// Identifies this mount; results tagged with another instance are dropped.
    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn kind(&self) -> EntityKind {
        T::KIND
    }

    /// Initial loads: filter options once, plus the first page.
    pub fn mount(&mut self) -> Vec<GridCommand> {
        info!("{}: mounted controller #{}", T::KIND, self.instance);
        let mut commands = vec![GridCommand::LoadFilterOptions];
        commands.extend(self.fetch_committed());
        commands
    }

    // Filter and pagination edits

    /// Record a filter edit; the fetch follows from [`Self::tick`] after the quiet period.
    pub fn set_filter(&mut self, key: &str, value: &str, now: Instant) -> Result<(), FilterError> {
        self.query.set_filter(key, value, now)?;
        debug!("{}: filter {} = {:?}", T::KIND, key, value);
        Ok(())
    }

    pub fn set_page(&mut self, page: usize) -> Vec<GridCommand> {
        let commit = self.query.set_page(page);
        self.after_commit(commit)
    }

    /// Next page, unless the control is disabled or a filter edit is pending
    pub fn next_page(&mut self) -> Vec<GridCommand> {
        if self.has_pending_edit() || !self.page_status().has_next {
            return Vec::new();
        }
        self.set_page(self.query.window().page() + 1)
    }

    pub fn prev_page(&mut self) -> Vec<GridCommand> {
        if self.has_pending_edit() || !self.page_status().has_prev {
            return Vec::new();
        }
        self.set_page(self.query.window().page() - 1)
    }

    pub fn set_page_size(&mut self, page_size: PageSize) -> Vec<GridCommand> {
        let commit = self.query.set_page_size(page_size);
        self.after_commit(commit)
    }

    pub fn larger_page_size(&mut self) -> Vec<GridCommand> {
        let size = self.page_size().larger();
        self.set_page_size(size)
    }

    pub fn smaller_page_size(&mut self) -> Vec<GridCommand> {
        let size = self.page_size().smaller();
        self.set_page_size(size)
    }

    pub fn reset(&mut self) -> Vec<GridCommand> {
        info!("{}: filters reset", T::KIND);
        let commit = self.query.reset();
        self.after_commit(commit)
    }

    /// Advance timers: commits a debounced edit and expires status messages.
    pub fn tick(&mut self, now: Instant) -> Vec<GridCommand> {
        self.sync.tick(now);
        self.export.tick(now);
        let commit = self.query.tick(now);
        self.after_commit(commit)
    }

    fn after_commit(&mut self, commit: Commit) -> Vec<GridCommand> {
        if commit.changed() {
            self.fetch_committed()
        } else {
            Vec::new()
        }
    }

    fn fetch_committed(&mut self) -> Vec<GridCommand> {
        if let Err(e) = self.query.validation() {
            warn!("{}: not fetching invalid query: {}", T::KIND, e);
            return Vec::new();
        }
        let committed = self.query.committed().clone();
        match self.fetch.request(&committed) {
            Some(ticket) => {
                info!(
                    "{}: fetch #{} page {} size {} filters {}",
                    T::KIND,
                    ticket.seq,
                    committed.window.page(),
                    committed.window.page_size(),
                    committed.filters
                );
                vec![GridCommand::Fetch(ticket)]
            }
            None => Vec::new(),
        }
    }

    /// Re-issue the current query regardless of caching.
    pub fn refetch(&mut self) -> Vec<GridCommand> {
        match self.fetch.refetch() {
            Some(ticket) => {
                info!("{}: refetch #{}", T::KIND, ticket.seq);
                vec![GridCommand::Fetch(ticket)]
            }
            None => self.fetch_committed(),
        }
    }

    // Side actions

    pub fn trigger_sync(&mut self) -> Vec<GridCommand> {
        if self.sync.trigger() {
            vec![GridCommand::Sync]
        } else {
            Vec::new()
        }
    }

    pub fn trigger_export(&mut self, today: NaiveDate) -> Vec<GridCommand> {
        match self.export.trigger(today) {
            Some(file_name) => vec![GridCommand::Export { file_name }],
            None => Vec::new(),
        }
    }

    // Results

    /// Apply a list response. May request a follow-up fetch when the page
    /// turned out to be past the end of the collection.
    pub fn on_page_loaded(&mut self, ticket: &FetchTicket, result: Result<RecordPage, String>) -> Vec<GridCommand> {
        let result = result.and_then(|page| {
            let kind = page.kind();
            T::from_page(page).ok_or_else(|| format!("expected {} rows, got {}", T::KIND, kind))
        });

        if let Err(e) = &result {
            if self.fetch.is_current(ticket) {
                error!("{}: fetch #{} failed: {}", T::KIND, ticket.seq, e);
            }
        }

        if !self.fetch.complete(ticket, result) {
            return Vec::new();
        }
        if self.expansion.sync(self.fetch.generation()) {
            debug!("{}: rows replaced, collapsed expanded cells", T::KIND);
        }

        let status = self.page_status();
        if status.page > status.total_pages.max(1) {
            info!(
                "{}: page {} is past the last page {}, clamping",
                T::KIND,
                status.page,
                status.total_pages.max(1)
            );
            let commit = self.query.clamp_page(status.total_pages);
            return self.after_commit(commit);
        }
        Vec::new()
    }

    pub fn on_sync_finished(&mut self, result: Result<(), String>, now: Instant) -> Vec<GridCommand> {
        match self.sync.complete(result, now) {
            SyncOutcome::Refetch => self.refetch(),
            SyncOutcome::Nothing => Vec::new(),
        }
    }

    pub fn on_export_finished(&mut self, result: Result<PathBuf, String>, now: Instant) {
        self.export.complete(result, now);
    }

    pub fn on_filter_options_loaded(&mut self, result: Result<FilterOptions, String>) {
        self.options = match result {
            Ok(options) => {
                debug!("{}: loaded options for {} filters", T::KIND, options.len());
                FilterOptionsState::Loaded(options)
            }
            Err(e) => {
                warn!("{}: failed to load filter options: {}", T::KIND, e);
                FilterOptionsState::Failed(e)
            }
        };
    }

    /// Expand or collapse one cell of the current page. Returns the new state,
    /// or None when the position is outside the table.
    pub fn toggle_cell(&mut self, cell: CellRef) -> Option<bool> {
        if cell.row >= self.rows().len() || cell.col >= self.columns.len() {
            return None;
        }
        self.expansion.sync(self.fetch.generation());
        Some(self.expansion.toggle(cell))
    }

    // Views

    pub fn spec(&self) -> &FilterSpec {
        self.query.spec()
    }

    pub fn filters(&self) -> &FilterSet {
        self.query.filters()
    }

    pub fn committed(&self) -> &CommittedQuery {
        self.query.committed()
    }

    pub fn validation_error(&self) -> Option<ValidationError> {
        self.query.validation().err()
    }

    pub fn has_pending_edit(&self) -> bool {
        self.query.has_pending_edit()
    }

    pub fn page_size(&self) -> PageSize {
        self.query.window().page_size()
    }

    /// Pagination of the rows on screen. Falls back to the committed window
    /// before anything has been fetched.
    pub fn page_status(&self) -> PageStatus {
        self.fetch
            .page_status()
            .unwrap_or_else(|| PageStatus::new(&self.query.committed().window, 0))
    }

    pub fn collection(&self) -> &RemoteCollection<T> {
        self.fetch.collection()
    }

    pub fn rows(&self) -> &Arc<Vec<T>> {
        self.fetch.rows()
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn loading(&self) -> bool {
        self.fetch.loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.fetch.error()
    }

    pub fn last_synced_at(&self) -> Option<&str> {
        self.fetch.collection().last_synced_at.as_deref()
    }

    pub fn filter_options(&self) -> &FilterOptionsState {
        &self.options
    }

    /// Observed values for one filter key; empty until options load
    pub fn options_for(&self, key: &str) -> &[String] {
        match &self.options {
            FilterOptionsState::Loaded(options) => options.get(key).map(Vec::as_slice).unwrap_or(&[]),
            _ => &[],
        }
    }

    pub fn sync_pending(&self) -> bool {
        self.sync.is_pending()
    }

    pub fn export_pending(&self) -> bool {
        self.export.is_pending()
    }

    pub fn is_expanded(&self, cell: CellRef) -> bool {
        self.expansion.generation() == self.fetch.generation() && self.expansion.is_expanded(cell)
    }

    /// The newest live status message of the sync and export actions
    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        match (self.sync.notice(now), self.export.notice(now)) {
            (Some(a), Some(b)) => Some(if a.expires_at >= b.expires_at { a } else { b }),
            (a, b) => a.or(b),
        }
    }

    /// Table model of the current rows laid out for `width` terminal cells.
    pub fn table(&self, width: u16) -> TableView {
        let stale = self.expansion.generation() != self.fetch.generation();
        let empty = ExpansionState::new();
        let expansion = if stale { &empty } else { &self.expansion };
        layout_table(&self.columns, Some(self.rows().as_slice()), expansion, width)
    }
}

//! Sync orchestrator.
//!
//! `idle -> pending -> (success | failure) -> idle`. Only one sync may be in
//! flight; a trigger while pending is ignored rather than queued. Success
//! asks the caller to refetch the table, failure does not. Either outcome
//! posts a transient message.

use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

use super::notice::{Notice, NoticeBoard, NoticeKind};
use crate::backend::{Backend, BackendError};
use crate::constants::{ERROR_SYNC_FAILED, LOG_SYNC_IGNORED, SUCCESS_SYNC};
use crate::entities::EntityKind;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("Sync request failed: {0}")]
    SyncFailed(#[from] BackendError),
}

/// Run the remote sync action. Used by the background task runner.
pub async fn run_sync(backend: Arc<dyn Backend>, kind: EntityKind) -> Result<(), SyncError> {
    backend.sync(kind).await?;
    Ok(())
}

/// Represents the current status of a synchronization operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// No sync is running
    Idle,
    /// A sync request is in flight
    Pending,
}

/// What the caller must do after a sync finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Refetch,
    Nothing,
}

#[derive(Debug, Clone)]
pub struct SyncOrchestrator {
    kind: EntityKind,
    status: SyncStatus,
    notices: NoticeBoard,
}

impl SyncOrchestrator {
    pub fn new(kind: EntityKind) -> Self {
        Self::with_notices(kind, NoticeBoard::new())
    }

    pub fn with_notices(kind: EntityKind, notices: NoticeBoard) -> Self {
        Self {
            kind,
            status: SyncStatus::Idle,
            notices,
        }
    }

    pub fn status(&self) -> &SyncStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == SyncStatus::Pending
    }

    /// Start a sync. Returns false, doing nothing, when one is already pending.
    pub fn trigger(&mut self) -> bool {
        if self.is_pending() {
            info!("{}: {}", self.kind, LOG_SYNC_IGNORED);
            return false;
        }
        info!("{}: sync started", self.kind);
        self.status = SyncStatus::Pending;
        true
    }

    /// Record the result of the in-flight sync.
    pub fn complete(&mut self, result: Result<(), String>, now: Instant) -> SyncOutcome {
        if !self.is_pending() {
            warn!("{}: sync result arrived with no sync pending, ignoring", self.kind);
            return SyncOutcome::Nothing;
        }
        self.status = SyncStatus::Idle;

        match result {
            Ok(()) => {
                info!("{}: sync completed", self.kind);
                self.notices.post(NoticeKind::Success, SUCCESS_SYNC, now);
                SyncOutcome::Refetch
            }
            Err(error) => {
                warn!("{}: sync failed: {}", self.kind, error);
                self.notices.post(NoticeKind::Failure, ERROR_SYNC_FAILED, now);
                SyncOutcome::Nothing
            }
        }
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notices.current(now)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.notices.tick(now)
    }
}

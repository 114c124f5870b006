//! Export trigger.
//!
//! Requests the full collection as a spreadsheet and saves it as
//! `<entity>_<YYYY-MM-DD>.xlsx`. The document is written to a `.part` file
//! that is closed and renamed into place, so no open handle or half-written
//! file outlives the call.

use chrono::NaiveDate;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncWriteExt;

use super::notice::{Notice, NoticeBoard, NoticeKind};
use crate::backend::{Backend, BackendError};
use crate::constants::{ERROR_EXPORT_FAILED, SUCCESS_EXPORT};
use crate::entities::EntityKind;
use crate::utils::datetime::format_ymd;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Export request failed: {0}")]
    ExportFailed(#[from] BackendError),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// `issues_2025-03-14.xlsx`
pub fn export_file_name(kind: EntityKind, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", kind.slug(), format_ymd(date))
}

/// Write `bytes` to `dir/file_name` through a temporary file.
pub async fn save_document(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ExportError::Io { path, source }
    };

    tokio::fs::create_dir_all(dir).await.map_err(io_err(dir))?;

    let target = dir.join(file_name);
    let partial = dir.join(format!("{}.part", file_name));
    {
        let mut file = tokio::fs::File::create(&partial).await.map_err(io_err(&partial))?;
        file.write_all(bytes).await.map_err(io_err(&partial))?;
        file.flush().await.map_err(io_err(&partial))?;
    }

    if let Err(source) = tokio::fs::rename(&partial, &target).await {
        let _ = tokio::fs::remove_file(&partial).await;
        return Err(ExportError::Io { path: target, source });
    }
    Ok(target)
}

/// Fetch the export document and save it. Used by the background task runner.
pub async fn run_export(
    backend: Arc<dyn Backend>,
    kind: EntityKind,
    dir: PathBuf,
    file_name: String,
) -> Result<PathBuf, ExportError> {
    let bytes = backend.export(kind).await?;
    info!("{}: received export document ({} bytes)", kind, bytes.len());
    save_document(&dir, &file_name, &bytes).await
}

#[derive(Debug, Clone)]
pub struct ExportTrigger {
    kind: EntityKind,
    pending: bool,
    last_saved: Option<PathBuf>,
    notices: NoticeBoard,
}

impl ExportTrigger {
    pub fn new(kind: EntityKind) -> Self {
        Self::with_notices(kind, NoticeBoard::new())
    }

    pub fn with_notices(kind: EntityKind, notices: NoticeBoard) -> Self {
        Self {
            kind,
            pending: false,
            last_saved: None,
            notices,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start an export dated `today`. Returns the file name to save under,
    /// or None while a previous export is still running.
    pub fn trigger(&mut self, today: NaiveDate) -> Option<String> {
        if self.pending {
            info!("{}: export already in progress, ignoring", self.kind);
            return None;
        }
        self.pending = true;
        let file_name = export_file_name(self.kind, today);
        info!("{}: export started as {}", self.kind, file_name);
        Some(file_name)
    }

    /// Record the export result. Failures are logged and surfaced only as a transient message.
    pub fn complete(&mut self, result: Result<PathBuf, String>, now: Instant) {
        self.pending = false;
        match result {
            Ok(path) => {
                info!("{}: export saved to {}", self.kind, path.display());
                self.notices
                    .post(NoticeKind::Success, format!("{} {}", SUCCESS_EXPORT, path.display()), now);
                self.last_saved = Some(path);
            }
            Err(e) => {
                error!("{}: export failed: {}", self.kind, e);
                self.notices.post(NoticeKind::Failure, ERROR_EXPORT_FAILED, now);
            }
        }
    }

    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }

    pub fn notice(&self, now: Instant) -> Option<&Notice> {
        self.notices.current(now)
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.notices.tick(now)
    }
}

use crate::backend::{FilterOptions, RecordPage};
use crate::entities::{EntityKind, View};
use crate::grid::{FetchTicket, GridCommand};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateTo(View),
    NextView,
    PreviousView,

    // Grid side effects requested by a mounted page
    RunCommands {
        kind: EntityKind,
        instance: u64,
        commands: Vec<GridCommand>,
    },

    // Background results
    PageLoaded {
        ticket: FetchTicket,
        result: Result<RecordPage, String>,
    },
    FilterOptionsLoaded {
        kind: EntityKind,
        instance: u64,
        result: Result<FilterOptions, String>,
    },
    SyncFinished {
        kind: EntityKind,
        instance: u64,
        result: Result<(), String>,
    },
    ExportFinished {
        kind: EntityKind,
        instance: u64,
        result: Result<PathBuf, String>,
    },
    CountsLoaded(Vec<(EntityKind, Result<u64, String>)>),

    // Dashboard
    RefreshDashboard,

    // UI operations
    ShowDialog(DialogType),
    HideDialog,

    // App control
    Quit,
    None,
}

impl Action {
    /// Results of a background task addressed to one entity page
    pub fn target(&self) -> Option<EntityKind> {
        match self {
            Action::PageLoaded { ticket, .. } => Some(ticket.kind),
            Action::FilterOptionsLoaded { kind, .. }
            | Action::SyncFinished { kind, .. }
            | Action::ExportFinished { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogType {
    Error(String),
    Help,
    Logs,
}

use super::actions::Action;
use crate::backend::{Backend, ListQuery};
use crate::entities::EntityKind;
use crate::grid::export::run_export;
use crate::grid::sync::run_sync;
use crate::grid::{FetchTicket, GridCommand};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<()>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Runs backend calls on the tokio runtime and reports each result back to
/// the UI loop as an [`Action`].
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
    backend: Arc<dyn Backend>,
    export_dir: PathBuf,
}

impl TaskManager {
    pub fn new(backend: Arc<dyn Backend>, export_dir: PathBuf) -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
                backend,
                export_dir,
            },
            rx,
        )
    }

    fn spawn<Fut>(&mut self, description: String, future: Fut) -> TaskId
    where
        Fut: Future<Output = Action> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let action_sender = self.action_sender.clone();
        let handle = tokio::spawn(async move {
            let action = future.await;
            // The receiver is gone only while shutting down
            let _ = action_sender.send(action);
        });

        debug!("Task #{} started: {}", task_id, description);
        self.tasks.insert(
            task_id,
            BackgroundTask {
                id: task_id,
                handle,
                description,
                started_at: std::time::Instant::now(),
            },
        );
        task_id
    }

    /// Run every command a grid page asked for.
    pub fn run_commands(&mut self, kind: EntityKind, instance: u64, commands: Vec<GridCommand>) -> Vec<TaskId> {
        commands
            .into_iter()
            .map(|command| match command {
                GridCommand::Fetch(ticket) => self.spawn_fetch(ticket),
                GridCommand::LoadFilterOptions => self.spawn_filter_options(kind, instance),
                GridCommand::Sync => self.spawn_sync(kind, instance),
                GridCommand::Export { file_name } => self.spawn_export(kind, instance, file_name),
            })
            .collect()
    }

    pub fn spawn_fetch(&mut self, ticket: FetchTicket) -> TaskId {
        let backend = Arc::clone(&self.backend);
        let description = format!("Fetch {} #{}", ticket.kind, ticket.seq);

        self.spawn(description, async move {
            let query = ListQuery::from(&ticket.query);
            let result = backend.list(ticket.kind, &query).await.map_err(|e| e.to_string());
            Action::PageLoaded { ticket, result }
        })
    }

    pub fn spawn_filter_options(&mut self, kind: EntityKind, instance: u64) -> TaskId {
        let backend = Arc::clone(&self.backend);

        self.spawn(format!("Load {} filter options", kind), async move {
            let result = backend.filter_options(kind).await.map_err(|e| e.to_string());
            Action::FilterOptionsLoaded { kind, instance, result }
        })
    }

    pub fn spawn_sync(&mut self, kind: EntityKind, instance: u64) -> TaskId {
        let backend = Arc::clone(&self.backend);

        self.spawn(format!("Sync {}", kind), async move {
            let result = run_sync(backend, kind).await.map_err(|e| e.to_string());
            Action::SyncFinished { kind, instance, result }
        })
    }

    pub fn spawn_export(&mut self, kind: EntityKind, instance: u64, file_name: String) -> TaskId {
        let backend = Arc::clone(&self.backend);
        let dir = self.export_dir.clone();

        self.spawn(format!("Export {} to {}", kind, file_name), async move {
            let result = run_export(backend, kind, dir, file_name)
                .await
                .map_err(|e| e.to_string());
            Action::ExportFinished { kind, instance, result }
        })
    }

    /// Load the record count of every collection for the dashboard.
    pub fn spawn_counts(&mut self) -> TaskId {
        let backend = Arc::clone(&self.backend);

        self.spawn("Load record counts".to_string(), async move {
            let mut counts = Vec::with_capacity(EntityKind::ALL.len());
            for kind in EntityKind::ALL {
                let result = backend.count(kind).await.map_err(|e| {
                    warn!("Failed to load {} count: {}", kind, e);
                    e.to_string()
                });
                counts.push((kind, result));
            }
            Action::CountsLoaded(counts)
        })
    }

    /// Check for completed tasks and clean them up
    pub fn cleanup_finished_tasks(&mut self) -> Vec<TaskId> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(task_id, _)| *task_id)
            .collect();

        for task_id in &finished {
            if let Some(task) = self.tasks.remove(task_id) {
                debug!(
                    "Task #{} finished after {:?}: {}",
                    task.id,
                    task.started_at.elapsed(),
                    task.description
                );
            }
        }
        finished
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        if !self.tasks.is_empty() {
            info!("Cancelling {} background tasks", self.tasks.len());
        }
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}

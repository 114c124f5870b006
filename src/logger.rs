//! Application logging.
//!
//! Every module logs through the `log` facade. [`Logger::install`] routes those
//! records through a `fern` dispatch into an in-memory buffer (shown by the log
//! viewer) and, when file logging is enabled, into `jiraboard.log` under the
//! user's data directory.

use anyhow::{Context, Result};
use chrono::Local;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Maximum number of lines kept in memory for the log viewer
const MAX_BUFFERED_LINES: usize = 1000;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    file_path: Option<PathBuf>,
}

impl Logger {
    /// Create an in-memory only logger
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::new())),
            file_path: None,
        }
    }

    /// Create a logger honoring the `logging.enabled` setting
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            logger.file_path = Some(path);
        }
        Ok(logger)
    }

    /// Path of the log file written when file logging is enabled
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("jiraboard").join("jiraboard.log"))
    }

    /// Whether records are also written to a file
    pub fn is_enabled(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    /// Install this logger as the global `log` sink.
    ///
    /// Fails if a global logger was already installed in this process.
    pub fn install(&self, level: log::LevelFilter) -> Result<()> {
        let buffer = self.clone();
        let mut dispatch = fern::Dispatch::new()
            .level(level)
            .level_for("reqwest", log::LevelFilter::Warn)
            .level_for("hyper_util", log::LevelFilter::Warn)
            .chain(
                fern::Dispatch::new()
                    .format(|out, message, record| out.finish(format_args!("{:<5} {}", record.level(), message)))
                    .chain(fern::Output::call(move |record| buffer.log(record.args().to_string()))),
            );

        if let Some(path) = &self.file_path {
            let file = fern::log_file(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{} {:<5} {}] {}",
                            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }

        dispatch.apply().context("Failed to install logger")?;
        Ok(())
    }

    /// Add a log entry to the in-memory buffer
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() == MAX_BUFFERED_LINES {
                logs.pop_front();
            }
            logs.push_back(formatted_message);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

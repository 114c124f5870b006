//! Constants used throughout the application
//!
//! This module centralizes magic strings, UI text, and other constant values
//! to improve maintainability and consistency.

use std::time::Duration;

// Grid behaviour
/// Page sizes offered by the pagination control, in display order
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];
/// Page size used when nothing else is configured
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Quiet period after the last filter edit before the query is committed
pub const FILTER_DEBOUNCE: Duration = Duration::from_millis(400);
/// Lifetime of a transient sync/export status message
pub const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(5);
/// Number of lines a collapsed cell shows before it is clamped
pub const CELL_LINE_CLAMP: usize = 3;
/// Default maximum column width in terminal cells
pub const DEFAULT_COLUMN_MAX_WIDTH: u16 = 24;

// Table text
pub const NO_DATA_AVAILABLE: &str = "No Data Available";
pub const LOADING_TEXT: &str = "Loading...";
pub const ELLIPSIS: &str = "…";

// Success Messages
pub const SUCCESS_SYNC: &str = "✅ Sync completed successfully";
pub const SUCCESS_EXPORT: &str = "✅ Exported";

// Error Messages
pub const ERROR_SYNC_FAILED: &str = "❌ Sync failed. Please try again.";
pub const ERROR_EXPORT_FAILED: &str = "❌ Export failed";
pub const ERROR_FETCH_FAILED: &str = "❌ Failed to load data";
pub const ERROR_DATE_RANGE: &str = "⚠ Both start and end dates are required";

// Log Messages
pub const LOG_SYNC_IGNORED: &str = "Sync already in progress, ignoring trigger";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const APP_TITLE: &str = "Jira Integration";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";
pub const DIALOG_TITLE_HELP: &str = "❓ Help - Press 'Esc' or '?' to close";

// UI Layout Constants
/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 18;
/// Height of the filter bar including borders
pub const FILTER_BAR_HEIGHT: u16 = 4;

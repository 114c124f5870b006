//! Utility modules for jiraboard.
//!
//! - [`datetime`] - Date formatting and parsing for filters, table cells and export names

pub mod datetime;

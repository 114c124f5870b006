//! jiraboard - a terminal dashboard for a Jira integration backend
//!
//! Browses the projects, issues and audit trail that the backend mirrors
//! from Jira as paginated, filterable tables, and triggers the backend's
//! sync and spreadsheet export actions.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`backend`] - Backend contract and its HTTP client
//! * [`entities`] - Row types of the synchronized collections
//! * [`grid`] - Filter, pagination, fetch, sync and export state machines
//! * [`ui`] - Terminal user interface components
//! * [`utils`] - Utility functions and helpers

/// Backend abstraction layer and HTTP client
pub mod backend;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Row types and their column descriptors
pub mod entities;

/// The interactive data grid
pub mod grid;

/// Logging utilities for debugging and error tracking
pub mod logger;

/// Terminal user interface components and rendering
pub mod ui;

/// Utility functions for date/time handling
pub mod utils;

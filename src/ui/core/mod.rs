//! Core UI functionality for jiraboard.
//!
//! This module contains the fundamental building blocks for the user interface,
//! including event handling, component abstractions, and task management.
//!
//! # Module Components
//!
//! - [`actions`] - Action definitions and UI state transitions
//! - [`component`] - Base component trait and rendering abstractions
//! - [`event_handler`] - Event processing and keyboard/mouse input handling
//! - [`task_manager`] - Background backend calls reported back as actions
//!
//! # Architecture
//!
//! 1. **Components** implement the [`Component`] trait for consistent rendering
//! 2. **Actions** define state transitions and user interactions
//! 3. **Events** are processed through the [`EventHandler`] system
//! 4. **Tasks** are managed asynchronously via the [`TaskManager`]
//!
//! Grid pages never perform I/O themselves: they return [`Action::RunCommands`]
//! and the root component hands the commands to the task manager.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, DialogType};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager};

//! The interactive data grid: filter/pagination state, fetch coordination,
//! sync and export actions, and the table model.

pub mod controller;
pub mod export;
pub mod fetch;
pub mod filters;
pub mod notice;
pub mod pagination;
pub mod query;
pub mod sync;
pub mod table;

pub use controller::{FilterOptionsState, GridCommand, GridController};
pub use fetch::{FetchTicket, RemoteCollection};
pub use filters::{FilterError, FilterSet, FilterSpec, ValidationError};
pub use pagination::{PageSize, PageStatus, PageWindow};
pub use table::{CellRef, Column};

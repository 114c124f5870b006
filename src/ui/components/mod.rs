//! Reusable UI components

pub mod dashboard;
pub mod data_table;
pub mod dialog;
pub mod entity_page;
pub mod filter_bar;
pub mod pagination_bar;
pub mod sidebar;
pub mod status_bar;

pub use dashboard::DashboardComponent;
pub use dialog::DialogComponent;
pub use entity_page::EntityPage;
pub use sidebar::SidebarComponent;
pub use status_bar::StatusBar;

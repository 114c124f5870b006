//! Row types for the synchronized collections and the views that show them.

pub mod audit;
pub mod issue;
pub mod project;

pub use audit::AuditRecord;
pub use issue::Issue;
pub use project::Project;

use crate::backend::{ListPage, RecordPage};
use crate::grid::filters::FilterSpec;
use crate::grid::table::Column;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// One of the three remotely synchronized collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Projects,
    Issues,
    Audit,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Projects, EntityKind::Issues, EntityKind::Audit];

    /// Path segment used by the backend and the export file name
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Issues => "issues",
            Self::Audit => "audit",
        }
    }

    /// Heading shown above the table
    pub fn title(&self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Issues => "Issues",
            Self::Audit => "Audit Trail",
        }
    }

    /// Filters accepted by the list endpoint of this collection
    pub fn filter_spec(&self) -> FilterSpec {
        match self {
            Self::Projects => project::FILTERS,
            Self::Issues => issue::FILTERS,
            Self::Audit => audit::FILTERS,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Top-level screens reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Entity(EntityKind),
}

impl View {
    pub const ALL: [View; 4] = [
        View::Dashboard,
        View::Entity(EntityKind::Projects),
        View::Entity(EntityKind::Issues),
        View::Entity(EntityKind::Audit),
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dashboard" => Some(Self::Dashboard),
            "projects" => Some(Self::Entity(EntityKind::Projects)),
            "issues" => Some(Self::Entity(EntityKind::Issues)),
            "audit" => Some(Self::Entity(EntityKind::Audit)),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Entity(EntityKind::Projects) => "Projects",
            Self::Entity(EntityKind::Issues) => "Issues",
            Self::Entity(EntityKind::Audit) => "Audit",
        }
    }

    pub fn position(&self) -> usize {
        Self::ALL.iter().position(|view| view == self).unwrap_or(0)
    }

    /// The view after this one in sidebar order, wrapping around
    pub fn next(&self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A row type that can be listed, filtered and rendered by the data grid.
pub trait Record: Clone + Send + Sync + DeserializeOwned + 'static {
    const KIND: EntityKind;

    /// Column descriptors, in display order
    fn columns() -> Vec<Column<Self>>;

    /// Extract this type's page from a backend response
    fn from_page(page: RecordPage) -> Option<ListPage<Self>>;
}

/// Deserialize a JSON scalar (string, number, bool or null) into a String.
///
/// The backend is not consistent about ids being numbers or strings, and
/// optional columns come back as `null`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

use super::{lenient_string, EntityKind, Record};
use crate::backend::{ListPage, RecordPage};
use crate::grid::filters::FilterSpec;
use crate::grid::table::Column;
use crate::utils::datetime::format_timestamp;
use serde::{Deserialize, Serialize};

pub const FILTERS: FilterSpec = FilterSpec {
    entity: "projects",
    keys: &["jiraId", "name", "status"],
    option_keys: &["status"],
    date_range: None,
};

/// A Jira project as mirrored by the integration backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient_string")]
    pub jira_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub jira_project_key: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub lead: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
}

impl Record for Project {
    const KIND: EntityKind = EntityKind::Projects;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Jira ID", |p: &Project| p.jira_id.clone()).with_width(10),
            Column::new("Name", |p: &Project| p.name.clone()),
            Column::new("Key", |p: &Project| p.jira_project_key.clone()).with_width(10),
            Column::new("Lead", |p: &Project| p.lead.clone()),
            Column::new("Status", |p: &Project| p.status.clone()).with_width(12),
            Column::new("Created At", |p: &Project| format_timestamp(&p.created_at)).with_width(16),
        ]
    }

    fn from_page(page: RecordPage) -> Option<ListPage<Self>> {
        match page {
            RecordPage::Projects(page) => Some(page),
            _ => None,
        }
    }
}

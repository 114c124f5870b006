use super::{lenient_string, EntityKind, Record};
use crate::backend::{ListPage, RecordPage};
use crate::grid::filters::FilterSpec;
use crate::grid::table::Column;
use crate::utils::datetime::format_timestamp;
use serde::{Deserialize, Serialize};

pub const FILTERS: FilterSpec = FilterSpec {
    entity: "issues",
    keys: &["jiraId", "title", "type", "priority", "status", "project", "reporter"],
    option_keys: &["type", "priority", "status", "project", "reporter"],
    date_range: None,
};

/// A Jira issue as mirrored by the integration backend
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default, deserialize_with = "lenient_string")]
    pub jira_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub issue_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub priority: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub assignee: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub reporter: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub project: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub estimated_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub spent_time: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub updated_at: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
}

impl Record for Issue {
    const KIND: EntityKind = EntityKind::Issues;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Jira ID", |i: &Issue| i.jira_id.clone()).with_width(10),
            Column::new("Title", |i: &Issue| i.title.clone()).with_max_width(30),
            Column::new("Description", |i: &Issue| i.description.clone()).with_max_width(40),
            Column::new("Type", |i: &Issue| i.issue_type.clone()).with_width(8),
            Column::new("Priority", |i: &Issue| i.priority.clone()).with_width(9),
            Column::new("Assignee", |i: &Issue| i.assignee.clone()),
            Column::new("Reporter", |i: &Issue| i.reporter.clone()),
            Column::new("Project", |i: &Issue| i.project.clone()),
            Column::new("Estimated", |i: &Issue| i.estimated_time.clone()).with_width(9),
            Column::new("Spent", |i: &Issue| i.spent_time.clone()).with_width(8),
            Column::new("Created At", |i: &Issue| format_timestamp(&i.created_at)).with_width(16),
            Column::new("Updated At", |i: &Issue| format_timestamp(&i.updated_at)).with_width(16),
            Column::new("Status", |i: &Issue| i.status.clone()).with_width(12),
        ]
    }

    fn from_page(page: RecordPage) -> Option<ListPage<Self>> {
        match page {
            RecordPage::Issues(page) => Some(page),
            _ => None,
        }
    }
}

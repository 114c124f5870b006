use super::{lenient_string, EntityKind, Record};
use crate::backend::{ListPage, RecordPage};
use crate::grid::filters::{DateRange, FilterSpec};
use crate::grid::table::Column;
use crate::utils::datetime::format_timestamp;
use serde::{Deserialize, Serialize};

pub const FILTERS: FilterSpec = FilterSpec {
    entity: "audit",
    keys: &["entityType", "changedField", "startDate", "endDate"],
    option_keys: &["entityType", "changedField"],
    date_range: Some(DateRange {
        start: "startDate",
        end: "endDate",
    }),
};

/// One recorded field change on a synchronized project or issue
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub entity_type: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub entity_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub changed_field: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub old_value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub new_value: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub changed_at: String,
}

impl Record for AuditRecord {
    const KIND: EntityKind = EntityKind::Audit;

    fn columns() -> Vec<Column<Self>> {
        vec![
            Column::new("Entity Type", |a: &AuditRecord| a.entity_type.clone()).with_width(12),
            Column::new("Entity ID", |a: &AuditRecord| a.entity_id.clone()).with_width(10),
            Column::new("Changed Field", |a: &AuditRecord| a.changed_field.clone()).with_width(14),
            Column::new("Old Value", |a: &AuditRecord| a.old_value.clone()).with_max_width(32),
            Column::new("New Value", |a: &AuditRecord| a.new_value.clone()).with_max_width(32),
            Column::new("Changed At", |a: &AuditRecord| format_timestamp(&a.changed_at)).with_width(16),
        ]
    }

    fn from_page(page: RecordPage) -> Option<ListPage<Self>> {
        match page {
            RecordPage::Audit(page) => Some(page),
            _ => None,
        }
    }
}

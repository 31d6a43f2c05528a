//! Table layout: which columns exist and how their cells render.

use autolist_core::automation::{Automation, AutomationField, FieldValue};

/// Page sizes offered by the pagination control.
pub const PAGE_SIZE_OPTIONS: [u32; 5] = [5, 10, 25, 50, 100];

/// Limit used to fetch every record for the filter dropdowns.
pub const FILTER_OPTIONS_LIMIT: u32 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnConfig {
    pub field: AutomationField,
    pub label: &'static str,
    pub sortable: bool,
    pub filterable: bool,
}

const fn column(field: AutomationField, label: &'static str, filterable: bool) -> ColumnConfig {
    ColumnConfig {
        field,
        label,
        sortable: true,
        filterable,
    }
}

/// Columns in display order.
pub const AUTOMATION_COLUMNS: [ColumnConfig; 5] = [
    column(AutomationField::Id, "ID", false),
    column(AutomationField::Name, "Name", true),
    column(AutomationField::Status, "Status", true),
    column(AutomationField::CreationTime, "Creation Time", true),
    column(AutomationField::Type, "Type", true),
];

pub fn column_for(field: AutomationField) -> Option<&'static ColumnConfig> {
    AUTOMATION_COLUMNS.iter().find(|c| c.field == field)
}

/// `creationTime` -> `Creation Time`.
pub fn to_title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
    }
    out
}

/// Text shown in one table cell. Creation times render as calendar dates;
/// missing values render empty.
pub fn format_cell(record: &Automation, field: AutomationField) -> String {
    match record.field(field) {
        Some(FieldValue::Text(text)) => text.to_string(),
        Some(FieldValue::Time(time)) => time.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

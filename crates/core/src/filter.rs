//! Filter engine.
//!
//! Every active filter must match (logical AND). Per field:
//!
//! - `name`: case-insensitive substring.
//! - `type`, `status`: exact, case-sensitive match on the string form.
//! - `creationTime`: the record's `YYYY-MM-DD` date contains the filter
//!   value, so `2023` or `2023-01` select a whole year or month.
//!
//! A record with no value for a filtered field never matches.

use crate::automation::{Automation, AutomationField, FieldValue};
use crate::query::Filters;

/// Keep the records matching every filter, preserving their order.
pub fn apply_filters(mut records: Vec<Automation>, filters: &Filters) -> Vec<Automation> {
    if filters.is_empty() {
        return records;
    }
    records.retain(|record| matches_all(record, filters));
    records
}

/// Whether `record` satisfies every filter in `filters`.
pub fn matches_all(record: &Automation, filters: &Filters) -> bool {
    filters
        .iter()
        .all(|(field, value)| matches_field(record, *field, value))
}

fn matches_field(record: &Automation, field: AutomationField, needle: &str) -> bool {
    match field {
        AutomationField::CreationTime => record
            .creation_date()
            .is_some_and(|date| date.contains(needle)),
        AutomationField::Name => match record.field(field) {
            Some(FieldValue::Text(name)) => name.to_lowercase().contains(&needle.to_lowercase()),
            _ => false,
        },
        AutomationField::Type | AutomationField::Status | AutomationField::Id => {
            match record.field(field) {
                Some(FieldValue::Text(value)) => value == needle,
                _ => false,
            }
        }
    }
}

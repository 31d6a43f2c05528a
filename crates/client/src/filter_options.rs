//! Dropdown choices for the column filters.

use std::collections::BTreeSet;

use autolist_core::automation::{Automation, AutomationField};

/// Unique, sorted values per filterable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub names: Vec<String>,
    pub types: Vec<String>,
    pub statuses: Vec<String>,
    /// Calendar dates, `YYYY-MM-DD`.
    pub creation_times: Vec<String>,
}

impl FilterOptions {
    /// Collect options from a full record set. Records missing a value
    /// contribute nothing to that column.
    pub fn from_records(records: &[Automation]) -> Self {
        Self {
            names: unique(records.iter().filter_map(|r| r.name.clone())),
            types: unique(records.iter().filter_map(|r| r.kind.map(|k| k.as_str().to_string()))),
            statuses: unique(
                records
                    .iter()
                    .filter_map(|r| r.status.map(|s| s.as_str().to_string())),
            ),
            creation_times: unique(records.iter().filter_map(Automation::creation_date)),
        }
    }

    /// Choices for `field`; empty for columns without a filter.
    pub fn options_for(&self, field: AutomationField) -> &[String] {
        match field {
            AutomationField::Name => self.names.as_slice(),
            AutomationField::Type => self.types.as_slice(),
            AutomationField::Status => self.statuses.as_slice(),
            AutomationField::CreationTime => self.creation_times.as_slice(),
            AutomationField::Id => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
            && self.types.is_empty()
            && self.statuses.is_empty()
            && self.creation_times.is_empty()
    }
}

fn unique(values: impl Iterator<Item = String>) -> Vec<String> {
    values.collect::<BTreeSet<_>>().into_iter().collect()
}

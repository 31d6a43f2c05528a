//! Automation records and the closed set of fields the pipeline can address.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Kind of automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationType {
    Robot,
    Flow,
    Application,
}

impl AutomationType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Robot => "robot",
            Self::Flow => "flow",
            Self::Application => "application",
        }
    }
}

/// Lifecycle status of an automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutomationStatus {
    Active,
    Deleted,
    Inactive,
}

impl AutomationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Deleted => "deleted",
            Self::Inactive => "inactive",
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// One automation as stored in the snapshot.
///
/// Everything except `id` may be missing from the snapshot. Missing values
/// never match a filter and always sort last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Automation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<AutomationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AutomationStatus>,
}

/// A borrowed field value, typed by how it compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Time(Timestamp),
}

impl Automation {
    /// Read one field, `None` when the record has no value for it.
    pub fn field(&self, field: AutomationField) -> Option<FieldValue<'_>> {
        match field {
            AutomationField::Id => Some(FieldValue::Text(&self.id)),
            AutomationField::Name => self.name.as_deref().map(FieldValue::Text),
            AutomationField::Type => self.kind.map(|k| FieldValue::Text(k.as_str())),
            AutomationField::Status => self.status.map(|s| FieldValue::Text(s.as_str())),
            AutomationField::CreationTime => self.creation_time.map(FieldValue::Time),
        }
    }

    /// Creation time truncated to its UTC calendar date (`YYYY-MM-DD`).
    pub fn creation_date(&self) -> Option<String> {
        self.creation_time.map(|t| t.format("%Y-%m-%d").to_string())
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Addressable record fields, by wire name.
///
/// Declaration order is the canonical order used when filters are echoed
/// or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AutomationField {
    Id,
    Name,
    Type,
    Status,
    CreationTime,
}

/// Fields accepted as filters, in canonical order.
pub const FILTERABLE_FIELDS: [AutomationField; 4] = [
    AutomationField::Name,
    AutomationField::Type,
    AutomationField::Status,
    AutomationField::CreationTime,
];

impl AutomationField {
    /// Every field, in canonical order.
    pub const ALL: [AutomationField; 5] = [
        Self::Id,
        Self::Name,
        Self::Type,
        Self::Status,
        Self::CreationTime,
    ];

    /// Wire name as used in query strings and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Type => "type",
            Self::Status => "status",
            Self::CreationTime => "creationTime",
        }
    }

    /// Look a field up by its exact wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }

    pub fn is_filterable(self) -> bool {
        !matches!(self, Self::Id)
    }
}

impl fmt::Display for AutomationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

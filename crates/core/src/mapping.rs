//! Field mapping for Gantry records
//!
//! Associates logical roles (name, start date, progress...) with the actual
//! field names found on incoming records, and resolves those roles against a
//! record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::record::RawRecord;

/// Logical role a record field can play on the timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Id,
    TaskName,
    StartDate,
    EndDate,
    Progress,
    ColorField,
}

impl FieldRole {
    /// All roles, in the order they appear in a mapping file
    pub const ALL: [FieldRole; 6] = [
        FieldRole::TaskName,
        FieldRole::StartDate,
        FieldRole::EndDate,
        FieldRole::Progress,
        FieldRole::Id,
        FieldRole::ColorField,
    ];

    /// Field name used when the mapping has no override for this role
    pub fn default_field(&self) -> &'static str {
        match self {
            FieldRole::Id => "id",
            FieldRole::TaskName => "name",
            FieldRole::StartDate => "startDate",
            FieldRole::EndDate => "endDate",
            FieldRole::Progress => "progress",
            FieldRole::ColorField => "status",
        }
    }

    /// Returns the key used for this role in mapping files
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldRole::Id => "id",
            FieldRole::TaskName => "taskName",
            FieldRole::StartDate => "startDate",
            FieldRole::EndDate => "endDate",
            FieldRole::Progress => "progress",
            FieldRole::ColorField => "colorField",
        }
    }
}

impl std::fmt::Display for FieldRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration associating roles with record field names
///
/// Every role is optional; an absent role falls back to
/// [`FieldRole::default_field`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,

    /// Extra fields shown alongside a task, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display_fields: Vec<String>,

    /// Category value -> display colour token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_map: Option<BTreeMap<String, String>>,
}

impl FieldMapping {
    /// Create a mapping that uses the default field name for every role
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the field name for a role
    pub fn with_field(mut self, role: FieldRole, field: impl Into<String>) -> Self {
        let field = Some(field.into());
        match role {
            FieldRole::Id => self.id = field,
            FieldRole::TaskName => self.task_name = field,
            FieldRole::StartDate => self.start_date = field,
            FieldRole::EndDate => self.end_date = field,
            FieldRole::Progress => self.progress = field,
            FieldRole::ColorField => self.color_field = field,
        }
        self
    }

    /// Append a display field
    pub fn with_display_field(mut self, field: impl Into<String>) -> Self {
        self.display_fields.push(field.into());
        self
    }

    /// Add a colour for a category value
    pub fn with_color(mut self, category: impl Into<String>, color: impl Into<String>) -> Self {
        self.color_map
            .get_or_insert_with(BTreeMap::new)
            .insert(category.into(), color.into());
        self
    }

    /// The configured override for a role, if any
    fn override_for(&self, role: FieldRole) -> Option<&str> {
        match role {
            FieldRole::Id => self.id.as_deref(),
            FieldRole::TaskName => self.task_name.as_deref(),
            FieldRole::StartDate => self.start_date.as_deref(),
            FieldRole::EndDate => self.end_date.as_deref(),
            FieldRole::Progress => self.progress.as_deref(),
            FieldRole::ColorField => self.color_field.as_deref(),
        }
    }

    /// The record field name that carries a role
    pub fn field_name(&self, role: FieldRole) -> &str {
        self.override_for(role)
            .unwrap_or_else(|| role.default_field())
    }

    /// Resolve a role on a record.
    ///
    /// Returns `None` when the record has no such field; absence is never an
    /// error here, the normalizer decides what it defaults to.
    pub fn resolve<'r>(&self, record: &'r RawRecord, role: FieldRole) -> Option<&'r Value> {
        record.get(self.field_name(role))
    }

    /// Mapping with every role spelled out, for display
    pub fn effective(&self) -> FieldMapping {
        let mut resolved = self.clone();
        for role in FieldRole::ALL {
            if self.override_for(role).is_none() {
                resolved = resolved.with_field(role, role.default_field());
            }
        }
        resolved
    }
}

//! Domain models for the todo database.
//!
//! These models are storage-agnostic and represent the core entities
//! used throughout the application.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Priority
// =============================================================================

/// Todo priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "unknown priority '{}' (expected low, medium or high)",
                other
            )),
        }
    }
}

// =============================================================================
// Todo
// =============================================================================

/// A persisted todo record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Opaque identifier assigned by the storage layer.
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// Free-form workflow status.
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    /// `None` until the first update.
    pub updated_at: Option<DateTime<Utc>>,
}

/// The client-writable fields of a todo.
///
/// Create inserts these as a new record; update replaces all of them on an
/// existing record, so a `None` here clears the stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFields {
    pub name: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<String>,
}

impl Todo {
    /// Build a fresh record from validated fields.
    pub fn from_fields(id: String, fields: TodoFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            priority: fields.priority,
            status: fields.status,
            created_at,
            updated_at: None,
        }
    }

    /// Replace the writable fields, keeping id and `created_at`.
    pub fn replace_fields(&mut self, fields: TodoFields, updated_at: DateTime<Utc>) {
        self.name = fields.name;
        self.description = fields.description;
        self.priority = fields.priority;
        self.status = fields.status;
        self.updated_at = Some(updated_at);
    }
}

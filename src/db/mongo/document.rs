//! BSON layout of a todo in the `todos` collection.

use chrono::{DateTime, Utc};
use mongodb::bson::{DateTime as BsonDateTime, Document, doc, oid::ObjectId};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::db::{DbError, DbResult, Priority, Todo, TodoFields};

pub(crate) const COLLECTION: &str = "todos";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct TodoDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: Option<String>,
    // Early records were written with `shortName`; `name` wins when both exist
    #[serde(rename = "shortName", default, skip_serializing)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<BsonDateTime>,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<BsonDateTime>,
}

impl TodoDocument {
    /// A new document for insertion; the server assigns `_id`.
    pub fn new(fields: &TodoFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: Some(fields.name.clone()),
            short_name: None,
            description: fields.description.clone(),
            priority: fields.priority.map(|p| p.as_str().to_string()),
            status: fields.status.clone(),
            created_at: Some(to_bson(created_at)),
            updated_at: None,
        }
    }

    /// `$set` update replacing every writable field.
    pub fn replace_update(fields: &TodoFields, updated_at: DateTime<Utc>) -> Document {
        let priority = fields.priority.map(|p| p.as_str());
        doc! {
            "$set": {
                "name": fields.name.as_str(),
                "description": fields.description.as_deref(),
                "priority": priority,
                "status": fields.status.as_deref(),
                "updatedAt": to_bson(updated_at),
            }
        }
    }

    pub fn into_todo(self) -> DbResult<Todo> {
        let oid = self.id.ok_or_else(|| DbError::Database {
            message: "todo document has no _id".to_string(),
        })?;

        // Records without createdAt fall back to the id's embedded timestamp
        let created_at = from_bson(self.created_at.unwrap_or_else(|| oid.timestamp()))?;
        let updated_at = self.updated_at.map(from_bson).transpose()?;

        let priority = self.priority.and_then(|raw| match raw.parse::<Priority>() {
            Ok(p) => Some(p),
            Err(e) => {
                warn!(id = %oid, "Dropping unrecognised stored priority: {}", e);
                None
            }
        });

        Ok(Todo {
            id: oid.to_hex(),
            name: self.name.or(self.short_name).unwrap_or_default(),
            description: self.description,
            priority,
            status: self.status,
            created_at,
            updated_at,
        })
    }
}

fn to_bson(ts: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(ts.timestamp_millis())
}

fn from_bson(ts: BsonDateTime) -> DbResult<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ts.timestamp_millis()).ok_or_else(|| {
        DbError::Database {
            message: format!("timestamp out of range: {}", ts.timestamp_millis()),
        }
    })
}

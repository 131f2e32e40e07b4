//! Database utility functions.

use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;

use crate::db::{DbError, DbResult};

/// Current time truncated to millisecond precision.
///
/// BSON datetimes carry milliseconds, so every backend stamps records at
/// that precision and round-trips compare equal.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Generate a fresh opaque entity id (24 hex characters).
pub fn generate_entity_id() -> String {
    ObjectId::new().to_hex()
}

/// Parse an opaque id into the storage object id.
pub fn parse_entity_id(id: &str) -> DbResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| DbError::InvalidId { id: id.to_string() })
}

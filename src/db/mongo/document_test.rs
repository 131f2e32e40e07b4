//! Tests for the BSON document mapping.

use chrono::{TimeZone, Utc};
use mongodb::bson::{Bson, DateTime as BsonDateTime, doc, from_document, oid::ObjectId, to_document};

use super::document::TodoDocument;
use crate::db::{DbError, Priority, TodoFields};

fn fields() -> TodoFields {
    TodoFields {
        name: "Milk".to_string(),
        description: None,
        priority: Some(Priority::High),
        status: Some("open".to_string()),
    }
}

#[test]
fn new_document_omits_id_and_uses_camel_case_timestamps() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let document = to_document(&TodoDocument::new(&fields(), created)).unwrap();

    assert!(!document.contains_key("_id"));
    assert_eq!(document.get_str("name").unwrap(), "Milk");
    assert_eq!(document.get_str("priority").unwrap(), "high");
    assert_eq!(document.get("description"), Some(&Bson::Null));
    assert_eq!(
        document.get_datetime("createdAt").unwrap().timestamp_millis(),
        created.timestamp_millis()
    );
    assert_eq!(document.get("updatedAt"), Some(&Bson::Null));
}

#[test]
fn replace_update_sets_every_writable_field() {
    let updated = Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap();
    let update = TodoDocument::replace_update(
        &TodoFields {
            name: "Bread".to_string(),
            description: None,
            priority: None,
            status: None,
        },
        updated,
    );

    let set = update.get_document("$set").unwrap();
    assert_eq!(set.get_str("name").unwrap(), "Bread");
    assert_eq!(set.get("description"), Some(&Bson::Null));
    assert_eq!(set.get("priority"), Some(&Bson::Null));
    assert_eq!(set.get("status"), Some(&Bson::Null));
    assert_eq!(
        set.get_datetime("updatedAt").unwrap().timestamp_millis(),
        updated.timestamp_millis()
    );
    assert!(!set.contains_key("createdAt"));
    assert!(!set.contains_key("_id"));
}

#[test]
fn stored_document_converts_to_todo() {
    let oid = ObjectId::new();
    let created = BsonDateTime::from_millis(1_714_564_800_000);
    let document = doc! {
        "_id": oid,
        "name": "Milk",
        "description": "semi-skimmed",
        "priority": "medium",
        "status": "open",
        "createdAt": created,
        "updatedAt": Bson::Null,
    };

    let todo = from_document::<TodoDocument>(document)
        .unwrap()
        .into_todo()
        .unwrap();

    assert_eq!(todo.id, oid.to_hex());
    assert_eq!(todo.name, "Milk");
    assert_eq!(todo.description.as_deref(), Some("semi-skimmed"));
    assert_eq!(todo.priority, Some(Priority::Medium));
    assert_eq!(todo.status.as_deref(), Some("open"));
    assert_eq!(todo.created_at.timestamp_millis(), 1_714_564_800_000);
    assert!(todo.updated_at.is_none());
}

#[test]
fn legacy_document_without_created_at_uses_id_timestamp() {
    let oid = ObjectId::new();
    let document = doc! {
        "_id": oid,
        "shortName": "shopping",
        "description": "A crazy shopping spree",
    };

    let todo = from_document::<TodoDocument>(document)
        .unwrap()
        .into_todo()
        .unwrap();

    assert_eq!(todo.name, "shopping");
    assert_eq!(
        todo.created_at.timestamp_millis(),
        oid.timestamp().timestamp_millis()
    );
}

#[test]
fn null_name_falls_back_to_empty() {
    let document = doc! {
        "_id": ObjectId::new(),
        "name": Bson::Null,
        "createdAt": BsonDateTime::now(),
    };

    let todo = from_document::<TodoDocument>(document)
        .unwrap()
        .into_todo()
        .unwrap();

    assert_eq!(todo.name, "");
}

#[test]
fn name_wins_over_legacy_short_name() {
    let document = doc! {
        "_id": ObjectId::new(),
        "name": "groceries",
        "shortName": "shopping",
    };

    let todo = from_document::<TodoDocument>(document)
        .unwrap()
        .into_todo()
        .unwrap();

    assert_eq!(todo.name, "groceries");
}

#[test]
fn null_name_uses_legacy_short_name() {
    let document = doc! {
        "_id": ObjectId::new(),
        "name": Bson::Null,
        "shortName": "shopping",
    };

    let todo = from_document::<TodoDocument>(document)
        .unwrap()
        .into_todo()
        .unwrap();

    assert_eq!(todo.name, "shopping");
}

#[test]
fn new_document_never_writes_short_name() {
    let document = to_document(&TodoDocument::new(&fields(), Utc::now())).unwrap();
    assert!(!document.contains_key("shortName"));
}

#[test]
fn unrecognised_stored_priority_is_dropped() {
    let document = doc! {
        "_id": ObjectId::new(),
        "name": "Milk",
        "priority": "urgent",
    };

    let todo = from_document::<TodoDocument>(document)
        .unwrap()
        .into_todo()
        .unwrap();

    assert!(todo.priority.is_none());
}

#[test]
fn document_without_id_cannot_become_a_todo() {
    let created = Utc::now();
    let result = TodoDocument::new(&fields(), created).into_todo();
    assert!(matches!(result, Err(DbError::Database { .. })));
}

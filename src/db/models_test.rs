//! Tests for domain models.

use chrono::{Duration, Utc};

use crate::db::{Priority, Todo, TodoFields};

fn fields(name: &str) -> TodoFields {
    TodoFields {
        name: name.to_string(),
        description: Some("two litres".to_string()),
        priority: Some(Priority::High),
        status: Some("open".to_string()),
    }
}

#[test]
fn priority_parses_case_insensitively() {
    assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
    assert_eq!("Medium".parse::<Priority>().unwrap(), Priority::Medium);
    assert_eq!(" HIGH ".parse::<Priority>().unwrap(), Priority::High);
}

#[test]
fn priority_rejects_unknown_values() {
    let err = "urgent".parse::<Priority>().unwrap_err();
    assert!(err.contains("urgent"));
}

#[test]
fn priority_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Priority::Medium).unwrap(), "\"medium\"");
    assert_eq!(Priority::High.to_string(), "high");
}

#[test]
fn from_fields_leaves_updated_at_unset() {
    let now = Utc::now();
    let todo = Todo::from_fields("id1".to_string(), fields("Milk"), now);

    assert_eq!(todo.id, "id1");
    assert_eq!(todo.name, "Milk");
    assert_eq!(todo.priority, Some(Priority::High));
    assert_eq!(todo.created_at, now);
    assert!(todo.updated_at.is_none());
}

#[test]
fn replace_fields_clears_omitted_values_and_keeps_identity() {
    let created = Utc::now();
    let mut todo = Todo::from_fields("id1".to_string(), fields("Milk"), created);
    let later = created + Duration::seconds(5);

    todo.replace_fields(
        TodoFields {
            name: "Bread".to_string(),
            description: None,
            priority: None,
            status: None,
        },
        later,
    );

    assert_eq!(todo.id, "id1");
    assert_eq!(todo.created_at, created);
    assert_eq!(todo.name, "Bread");
    assert!(todo.description.is_none());
    assert!(todo.priority.is_none());
    assert!(todo.status.is_none());
    assert_eq!(todo.updated_at, Some(later));
}

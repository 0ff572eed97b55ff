//! Todo record and request validation.
//!
//! Request bodies arrive as loose JSON so that a missing or wrongly-typed
//! field becomes a 400 with the API's own message instead of an extractor
//! rejection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

pub fn parse_id(raw: &str) -> Result<i64, ServiceError> {
    raw.parse().map_err(|_| ServiceError::Validation("Invalid ID"))
}

/// Extracts the trimmed title from a create body.
pub fn parse_create(body: &Value) -> Result<String, ServiceError> {
    match body.get("title") {
        Some(Value::String(title)) if !title.trim().is_empty() => Ok(title.trim().to_string()),
        _ => Err(ServiceError::Validation("Title is required")),
    }
}

/// Builds a patch from the correctly-typed fields of an update body.
/// Fields of the wrong type are ignored.
pub fn parse_update(body: &Value) -> Result<TodoPatch, ServiceError> {
    let patch = TodoPatch {
        title: body
            .get("title")
            .and_then(Value::as_str)
            .map(|title| title.trim().to_string()),
        completed: body.get("completed").and_then(Value::as_bool),
    };

    if patch.is_empty() {
        return Err(ServiceError::Validation("No valid fields to update"));
    }
    if patch.title.as_deref() == Some("") {
        return Err(ServiceError::Validation("Title cannot be empty"));
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn todo_serializes_with_camel_case_timestamp() {
        let todo = Todo {
            id: 7,
            title: "Test".to_string(),
            completed: false,
            created_at: "2024-05-01T12:00:00.250Z".parse().unwrap(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert!(json["createdAt"].as_str().unwrap().starts_with("2024-05-01T12:00:00.250"));
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn parse_id_accepts_integers_only() {
        assert_eq!(parse_id("12").unwrap(), 12);
        for raw in ["abc", "1.5", "", " 3"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.to_string(), "Invalid ID", "{raw:?}");
        }
    }

    #[test]
    fn parse_create_trims_title() {
        let title = parse_create(&json!({"title": "  buy milk  "})).unwrap();
        assert_eq!(title, "buy milk");
    }

    #[test]
    fn parse_create_rejects_bad_titles() {
        for body in [
            json!({}),
            json!({"title": ""}),
            json!({"title": "   "}),
            json!({"title": 42}),
            json!({"title": null}),
            json!(["title"]),
        ] {
            let err = parse_create(&body).unwrap_err();
            assert!(matches!(err, ServiceError::Validation("Title is required")), "{body}");
        }
    }

    #[test]
    fn parse_update_keeps_typed_fields_only() {
        let patch = parse_update(&json!({"title": " new ", "completed": "yes"})).unwrap();
        assert_eq!(patch.title.as_deref(), Some("new"));
        assert_eq!(patch.completed, None);

        let patch = parse_update(&json!({"completed": true, "title": 3})).unwrap();
        assert_eq!(patch.title, None);
        assert_eq!(patch.completed, Some(true));
    }

    #[test]
    fn parse_update_requires_a_field() {
        for body in [json!({}), json!({"title": 1, "completed": "no"}), json!(null)] {
            let err = parse_update(&body).unwrap_err();
            assert_eq!(err.to_string(), "No valid fields to update", "{body}");
        }
    }

    #[test]
    fn parse_update_rejects_blank_title() {
        let err = parse_update(&json!({"title": "  ", "completed": true})).unwrap_err();
        assert_eq!(err.to_string(), "Title cannot be empty");
    }
}

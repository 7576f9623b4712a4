//! Book model and request payload validation

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::{field_errors, AppError, AppResult};

/// Writable fields, in declaration order
pub const BOOK_FIELDS: [&str; 2] = ["title", "author"];

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Store-assigned identifier
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl Book {
    pub fn new(id: i64, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
        }
    }
}

/// Full set of writable book fields, used for both create and replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookFields {
    pub title: String,
    pub author: String,
}

/// A single field as it arrived in the request body
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue {
    #[default]
    Missing,
    Null,
    Text(String),
    Other(Value),
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => FieldValue::Null,
            Value::String(s) => FieldValue::Text(s),
            other => FieldValue::Other(other),
        })
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Missing | FieldValue::Null => serializer.serialize_none(),
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Other(value) => value.serialize(serializer),
        }
    }
}

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn validate_string_field(value: &FieldValue) -> Result<(), ValidationError> {
    match value {
        FieldValue::Text(_) => Ok(()),
        FieldValue::Missing => Err(with_message("required", "This field is required.")),
        FieldValue::Null => Err(with_message("null", "This field may not be null.")),
        FieldValue::Other(_) => Err(with_message("invalid", "Not a valid string.")),
    }
}

/// Raw book body; unknown keys (including `id`) are ignored
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BookPayload {
    #[serde(default)]
    #[validate(custom(function = "validate_string_field"))]
    pub title: FieldValue,
    #[serde(default)]
    #[validate(custom(function = "validate_string_field"))]
    pub author: FieldValue,
}

impl BookPayload {
    /// Parse and validate an arbitrary JSON body into a full field set
    pub fn parse(body: Value) -> AppResult<BookFields> {
        if !body.is_object() {
            return Err(AppError::field(
                "non_field_errors",
                format!(
                    "Invalid data. Expected a dictionary, but got {}.",
                    json_kind(&body)
                ),
            ));
        }

        let payload: BookPayload =
            serde_json::from_value(body).map_err(|e| AppError::BadRequest(e.to_string()))?;
        payload
            .validate()
            .map_err(|e| AppError::Validation(field_errors(&e, &BOOK_FIELDS)))?;

        match (payload.title, payload.author) {
            (FieldValue::Text(title), FieldValue::Text(author)) => Ok(BookFields { title, author }),
            _ => Err(AppError::Internal("validated book payload lost a field".to_string())),
        }
    }
}

/// Client-facing name of a JSON value's type
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn errors_of(body: Value) -> Value {
        match BookPayload::parse(body) {
            Err(AppError::Validation(errors)) => serde_json::to_value(errors).unwrap(),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let fields = BookPayload::parse(json!({"title": "Dune", "author": "Herbert"})).unwrap();
        assert_eq!(
            fields,
            BookFields {
                title: "Dune".into(),
                author: "Herbert".into()
            }
        );
    }

    #[test]
    fn ignores_id_and_unknown_keys() {
        let fields =
            BookPayload::parse(json!({"id": 42, "title": "Emma", "author": "Austen", "isbn": "x"}))
                .unwrap();
        assert_eq!(fields.title, "Emma");
        assert_eq!(fields.author, "Austen");
    }

    #[test]
    fn blank_title_is_accepted_but_missing_author_is_not() {
        assert_eq!(
            errors_of(json!({"title": ""})),
            json!({"author": ["This field is required."]})
        );
    }

    #[test]
    fn reports_every_field_in_declaration_order() {
        let body = json!({"author": null, "title": 12});
        assert_eq!(
            errors_of(body.clone()),
            json!({
                "title": ["Not a valid string."],
                "author": ["This field may not be null."]
            })
        );
        let Err(AppError::Validation(errors)) = BookPayload::parse(body) else {
            panic!("expected validation error");
        };
        let keys: Vec<_> = errors.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["title", "author"]);
    }

    #[test]
    fn rejects_non_object_bodies() {
        assert_eq!(
            errors_of(json!([1, 2])),
            json!({"non_field_errors": ["Invalid data. Expected a dictionary, but got list."]})
        );
        assert_eq!(
            errors_of(json!("Dune")),
            json!({"non_field_errors": ["Invalid data. Expected a dictionary, but got str."]})
        );
    }

    #[test]
    fn field_values_serialize_as_received() {
        let payload: BookPayload =
            serde_json::from_value(json!({"title": "Dune", "author": [1]})).unwrap();
        assert_eq!(serde_json::to_value(&payload.title).unwrap(), json!("Dune"));
        assert_eq!(serde_json::to_value(&payload.author).unwrap(), json!([1]));
        assert_eq!(serde_json::to_value(FieldValue::Missing).unwrap(), Value::Null);
        assert_eq!(
            errors_of(json!({"title": "Dune", "author": [1]})),
            json!({"author": ["Not a valid string."]})
        );
    }
}

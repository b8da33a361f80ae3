//! Draft parsing and payload validation for content records.
//!
//! Incoming JSON is split into the content payload and the shared envelope
//! fields (`order`, `isActive`, `_id`). Server-assigned fields can never be
//! client-supplied; the payload is then checked against the resource's
//! registry definition before anything touches storage.

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::registry::{FieldKind, ResourceDef};

/// Fields owned by the endpoint, never writable through the payload
const SERVER_FIELDS: &[&str] = &["_id", "createdAt", "updatedAt"];

/// Errors that can occur while shaping or validating a record
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("field '{0}' is assigned by the server and cannot be supplied")]
    ServerFieldNotAllowed(String),
    #[error("invalid JSON body: {0}")]
    InvalidJson(String),
    #[error("missing required field '{0}'")]
    MissingRequiredField(&'static str),
    #[error("field '{field}' must be {expected}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
    },
    #[error("'{value}' is not a valid value for '{field}'")]
    UnknownPartitionValue { field: String, value: String },
    #[error("update requires an '_id' field")]
    MissingIdentifier,
    #[error("'{0}' is not a valid record identifier")]
    InvalidIdentifier(String),
}

/// A parsed, not-yet-persisted record mutation
#[derive(Debug, Clone)]
pub struct Draft {
    pub id: Option<Uuid>,
    pub payload: Map<String, Value>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

impl Draft {
    /// Shape a Create body. Server-assigned fields are rejected outright;
    /// `order` and `isActive` are client-settable and split off the payload.
    pub fn from_create_input(body: Value) -> Result<Self, RecordError> {
        let mut draft = Self::from_body(body)?;
        if draft.id.take().is_some() {
            return Err(RecordError::ServerFieldNotAllowed("_id".to_string()));
        }
        Ok(draft)
    }

    /// Shape an Update body: `_id` selects the record, everything else is a
    /// partial patch.
    pub fn from_update_input(body: Value) -> Result<Self, RecordError> {
        let draft = Self::from_body(body)?;
        if draft.id.is_none() {
            return Err(RecordError::MissingIdentifier);
        }
        Ok(draft)
    }

    fn from_body(body: Value) -> Result<Self, RecordError> {
        let map = match body {
            Value::Object(map) => map,
            _ => return Err(RecordError::InvalidJson("expected a JSON object".to_string())),
        };

        let mut draft = Draft {
            id: None,
            payload: Map::new(),
            order: None,
            is_active: None,
        };

        for (key, value) in map {
            match key.as_str() {
                "_id" => {
                    let raw = value.as_str().unwrap_or_default().to_string();
                    let id = Uuid::parse_str(&raw)
                        .map_err(|_| RecordError::InvalidIdentifier(raw))?;
                    draft.id = Some(id);
                }
                "order" => {
                    let n = value
                        .as_i64()
                        .ok_or_else(|| RecordError::InvalidFieldType {
                            field: "order".to_string(),
                            expected: "an integer",
                        })?;
                    draft.order = Some(n as i32);
                }
                "isActive" => {
                    let b = value.as_bool().ok_or_else(|| RecordError::InvalidFieldType {
                        field: "isActive".to_string(),
                        expected: "a boolean",
                    })?;
                    draft.is_active = Some(b);
                }
                _ if SERVER_FIELDS.contains(&key.as_str()) => {
                    return Err(RecordError::ServerFieldNotAllowed(key));
                }
                _ => {
                    draft.payload.insert(key, value);
                }
            }
        }

        Ok(draft)
    }

    /// Validate the payload against the resource definition. With
    /// `require_required` (Create), the title-equivalent and all required
    /// fields must be present; partial updates validate only supplied fields.
    pub fn validate(&self, def: &ResourceDef, require_required: bool) -> Result<(), RecordError> {
        if require_required {
            for field in def.fields.iter().filter(|f| f.required) {
                match self.payload.get(field.name) {
                    None | Some(Value::Null) => {
                        return Err(RecordError::MissingRequiredField(field.name))
                    }
                    _ => {}
                }
            }
        }

        for (name, value) in &self.payload {
            if let Some(field) = def.field(name) {
                validate_field_value(name, field.kind, field.required, value)?;
            } else if let Some(partition) = def.partition(name) {
                validate_partition_value(partition.field, partition, value)?;
            }
            // Undeclared fields pass through untouched; records are
            // self-contained and payload shapes vary across page sections.
        }

        Ok(())
    }
}

fn validate_field_value(
    name: &str,
    kind: FieldKind,
    required: bool,
    value: &Value,
) -> Result<(), RecordError> {
    if value.is_null() {
        // Explicit null clears an optional field
        return Ok(());
    }

    match kind {
        FieldKind::Text => {
            let s = value.as_str().ok_or_else(|| type_error(name, "a string"))?;
            if required && s.trim().is_empty() {
                return Err(RecordError::InvalidFieldType {
                    field: name.to_string(),
                    expected: "a non-empty string",
                });
            }
        }
        FieldKind::Number => {
            if !value.is_number() {
                return Err(type_error(name, "a number"));
            }
        }
        FieldKind::Flag => {
            if !value.is_boolean() {
                return Err(type_error(name, "a boolean"));
            }
        }
        FieldKind::Image => {
            let obj = value.as_object().ok_or_else(|| type_error(name, "an object"))?;
            let url = obj.get("url").and_then(Value::as_str).unwrap_or_default();
            if url.trim().is_empty() {
                return Err(RecordError::InvalidFieldType {
                    field: format!("{}.url", name),
                    expected: "a non-empty string",
                });
            }
            if let Some(alt) = obj.get("alt") {
                if !alt.is_string() && !alt.is_null() {
                    return Err(type_error(&format!("{}.alt", name), "a string"));
                }
            }
        }
        FieldKind::TextList => {
            let items = value.as_array().ok_or_else(|| type_error(name, "an array"))?;
            if items.iter().any(|v| !v.is_string()) {
                return Err(type_error(name, "an array of strings"));
            }
        }
        FieldKind::ItemList => {
            let items = value.as_array().ok_or_else(|| type_error(name, "an array"))?;
            if items.iter().any(|v| !v.is_object()) {
                return Err(type_error(name, "an array of objects"));
            }
        }
    }

    Ok(())
}

fn validate_partition_value(
    name: &str,
    partition: &crate::registry::PartitionDef,
    value: &Value,
) -> Result<(), RecordError> {
    if value.is_null() {
        return Ok(());
    }

    if partition.multi {
        let items = value.as_array().ok_or_else(|| type_error(name, "an array"))?;
        for item in items {
            let s = item.as_str().ok_or_else(|| type_error(name, "an array of strings"))?;
            if !partition.allows(s) {
                return Err(RecordError::UnknownPartitionValue {
                    field: name.to_string(),
                    value: s.to_string(),
                });
            }
        }
    } else {
        let s = value.as_str().ok_or_else(|| type_error(name, "a string"))?;
        if !partition.allows(s) {
            return Err(RecordError::UnknownPartitionValue {
                field: name.to_string(),
                value: s.to_string(),
            });
        }
    }

    Ok(())
}

fn type_error(field: &str, expected: &'static str) -> RecordError {
    RecordError::InvalidFieldType {
        field: field.to_string(),
        expected,
    }
}

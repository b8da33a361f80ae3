//! The shared CRUD sequence behind every content endpoint.
//!
//! Each operation runs the same stages in order: shape the draft, validate it
//! against the registry definition, apply creation defaults, perform the
//! single document write, then append the audit entry. A failure at any stage
//! stops the sequence, so a rejected write never leaves a partial state or an
//! audit record.

use serde_json::{json, Value};
use tracing::info;

use crate::database::audit::{self, AuditAction};
use crate::database::record::Draft;
use crate::database::store::{ContentStore, ListFilter};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::registry::ResourceDef;

/// Translate validated partition query parameters into store filters.
/// Unknown keys and out-of-enumeration values are rejected; `all` is handled
/// by the caller before this point.
pub fn partition_filters(
    def: &ResourceDef,
    params: &std::collections::HashMap<String, String>,
) -> Result<Vec<ListFilter>, ApiError> {
    let mut filters = Vec::with_capacity(params.len());

    for (key, value) in params {
        let partition = def.partition(key).ok_or_else(|| {
            ApiError::validation_error(format!(
                "'{}' is not a filterable field for {}",
                key, def.path
            ))
        })?;

        if !partition.allows(value) {
            return Err(ApiError::validation_error(format!(
                "'{}' is not a valid value for '{}'",
                value, key
            )));
        }

        filters.push(ListFilter {
            field: partition.field.to_string(),
            value: value.clone(),
            multi: partition.multi,
        });
    }

    Ok(filters)
}

pub async fn list(
    def: &ResourceDef,
    filters: &[ListFilter],
    include_inactive: bool,
) -> Result<Vec<Value>, ApiError> {
    let records = ContentStore::list(def.path, filters, include_inactive).await?;
    Ok(records.iter().map(|r| r.to_api_value()).collect())
}

pub async fn create(def: &ResourceDef, actor: &AuthUser, body: Value) -> Result<Value, ApiError> {
    let draft = Draft::from_create_input(body)?;
    draft.validate(def, true)?;

    // Defaults: append to the end of the record's partition, visible
    let display_order = match draft.order {
        Some(order) => order,
        None => {
            let count = ContentStore::count_partition(def, &draft).await?;
            (count + 1) as i32
        }
    };
    let is_active = draft.is_active.unwrap_or(true);

    let record = ContentStore::insert(def.path, draft.payload, display_order, is_active).await?;
    let wire = record.to_api_value();

    audit::record_entry(AuditAction::Create, def.path, actor, wire.clone()).await?;
    info!(resource = def.path, id = %record.id, "content record created");

    Ok(wire)
}

pub async fn update(def: &ResourceDef, actor: &AuthUser, body: Value) -> Result<Value, ApiError> {
    let draft = Draft::from_update_input(body)?;
    draft.validate(def, false)?;

    let id = draft
        .id
        .ok_or_else(|| ApiError::validation_error("update requires an '_id' field"))?;
    let changed: Vec<&String> = draft.payload.keys().collect();
    let details = json!({
        "_id": id,
        "changed": changed,
        "order": draft.order,
        "isActive": draft.is_active,
    });

    let record =
        ContentStore::update(def.path, id, draft.payload, draft.order, draft.is_active).await?;
    let wire = record.to_api_value();

    audit::record_entry(AuditAction::Update, def.path, actor, details).await?;
    info!(resource = def.path, id = %record.id, "content record updated");

    Ok(wire)
}

pub async fn delete(def: &ResourceDef, actor: &AuthUser, id: uuid::Uuid) -> Result<(), ApiError> {
    ContentStore::delete(def.path, id).await?;

    audit::record_entry(AuditAction::Delete, def.path, actor, json!({ "_id": id })).await?;
    info!(resource = def.path, id = %id, "content record deleted");

    Ok(())
}

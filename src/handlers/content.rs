//! Generic content handlers for `/api/content/{*resource}`.
//!
//! One set of four handlers serves every registered content type; the
//! wildcard path segment selects the `ResourceDef` and everything else is
//! uniform. Bodies are parsed by hand so malformed JSON surfaces through the
//! same `{success:false, error}` envelope as every other failure.

use axum::{
    extract::{Path, Query},
    response::Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::{AuthUser, OptionalAuthUser};
use crate::registry::{self, ResourceDef};
use crate::services::content_service;

fn resolve(resource: &str) -> Result<&'static ResourceDef, ApiError> {
    registry::lookup(resource)
        .ok_or_else(|| ApiError::not_found(format!("unknown content resource '{}'", resource)))
}

fn parse_body(body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::invalid_json(format!("invalid JSON body: {}", e)))
}

/// GET /api/content/{*resource} - list records
///
/// Public for active records; `all=true` additionally returns inactive
/// records and requires a staff credential.
pub async fn list(
    Path(resource): Path<String>,
    Query(mut params): Query<HashMap<String, String>>,
    OptionalAuthUser(user): OptionalAuthUser,
) -> Result<Json<Value>, ApiError> {
    let def = resolve(&resource)?;

    let all = params
        .remove("all")
        .map(|v| matches!(v.as_str(), "true" | "1"))
        .unwrap_or(false);

    if all && user.is_none() {
        return Err(ApiError::unauthorized(
            "listing inactive content requires a staff credential",
        ));
    }

    let filters = content_service::partition_filters(def, &params)?;
    let records = content_service::list(def, &filters, all).await?;

    Ok(Json(json!({ "success": true, "data": records })))
}

/// POST /api/content/{*resource} - create a record
pub async fn create(
    Path(resource): Path<String>,
    user: AuthUser,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let def = resolve(&resource)?;
    let payload = parse_body(&body)?;

    let record = content_service::create(def, &user, payload).await?;

    Ok(Json(json!({ "success": true, "data": record })))
}

/// PUT /api/content/{*resource} - partial update by `_id`
pub async fn update(
    Path(resource): Path<String>,
    user: AuthUser,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let def = resolve(&resource)?;
    let payload = parse_body(&body)?;

    let record = content_service::update(def, &user, payload).await?;

    Ok(Json(json!({ "success": true, "data": record })))
}

/// DELETE /api/content/{*resource}?id=<id> - permanent removal
pub async fn remove(
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let def = resolve(&resource)?;

    let raw = params
        .get("id")
        .ok_or_else(|| ApiError::validation_error("delete requires an 'id' query parameter"))?;
    let id = Uuid::parse_str(raw)
        .map_err(|_| ApiError::validation_error(format!("'{}' is not a valid record identifier", raw)))?;

    content_service::delete(def, &user, id).await?;

    Ok(Json(json!({ "success": true })))
}

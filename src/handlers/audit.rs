//! Admin read of the audit trail.

use axum::{extract::Query, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config;
use crate::database::audit::{self, AuditAction};
use crate::error::ApiError;
use crate::middleware::AuthUser;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub resource: Option<String>,
    pub action: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/audit - newest-first audit entries, staff only
pub async fn list(
    Query(query): Query<AuditQuery>,
    _user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let action = match query.action.as_deref() {
        None => None,
        Some(raw) => Some(AuditAction::parse(raw).ok_or_else(|| {
            ApiError::validation_error(format!("'{}' is not a valid audit action", raw))
        })?),
    };

    let cap = config::config().api.max_audit_page;
    let limit = query.limit.unwrap_or(50).clamp(1, cap);

    let entries = audit::list_entries(query.resource.as_deref(), action, limit).await?;
    let data: Vec<Value> = entries.iter().map(|e| e.to_api_value()).collect();

    Ok(Json(json!({ "success": true, "data": data })))
}

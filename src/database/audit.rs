//! Append-only audit trail for content mutations.
//!
//! Every successful Create/Update/Delete writes one entry recording the
//! actor, the action, the resource, and a details snapshot. The admin
//! dashboard reads the trail newest-first; nothing in this service ever
//! updates or deletes an entry.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::middleware::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    // Written by the external auth and upload collaborators; listed here so
    // reads can filter on them.
    Login,
    FileUpload,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
            AuditAction::Login => "LOGIN",
            AuditAction::FileUpload => "FILE_UPLOAD",
        }
    }

    pub fn parse(s: &str) -> Option<AuditAction> {
        match s {
            "CREATE" => Some(AuditAction::Create),
            "UPDATE" => Some(AuditAction::Update),
            "DELETE" => Some(AuditAction::Delete),
            "LOGIN" => Some(AuditAction::Login),
            "FILE_UPLOAD" => Some(AuditAction::FileUpload),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct AuditEntry {
    pub id: Uuid,
    pub at: DateTime<Utc>,
    pub user_id: Uuid,
    pub action: String,
    pub resource: String,
    pub details: Value,
}

impl AuditEntry {
    pub fn to_api_value(&self) -> Value {
        json!({
            "timestamp": self.at,
            "userId": self.user_id,
            "action": self.action,
            "resource": self.resource,
            "details": self.details,
        })
    }
}

/// Record one audit entry. Called only after the underlying write succeeded.
pub async fn record_entry(
    action: AuditAction,
    resource: &str,
    actor: &AuthUser,
    details: Value,
) -> Result<(), DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    sqlx::query(
        "INSERT INTO audit_log (id, at, user_id, action, resource, details) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(Uuid::new_v4())
    .bind(Utc::now())
    .bind(actor.user_id)
    .bind(action.as_str())
    .bind(resource)
    .bind(details)
    .execute(&pool)
    .await?;

    Ok(())
}

/// Admin read: newest first, optionally filtered by resource and action.
pub async fn list_entries(
    resource: Option<&str>,
    action: Option<AuditAction>,
    limit: i64,
) -> Result<Vec<AuditEntry>, DatabaseError> {
    let pool = DatabaseManager::pool().await?;

    let mut sql = String::from(
        "SELECT id, at, user_id, action, resource, details FROM audit_log WHERE TRUE",
    );
    let mut binds: Vec<String> = Vec::new();

    if let Some(resource) = resource {
        binds.push(resource.to_string());
        sql.push_str(&format!(" AND resource = ${}", binds.len()));
    }
    if let Some(action) = action {
        binds.push(action.as_str().to_string());
        sql.push_str(&format!(" AND action = ${}", binds.len()));
    }

    sql.push_str(&format!(" ORDER BY at DESC LIMIT ${}", binds.len() + 1));

    let mut query = sqlx::query_as::<_, AuditEntry>(&sql);
    for bind in binds {
        query = query.bind(bind);
    }
    query = query.bind(limit);

    Ok(query.fetch_all(&pool).await?)
}

//! Content record storage.
//!
//! One JSONB-backed table holds every content type; the `resource` column is
//! the collection key and the registry's partition fields live inside `doc`.
//! Each operation is a single document write or read, built as a runtime
//! query with manual binds.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::record::Draft;
use crate::registry::ResourceDef;

/// A persisted content record
#[derive(Debug, Clone, FromRow)]
pub struct StoredRecord {
    pub id: Uuid,
    pub resource: String,
    pub doc: Value,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredRecord {
    /// Assemble the wire shape: `{_id, ...payload, order, isActive,
    /// createdAt, updatedAt}`
    pub fn to_api_value(&self) -> Value {
        let mut obj = self
            .doc
            .as_object()
            .cloned()
            .unwrap_or_else(Map::new);

        obj.insert("_id".to_string(), json!(self.id));
        obj.insert("order".to_string(), json!(self.display_order));
        obj.insert("isActive".to_string(), json!(self.is_active));
        obj.insert("createdAt".to_string(), json!(self.created_at));
        obj.insert("updatedAt".to_string(), json!(self.updated_at));

        Value::Object(obj)
    }
}

/// A validated partition filter for List
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub field: String,
    pub value: String,
    pub multi: bool,
}

/// Bind values for dynamically assembled queries
enum Bind {
    Text(String),
    Jsonb(Value),
}

pub struct ContentStore;

impl ContentStore {
    /// List records for one resource, ordered by `display_order` ascending
    /// with insertion order as the stable tie-break. Inactive records are
    /// excluded unless `include_inactive` is set.
    pub async fn list(
        resource: &str,
        filters: &[ListFilter],
        include_inactive: bool,
    ) -> Result<Vec<StoredRecord>, DatabaseError> {
        let pool = DatabaseManager::pool().await?;

        let mut sql = String::from(
            "SELECT id, resource, doc, display_order, is_active, created_at, updated_at \
             FROM content_records WHERE resource = $1",
        );
        if !include_inactive {
            sql.push_str(" AND is_active = TRUE");
        }

        // Partition fields come from the static registry, never from input,
        // so interpolating the key is safe; values are always bound.
        let mut binds: Vec<Bind> = Vec::new();
        for filter in filters {
            let n = binds.len() + 2;
            if filter.multi {
                sql.push_str(&format!(" AND doc->'{}' @> ${}", filter.field, n));
                binds.push(Bind::Jsonb(json!([filter.value])));
            } else {
                sql.push_str(&format!(" AND doc->>'{}' = ${}", filter.field, n));
                binds.push(Bind::Text(filter.value.clone()));
            }
        }

        sql.push_str(" ORDER BY display_order ASC, created_at ASC");

        let mut query = sqlx::query_as::<_, StoredRecord>(&sql).bind(resource);
        for bind in binds {
            query = match bind {
                Bind::Text(s) => query.bind(s),
                Bind::Jsonb(v) => query.bind(v),
            };
        }

        Ok(query.fetch_all(&pool).await?)
    }

    /// Count records sharing the draft's single-valued partition fields,
    /// used for the "default order = partition count + 1" rule.
    pub async fn count_partition(def: &ResourceDef, draft: &Draft) -> Result<i64, DatabaseError> {
        let pool = DatabaseManager::pool().await?;

        let mut sql = String::from("SELECT COUNT(*) FROM content_records WHERE resource = $1");
        let mut binds: Vec<String> = Vec::new();

        for partition in def.partitions.iter().filter(|p| !p.multi) {
            if let Some(value) = draft.payload.get(partition.field).and_then(Value::as_str) {
                let n = binds.len() + 2;
                sql.push_str(&format!(" AND doc->>'{}' = ${}", partition.field, n));
                binds.push(value.to_string());
            }
        }

        let mut query = sqlx::query_scalar::<_, i64>(&sql).bind(def.path);
        for bind in binds {
            query = query.bind(bind);
        }

        Ok(query.fetch_one(&pool).await?)
    }

    /// Insert a new record with server-assigned identifier and timestamps.
    pub async fn insert(
        resource: &str,
        payload: Map<String, Value>,
        display_order: i32,
        is_active: bool,
    ) -> Result<StoredRecord, DatabaseError> {
        let pool = DatabaseManager::pool().await?;
        let now = Utc::now();

        let record = sqlx::query_as::<_, StoredRecord>(
            "INSERT INTO content_records \
             (id, resource, doc, display_order, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $6) \
             RETURNING id, resource, doc, display_order, is_active, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(resource)
        .bind(Value::Object(payload))
        .bind(display_order)
        .bind(is_active)
        .bind(now)
        .fetch_one(&pool)
        .await?;

        Ok(record)
    }

    /// Field-level merge of a partial update. Unspecified payload fields keep
    /// their prior values; `order`/`isActive` change only when supplied. The
    /// last-modified timestamp always refreshes.
    pub async fn update(
        resource: &str,
        id: Uuid,
        patch: Map<String, Value>,
        display_order: Option<i32>,
        is_active: Option<bool>,
    ) -> Result<StoredRecord, DatabaseError> {
        let pool = DatabaseManager::pool().await?;

        let record = sqlx::query_as::<_, StoredRecord>(
            "UPDATE content_records SET \
                 doc = doc || $3, \
                 display_order = COALESCE($4, display_order), \
                 is_active = COALESCE($5, is_active), \
                 updated_at = $6 \
             WHERE id = $1 AND resource = $2 \
             RETURNING id, resource, doc, display_order, is_active, created_at, updated_at",
        )
        .bind(id)
        .bind(resource)
        .bind(Value::Object(patch))
        .bind(display_order)
        .bind(is_active)
        .bind(Utc::now())
        .fetch_optional(&pool)
        .await?;

        record.ok_or_else(|| {
            DatabaseError::NotFound(format!("record {} not found in {}", id, resource))
        })
    }

    /// Permanent removal; no tombstone, no recovery.
    pub async fn delete(resource: &str, id: Uuid) -> Result<(), DatabaseError> {
        let pool = DatabaseManager::pool().await?;

        let result = sqlx::query("DELETE FROM content_records WHERE id = $1 AND resource = $2")
            .bind(id)
            .bind(resource)
            .execute(&pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "record {} not found in {}",
                id, resource
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_api_value_shape() {
        let now = Utc::now();
        let record = StoredRecord {
            id: Uuid::new_v4(),
            resource: "partners".to_string(),
            doc: json!({"name": "Acme Mediation", "category": "strategic"}),
            display_order: 1,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let wire = record.to_api_value();
        assert_eq!(wire["_id"], json!(record.id));
        assert_eq!(wire["name"], "Acme Mediation");
        assert_eq!(wire["order"], 1);
        assert_eq!(wire["isActive"], true);
        assert!(wire.get("createdAt").is_some());
        assert!(wire.get("updatedAt").is_some());
        // Storage column names never leak onto the wire
        assert!(wire.get("display_order").is_none());
        assert!(wire.get("is_active").is_none());
    }
}

use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{audit, content};
use crate::registry;

pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Content API: one generic route serves every registered resource
        .route(
            "/api/content/*resource",
            get(content::list)
                .post(content::create)
                .put(content::update)
                .delete(content::remove),
        )
        // Admin read of the audit trail
        .route("/api/audit", get(audit::list))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");
    let resources: Vec<&str> = registry::RESOURCES.iter().map(|r| r.path).collect();

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Concord Content API",
            "version": version,
            "description": "Content management backend for the Concord mediation & arbitration organization",
            "endpoints": {
                "home": "/ (public)",
                "content": "/api/content/<resource> (GET public; GET?all=true, POST, PUT, DELETE require a staff bearer token)",
                "audit": "/api/audit (staff bearer token)",
            },
            "resources": resources,
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

use concord_api::database::manager::DatabaseManager;
use concord_api::routes::app;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, CONCORD_JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = concord_api::config::config();

    tracing_subscriber::fmt::init();
    tracing::info!("Starting Concord Content API in {:?} mode", config.environment);

    // Bring a fresh database up to the expected shape; a failure here is not
    // fatal since the pool is lazy and handlers report 503 until it recovers.
    if let Err(e) = DatabaseManager::ensure_schema().await {
        tracing::warn!("schema bootstrap failed, continuing degraded: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("CONCORD_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Concord Content API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

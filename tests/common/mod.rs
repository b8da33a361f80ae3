#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use uuid::Uuid;

/// Shared secret between the spawned server and test-minted tokens
pub const TEST_JWT_SECRET: &str = "concord-test-secret";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/concord-api");
        cmd.env("CONCORD_API_PORT", port.to_string())
            .env("CONCORD_JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit the rest of the environment so the server sees DATABASE_URL
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready means the database answered too; live tests need it
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become healthy on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

/// Spawn (once per test binary) and wait for a healthy server, or skip when
/// no database is configured for this environment.
pub async fn server_or_skip() -> Result<Option<&'static TestServer>> {
    if std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }

    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}

/// Mint a staff bearer token the spawned server will accept.
pub fn staff_token() -> String {
    let claims = concord_api::auth::Claims::new(
        Uuid::new_v4(),
        "Integration Tests".to_string(),
        "admin".to_string(),
    );
    concord_api::auth::issue_token(&claims, TEST_JWT_SECRET).expect("token minting")
}

/// Short unique suffix so repeated runs against the same database never
/// collide on names.
pub fn unique(label: &str) -> String {
    format!("{} {}", label, &Uuid::new_v4().to_string()[..8])
}

use clap::Parser;

use concord_api::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up CONCORD_SERVER / CONCORD_TOKEN from a local .env
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    run(cli).await
}

use anyhow::Result;

use crate::cli::{output, Cli};
use crate::client::HttpTransport;

pub async fn show(
    cli: &Cli,
    resource: Option<&str>,
    action: Option<&str>,
    limit: Option<i64>,
) -> Result<()> {
    let entries = HttpTransport::new()
        .audit_list(&cli.session()?, resource, action, limit)
        .await?;

    output::print_audit(cli, &entries);
    Ok(())
}

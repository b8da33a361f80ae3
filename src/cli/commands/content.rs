//! Content subcommands, driving the same client state machine the dashboard
//! uses: refresh the list, open a draft, mutate fields, save.

use anyhow::{bail, Context, Result};
use serde_json::Value;

use crate::cli::{output, Cli};
use crate::client::{ContentTransport, HttpTransport, ResourceClient};

fn parse_data(data: &str) -> Result<serde_json::Map<String, Value>> {
    let value: Value = serde_json::from_str(data).context("--data is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("--data must be a JSON object"),
    }
}

fn admin_client(cli: &Cli, resource: &str) -> Result<ResourceClient<HttpTransport>> {
    Ok(ResourceClient::new(
        resource,
        cli.session()?,
        HttpTransport::new(),
    ))
}

pub async fn list(cli: &Cli, resource: &str, public: bool) -> Result<()> {
    if public {
        let records = HttpTransport::new()
            .list(&cli.session()?, resource, false)
            .await?;
        output::print_records(cli, resource, &records);
        return Ok(());
    }

    let mut client = admin_client(cli, resource)?;
    client.refresh().await?;
    output::print_records(cli, resource, client.records());
    output::print_notices(client.take_notices());
    Ok(())
}

pub async fn create(cli: &Cli, resource: &str, data: &str) -> Result<()> {
    let fields = parse_data(data)?;
    if fields.contains_key("_id") {
        bail!("create does not take an _id; use update");
    }

    let mut client = admin_client(cli, resource)?;
    client.refresh().await?;

    client.begin_create();
    for (field, value) in fields {
        client.set_field(&field, value)?;
    }
    client.save().await?;

    output::print_notices(client.take_notices());
    output::print_records(cli, resource, client.records());
    Ok(())
}

pub async fn update(cli: &Cli, resource: &str, data: &str) -> Result<()> {
    let fields = parse_data(data)?;
    let id = fields
        .get("_id")
        .and_then(Value::as_str)
        .context("--data must include the record's _id")?
        .to_string();

    let mut client = admin_client(cli, resource)?;
    client.refresh().await?;

    client.begin_edit(&id)?;
    for (field, value) in fields {
        if field != "_id" {
            client.set_field(&field, value)?;
        }
    }
    client.save().await?;

    output::print_notices(client.take_notices());
    output::print_records(cli, resource, client.records());
    Ok(())
}

pub async fn delete(cli: &Cli, resource: &str, id: &str, yes: bool) -> Result<()> {
    let mut client = admin_client(cli, resource)?;
    client.refresh().await?;

    let deleted = client
        .delete_record(id, |prompt| yes || confirm_on_terminal(prompt))
        .await?;

    if !deleted {
        println!("cancelled");
    }
    output::print_notices(client.take_notices());
    Ok(())
}

/// Blocking y/N prompt on the controlling terminal.
fn confirm_on_terminal(prompt: &str) -> bool {
    use std::io::{BufRead, Write};

    print!("{} [y/N] ", prompt);
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

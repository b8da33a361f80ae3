//! Render records, audit entries, and notices for the terminal.

use serde_json::Value;

use crate::cli::Cli;
use crate::client::{Notice, NoticeKind};
use crate::registry::{self, StepIcon};

pub fn print_records(cli: &Cli, resource: &str, records: &[Value]) {
    if !cli.wants_text() {
        println!("{}", serde_json::to_string_pretty(records).unwrap_or_default());
        return;
    }

    if records.is_empty() {
        println!("(no records)");
        return;
    }

    let title_field = registry::lookup(resource).map(|d| d.title_field).unwrap_or("title");

    for record in records {
        let order = record.get("order").and_then(Value::as_i64).unwrap_or(0);
        let title = record
            .get(title_field)
            .and_then(Value::as_str)
            .unwrap_or("(untitled)");
        let id = record.get("_id").and_then(Value::as_str).unwrap_or("?");
        let inactive = !record.get("isActive").and_then(Value::as_bool).unwrap_or(true);

        let glyph = if resource == "mediation/resolution-steps" {
            let key = record.get("icon").and_then(Value::as_str).unwrap_or("");
            format!("{} ", StepIcon::from_key(key).glyph())
        } else {
            String::new()
        };

        println!(
            "{:>4}. {}{}{}  [{}]",
            order,
            glyph,
            title,
            if inactive { " (inactive)" } else { "" },
            id
        );
    }
}

pub fn print_audit(cli: &Cli, entries: &[Value]) {
    if !cli.wants_text() {
        println!("{}", serde_json::to_string_pretty(entries).unwrap_or_default());
        return;
    }

    if entries.is_empty() {
        println!("(no audit entries)");
        return;
    }

    for entry in entries {
        let at = entry.get("timestamp").and_then(Value::as_str).unwrap_or("?");
        let action = entry.get("action").and_then(Value::as_str).unwrap_or("?");
        let resource = entry.get("resource").and_then(Value::as_str).unwrap_or("?");
        let user = entry.get("userId").and_then(Value::as_str).unwrap_or("?");
        println!("{}  {:<12} {:<28} by {}", at, action, resource, user);
    }
}

pub fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        match notice.kind {
            NoticeKind::Success => eprintln!("ok: {}", notice.message),
            NoticeKind::Error => eprintln!("error: {}", notice.message),
        }
    }
}

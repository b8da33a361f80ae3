//! Demo content for a fresh server, posted through the public wire contract.

use anyhow::{bail, Result};
use serde_json::{json, Value};

use crate::cli::Cli;
use crate::client::{HttpTransport, ResourceClient};

fn demo_content() -> Vec<(&'static str, Vec<Value>)> {
    vec![
        (
            "partners",
            vec![
                json!({
                    "name": "Helvetia Chamber of Commerce",
                    "category": "institutional",
                    "logo": {"url": "https://assets.concord.test/partners/helvetia.png", "alt": "Helvetia Chamber of Commerce"},
                    "website": "https://helvetia-chamber.test"
                }),
                json!({
                    "name": "Institute for Dispute Studies",
                    "category": "academic",
                    "logo": {"url": "https://assets.concord.test/partners/ids.png", "alt": "Institute for Dispute Studies"}
                }),
            ],
        ),
        (
            "academy/courses",
            vec![
                json!({
                    "title": "Foundations of Commercial Mediation",
                    "program": "mediation",
                    "courseType": "certificate",
                    "description": "Five-day intensive covering the mediation process end to end.",
                    "duration": "5 days",
                    "price": 1450,
                    "syllabus": ["Opening statements", "Caucus strategy", "Settlement drafting"]
                }),
                json!({
                    "title": "Arbitral Award Writing",
                    "program": "arbitration",
                    "courseType": "workshop",
                    "duration": "2 days",
                    "price": 680
                }),
            ],
        ),
        (
            "academy/faculty",
            vec![json!({
                "name": "Dr. Amara Okafor",
                "title": "Senior Mediator",
                "programs": ["mediation", "conciliation"],
                "courseTypes": ["certificate", "workshop"],
                "bio": "Twenty years of cross-border commercial mediation practice."
            })],
        ),
        (
            "mediation/resolution-steps",
            vec![
                json!({
                    "title": "Request for Mediation",
                    "program": "mediation",
                    "icon": "document",
                    "description": "Either party files a request describing the dispute."
                }),
                json!({
                    "title": "Mediator Appointment",
                    "program": "mediation",
                    "icon": "handshake",
                    "description": "The parties agree on a mediator from the Concord panel."
                }),
                json!({
                    "title": "Settlement or Closure",
                    "program": "mediation",
                    "icon": "scales",
                    "description": "The process ends in a settlement agreement or a closure note."
                }),
            ],
        ),
        (
            "mediation/fees",
            vec![
                json!({
                    "label": "Filing fee",
                    "program": "mediation",
                    "amount": 250,
                    "currency": "EUR"
                }),
                json!({
                    "label": "Administrative fee, disputes up to 100k",
                    "program": "mediation",
                    "amount": 1200,
                    "currency": "EUR"
                }),
            ],
        ),
        (
            "testimonials",
            vec![json!({
                "author": "L. Fontaine",
                "role": "General Counsel",
                "organization": "Nordwind Logistics",
                "quote": "The mediation settled in two sessions what litigation had dragged out for a year."
            })],
        ),
    ]
}

pub async fn run(cli: &Cli) -> Result<()> {
    let session = cli.session()?;
    if session.token.is_none() {
        bail!("seeding requires a staff token (--token or CONCORD_TOKEN)");
    }

    let mut created = 0usize;
    for (resource, records) in demo_content() {
        let mut client = ResourceClient::new(resource, session.clone(), HttpTransport::new());
        client.refresh().await?;

        for record in records {
            client.begin_create();
            if let Value::Object(fields) = record {
                for (field, value) in fields {
                    client.set_field(&field, value)?;
                }
            }
            client.save().await?;
            created += 1;
        }
        println!("seeded {}", resource);
    }

    println!("done: {} records created", created);
    Ok(())
}

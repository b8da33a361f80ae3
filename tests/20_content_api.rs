//! Live round-trip tests against a spawned server and a real database.
//! Skipped (each test returns early) when DATABASE_URL is not set.

mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_list_update_delete_round_trip() -> Result<()> {
    let Some(server) = common::server_or_skip().await? else {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    };
    let client = reqwest::Client::new();
    let token = common::staff_token();
    let name = common::unique("Acme Mediation");

    // Create
    let res = client
        .post(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "name": name,
            "category": "strategic",
            "logo": {"url": "https://assets.test/acme.png", "alt": "Acme"}
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true, "create failed: {}", body);

    let record = &body["data"];
    let id = record["_id"].as_str().expect("server-assigned _id").to_string();
    assert_eq!(record["name"], json!(name));
    assert_eq!(record["isActive"], true, "isActive defaults to true");
    assert!(record["order"].as_i64().expect("order") >= 1, "order defaulted");
    assert!(record.get("createdAt").is_some());
    assert!(record.get("updatedAt").is_some());

    // Public list includes the new active record
    let res = client
        .get(format!("{}/api/content/partners", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    let listed: Vec<&Value> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter(|r| r["name"] == json!(name))
        .collect();
    assert_eq!(listed.len(), 1, "exactly one matching record after create");

    // Partial update: unspecified fields keep their prior value
    let res = client
        .put(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(&token)
        .json(&json!({"_id": id, "website": "https://acme-mediation.test"}))
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true, "update failed: {}", body);
    assert_eq!(body["data"]["name"], json!(name), "merge kept prior fields");
    assert_eq!(body["data"]["website"], "https://acme-mediation.test");
    assert_eq!(body["data"]["category"], "strategic");

    // Applying the same patch twice is idempotent
    let res = client
        .put(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(&token)
        .json(&json!({"_id": id, "website": "https://acme-mediation.test"}))
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["website"], "https://acme-mediation.test");
    assert_eq!(body["data"]["name"], json!(name));

    // Delete
    let res = client
        .delete(format!(
            "{}/api/content/partners?id={}",
            server.base_url, id
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);

    // Deletion is final: further update and delete both miss
    let res = client
        .put(format!("{}/api/content/partners", server.base_url))
        .bearer_auth(&token)
        .json(&json!({"_id": id, "website": "https://late.test"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .delete(format!(
            "{}/api/content/partners?id={}",
            server.base_url, id
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // And the record is gone from the admin view too
    let res = client
        .get(format!(
            "{}/api/content/partners?all=true",
            server.base_url
        ))
        .bearer_auth(&token)
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    assert!(body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .all(|r| r["_id"] != json!(id)));

    Ok(())
}

#[tokio::test]
async fn order_defaults_count_within_partition() -> Result<()> {
    let Some(server) = common::server_or_skip().await? else {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    };
    let client = reqwest::Client::new();
    let token = common::staff_token();

    // Two fee lines in the same program partition get increasing order
    let mut ids = Vec::new();
    let mut orders = Vec::new();
    for label in ["Filing fee", "Administration fee"] {
        let res = client
            .post(format!("{}/api/content/mediation/fees", server.base_url))
            .bearer_auth(&token)
            .json(&json!({
                "label": common::unique(label),
                "program": "conciliation",
                "amount": 300
            }))
            .send()
            .await?;
        let body = res.json::<Value>().await?;
        assert_eq!(body["success"], true, "create failed: {}", body);
        ids.push(body["data"]["_id"].as_str().expect("_id").to_string());
        orders.push(body["data"]["order"].as_i64().expect("order"));
    }
    assert_eq!(orders[1], orders[0] + 1, "second record appended after first");

    // Cleanup
    for id in ids {
        client
            .delete(format!(
                "{}/api/content/mediation/fees?id={}",
                server.base_url, id
            ))
            .bearer_auth(&token)
            .send()
            .await?;
    }

    Ok(())
}

#[tokio::test]
async fn partition_filter_scopes_list() -> Result<()> {
    let Some(server) = common::server_or_skip().await? else {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    };
    let client = reqwest::Client::new();
    let token = common::staff_token();

    let mediation_name = common::unique("Mediation Course");
    let arbitration_name = common::unique("Arbitration Course");
    let mut ids = Vec::new();

    for (title, program) in [
        (&mediation_name, "mediation"),
        (&arbitration_name, "arbitration"),
    ] {
        let res = client
            .post(format!("{}/api/content/academy/courses", server.base_url))
            .bearer_auth(&token)
            .json(&json!({"title": title, "program": program, "courseType": "workshop"}))
            .send()
            .await?;
        let body = res.json::<Value>().await?;
        assert_eq!(body["success"], true, "create failed: {}", body);
        ids.push(body["data"]["_id"].as_str().expect("_id").to_string());
    }

    let res = client
        .get(format!(
            "{}/api/content/academy/courses?program=mediation",
            server.base_url
        ))
        .send()
        .await?;
    let body = res.json::<Value>().await?;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .expect("data array")
        .iter()
        .filter_map(|r| r["title"].as_str())
        .collect();
    assert!(titles.contains(&mediation_name.as_str()));
    assert!(!titles.contains(&arbitration_name.as_str()));

    for id in ids {
        client
            .delete(format!(
                "{}/api/content/academy/courses?id={}",
                server.base_url, id
            ))
            .bearer_auth(&token)
            .send()
            .await?;
    }

    Ok(())
}

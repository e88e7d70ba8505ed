mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{create_category, id_of, spawn_server};

#[tokio::test]
async fn create_then_get_returns_the_same_fields() -> Result<()> {
    let server = spawn_server().await?;
    let client = reqwest::Client::new();

    for (name, order) in [("Drinks", 1), ("Snacks", -3), ("Ünïcødé", 0)] {
        let created = create_category(&server, name, order).await?;
        let res = client
            .get(format!("{}/category/{}", server.base_url, id_of(&created)))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);

        let fetched = res.json::<Value>().await?;
        assert_eq!(fetched["name"], name);
        assert_eq!(fetched["order"], order);
        assert_eq!(fetched["id"], created["id"]);
    }
    Ok(())
}

#[tokio::test]
async fn drinks_lifecycle() -> Result<()> {
    let server = spawn_server().await?;
    let client = reqwest::Client::new();

    // Create: appears in the list with a generated id
    let created = create_category(&server, "Drinks", 1).await?;
    let id = id_of(&created);
    let list = client
        .get(format!("{}/category", server.base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.as_str());

    // Edit: full replace with the id in the body
    let res = client
        .put(format!("{}/category", server.base_url))
        .json(&json!({ "id": id, "name": "Drinks", "order": 2 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["order"], 2);

    let fetched = client
        .get(format!("{}/category/{}", server.base_url, id))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(fetched["order"], 2);

    // Delete: returns the deleted document, then it is gone
    let res = client
        .delete(format!("{}/category/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let deleted = res.json::<Value>().await?;
    assert_eq!(deleted["id"], id.as_str());
    assert_eq!(deleted["order"], 2);

    let res = client
        .get(format!("{}/category/{}", server.base_url, id))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    let list = client
        .get(format!("{}/category", server.base_url))
        .send()
        .await?
        .json::<Vec<Value>>()
        .await?;
    assert!(list.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_empty_404s() -> Result<()> {
    let server = spawn_server().await?;
    let client = reqwest::Client::new();
    let missing = "2f1c6f4e-8d0a-4b59-9a57-3f7d3d5a8e10";

    let res = client
        .get(format!("{}/category/{}", server.base_url, missing))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    let res = client
        .delete(format!("{}/category/{}", server.base_url, missing))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.bytes().await?.is_empty());

    let res = client
        .put(format!("{}/category", server.base_url))
        .json(&json!({ "id": missing, "name": "Ghost", "order": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_twice_is_404_the_second_time() -> Result<()> {
    let server = spawn_server().await?;
    let client = reqwest::Client::new();
    let id = id_of(&create_category(&server, "Drinks", 1).await?);
    let url = format!("{}/category/{}", server.base_url, id);

    assert_eq!(client.delete(&url).send().await?.status(), StatusCode::OK);
    assert_eq!(client.delete(&url).send().await?.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn bodies_missing_required_fields_are_rejected() -> Result<()> {
    let server = spawn_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/category", server.base_url))
        .json(&json!({ "name": "No order" }))
        .send()
        .await?;
    assert!(res.status().is_client_error(), "got {}", res.status());

    let res = client
        .put(format!("{}/category", server.base_url))
        .json(&json!({ "name": "No id", "order": 1 }))
        .send()
        .await?;
    assert!(res.status().is_client_error(), "got {}", res.status());
    Ok(())
}

#[tokio::test]
async fn malformed_body_id_is_rejected_before_the_store() -> Result<()> {
    let server = spawn_server().await?;
    let res = reqwest::Client::new()
        .put(format!("{}/category", server.base_url))
        .json(&json!({ "id": "not-a-uuid", "name": "Drinks", "order": 1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

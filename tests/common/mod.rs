#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use catalog_admin::config::AppConfig;
use catalog_admin::{app, Catalog};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// An API server running inside the test process over a fresh memory store
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    async fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind test port")?;
        let router = app(Catalog::in_memory(), &AppConfig::development());
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self { port, base_url })
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
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Fresh server per test so stores never leak between tests
pub async fn spawn_server() -> Result<TestServer> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let server = TestServer::spawn().await?;
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}

pub async fn create_category(server: &TestServer, name: &str, order: i64) -> Result<Value> {
    let res = reqwest::Client::new()
        .post(format!("{}/category", server.base_url))
        .json(&json!({ "name": name, "order": order }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create category answered {}", res.status());
    Ok(res.json().await?)
}

pub async fn create_product(server: &TestServer, body: Value) -> Result<Value> {
    let res = reqwest::Client::new()
        .post(format!("{}/product", server.base_url))
        .json(&body)
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "create product answered {}", res.status());
    Ok(res.json().await?)
}

pub fn id_of(doc: &Value) -> String {
    doc["id"].as_str().expect("document without id").to_string()
}

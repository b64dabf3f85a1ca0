use std::collections::HashSet;
use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    root: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Boot the real app (config → store → router) on an ephemeral port.
async fn start_server() -> anyhow::Result<TestApp> {
    let root = std::env::temp_dir().join(format!("recycle_points_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.data_file = root.join("data").join("points.json");
    cfg.static_files.dir = root.join("public");
    cfg.normalize_and_validate()?;

    let app = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url, root })
}

#[tokio::test]
async fn e2e_create_list_and_filter() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c
        .post(format!("{}/api/points", app.base_url))
        .json(&json!({
            "name": "Ecoponto Central",
            "address": "Rua das Flores, 123",
            "lat": -15.78,
            "lng": -47.92,
            "materials": ["Vidro", "Papel"]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created = res.json::<Value>().await?["point"].clone();
    let id = created["id"].as_str().unwrap_or_default().to_string();
    assert!(!id.is_empty());
    assert!(created["createdAt"].is_string());

    let all = c
        .get(format!("{}/api/points", app.base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(all["points"].as_array().unwrap().iter().any(|p| p["id"] == json!(id)));

    let papel = c
        .get(format!("{}/api/points", app.base_url))
        .query(&[("material", "papel")])
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(papel["points"].as_array().unwrap().iter().any(|p| p["id"] == json!(id)));

    let metal = c
        .get(format!("{}/api/points", app.base_url))
        .query(&[("material", "metal")])
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert!(!metal["points"].as_array().unwrap().iter().any(|p| p["id"] == json!(id)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn e2e_concurrent_posts_keep_every_write() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let n = 24;

    let mut handles = Vec::new();
    for i in 0..n {
        let c = c.clone();
        let url = format!("{}/api/points", app.base_url);
        handles.push(tokio::spawn(async move {
            let res = c
                .post(url)
                .json(&json!({
                    "name": format!("Ponto {i}"),
                    "address": format!("Rua {i}, centro"),
                    "lat": -15.0 - i as f64 / 100.0,
                    "lng": -47.0,
                    "materials": ["Metal"]
                }))
                .send()
                .await?;
            anyhow::ensure!(res.status() == HttpStatusCode::CREATED, "status {}", res.status());
            let body = res.json::<Value>().await?;
            Ok::<String, anyhow::Error>(body["point"]["id"].as_str().unwrap_or_default().to_string())
        }));
    }
    let mut ids = HashSet::new();
    for h in handles {
        ids.insert(h.await??);
    }
    assert_eq!(ids.len(), n);

    let all = c
        .get(format!("{}/api/points", app.base_url))
        .send()
        .await?
        .json::<Value>()
        .await?;
    let stored: HashSet<String> = all["points"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|p| p["id"].as_str().map(str::to_string))
        .collect();
    assert_eq!(stored, ids);
    Ok(())
}

#[tokio::test]
async fn e2e_restart_keeps_data() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();
    let res = c
        .post(format!("{}/api/points", app.base_url))
        .json(&json!({
            "name": "Ecoponto Norte",
            "address": "Av. Brasil, 500",
            "lat": 0,
            "lng": 0,
            "materials": ["Óleo de cozinha"]
        }))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);

    // second app on the same data file: bootstrap must not reset it
    let mut cfg = AppConfig::default();
    cfg.storage.data_file = app.root.join("data").join("points.json");
    cfg.static_files.dir = app.root.join("public");
    let second = server::startup::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, second).await;
    });

    let all = c
        .get(format!("http://{}/api/points", addr))
        .send()
        .await?
        .json::<Value>()
        .await?;
    assert_eq!(all["points"].as_array().map(Vec::len), Some(1));
    assert_eq!(all["points"][0]["materials"], json!(["Óleo de cozinha"]));
    Ok(())
}

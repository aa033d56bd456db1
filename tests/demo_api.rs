//! End-to-end tests for the demo endpoints over a live listener.

use std::net::SocketAddr;

use otel_demo::{HttpServer, ServiceConfig};

/// Bind an ephemeral port and serve the demo app on it.
async fn spawn_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(ServiceConfig::default());
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn names_endpoint_returns_fixed_user_list() {
    let addr = spawn_server().await;

    let res = client()
        .get(format!("http://{addr}/demo/api/names"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);

    let users = body["users"].as_array().expect("users array");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], 1);
    assert_eq!(users[0]["name"], "Alice");
    assert_eq!(users[1]["id"], 2);
    assert_eq!(users[1]["name"], "Bob");
}

#[tokio::test]
async fn instrumented_endpoint_defaults_to_first_user() {
    let addr = spawn_server().await;

    let res = client()
        .get(format!("http://{addr}/demo/api/instrumented"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], "1");
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["metadata"]["processed"], true);
    assert!(body["metadata"]["timestamp"].is_string());

    let spans = body["tracing"]["spans"].as_array().expect("spans array");
    let names: Vec<_> = spans.iter().filter_map(|s| s.as_str()).collect();
    assert_eq!(
        names,
        ["process-user-request", "validate-input", "fetch-user-profile"]
    );
}

#[tokio::test]
async fn instrumented_endpoint_looks_up_requested_user() {
    let addr = spawn_server().await;

    let res = client()
        .get(format!("http://{addr}/demo/api/instrumented?userId=2"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["user"]["name"], "Bob");
    assert_eq!(body["user"]["email"], "bob@example.com");
}

#[tokio::test]
async fn unknown_user_is_reported_as_not_found() {
    let addr = spawn_server().await;

    let res = client()
        .get(format!("http://{addr}/demo/api/instrumented?userId=42"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 404);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn non_numeric_user_id_is_rejected() {
    let addr = spawn_server().await;

    let res = client()
        .get(format!("http://{addr}/demo/api/instrumented?userId=abc"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 400);
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let addr = spawn_server().await;

    let res = client()
        .get(format!("http://{addr}/health"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), 200);

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

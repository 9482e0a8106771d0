#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use configs::{DatabaseConfig, ServiceKind};
use server::startup::{app, connect_and_migrate};

/// Fresh application over a private in-memory database.
pub async fn test_app(kind: ServiceKind) -> anyhow::Result<Router> {
    let db = connect_and_migrate(kind, &DatabaseConfig::in_memory()).await?;
    Ok(app(kind, db))
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, body: Option<String>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(b) => {
            req = req.header("content-type", "application/json");
            Body::from(b)
        }
        None => Body::empty(),
    };
    let res = app.clone().oneshot(req.body(body)?).await?;
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    send_raw(app, method, uri, body.map(|v| v.to_string())).await
}

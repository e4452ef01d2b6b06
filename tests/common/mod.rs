#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, Utc};
use eigenlvr_backend::{
    config::ServiceConfig,
    routes::create_router,
    store::{Collection, MemoryStore, PostgresStore, Record, RecordStore, StoreError, StoreResult, TimeWindow},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Set up a Postgres-backed store for the ignored integration tests.
/// Uses TEST_DATABASE_URL or falls back to a local default.
pub async fn setup_test_db() -> StoreResult<PostgresStore> {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://eigenlvr_user@localhost:5432/eigenlvr_test".to_string());

    PostgresStore::connect(&database_url).await
}

/// Router over a fresh in-memory store; the store handle is returned for inspection
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (build_router_with(store.clone()), store)
}

pub fn build_router_with(store: Arc<dyn RecordStore>) -> Router {
    let state = AppState::new(store, ServiceConfig::default());
    create_router(state, &["*".to_string()])
}

/// Store whose every call fails as if the database were down
pub struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn insert_all(&self, _records: Vec<Record>) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list_all(&self, _collection: Collection) -> StoreResult<Vec<Record>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_id(&self, _collection: Collection, _id: &str) -> StoreResult<Option<Record>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_window(&self, _collection: Collection, _window: TimeWindow) -> StoreResult<Vec<Record>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn find_by_parent(
        &self,
        _collection: Collection,
        _parent_id: &str,
    ) -> StoreResult<Vec<Record>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Auction payload settled `minutes_ago` before now
pub fn auction_payload(pool_id: &str, winning_bid: &str, minutes_ago: i64) -> Value {
    json!({
        "poolId": pool_id,
        "winner": "0x742d35cc6634c0532925a3b8d0c9e3e0c8b0e5e1",
        "winningBid": winning_bid,
        "totalBids": 3,
        "timestamp": format_ts(Utc::now() - Duration::minutes(minutes_ago)),
        "status": "completed",
        "blockNumber": 18_500_000 + minutes_ago,
    })
}

pub fn operator_payload(address: &str, status: &str) -> Value {
    json!({
        "address": address,
        "stake": "32000.0",
        "status": status,
        "tasksCompleted": 120,
        "reputation": 0.97,
    })
}

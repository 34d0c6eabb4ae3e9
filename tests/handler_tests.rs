//! Endpoint tests against the real router with a stub completion client
//! and the in-memory store.
//!
//! Run with: `cargo test --test handler_tests`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use taskgen::config::ServerConfig;
use taskgen::handlers::{build_router, AppContext};
use taskgen::llm::{CompletionClient, LlmError};
use taskgen::model::{FeatureRequest, Spec, Task};
use taskgen::storage::{MemoryStore, SpecStore};

// ═══════════════════════════════════════════════════════════════════════
// Test infrastructure
// ═══════════════════════════════════════════════════════════════════════

/// Stub completion client. `reply: None` simulates a missing credential.
struct StubClient {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl StubClient {
    fn canned(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        // Mirror the production client: credential check precedes the call.
        let reply = self.reply.as_ref().ok_or(LlmError::NotConfigured)?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(reply.clone())
    }

    fn is_configured(&self) -> bool {
        self.reply.is_some()
    }
}

/// Self-contained harness: fresh in-memory store, stub client, real router.
struct Harness {
    store: Arc<MemoryStore>,
    llm: Arc<StubClient>,
}

impl Harness {
    fn new(llm: Arc<StubClient>) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            llm,
        }
    }

    fn app(&self) -> Router {
        let ctx = AppContext::new(
            self.store.clone(),
            self.llm.clone(),
            ServerConfig::default(),
        );
        build_router(Arc::new(ctx))
    }

    async fn seed(&self, id: &str, timestamp: i64) -> Spec {
        let spec = Spec {
            id: id.to_string(),
            timestamp,
            form_data: FeatureRequest {
                goal: "add search".to_string(),
                users: String::new(),
                constraints: String::new(),
                template: "web".to_string(),
            },
            tasks: vec![Task {
                id: 1,
                text: "add search bar".to_string(),
                task_type: "Task".to_string(),
                group: "Frontend".to_string(),
            }],
        };
        self.store.save(&spec).await.expect("seed spec");
        spec
    }
}

// ── request helpers ──

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn put(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

const STUB_REPLY: &str = r#"{"userStories":["As a user, I want search so that I find items"],"tasks":{"Frontend":["add search bar"]},"risks":["latency"]}"#;

// ═══════════════════════════════════════════════════════════════════════
// Health & status
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn root_returns_banner() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let response = harness.app().oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Tasks Generator API");
    assert_eq!(body["status"], "running");
}

#[tokio::test]
async fn health_reports_healthy_with_timestamp() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let response = harness.app().oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    // RFC 3339 timestamp must parse back.
    let ts = body["timestamp"].as_str().unwrap();
    chrono::DateTime::parse_from_rfc3339(ts).unwrap();
}

#[tokio::test]
async fn status_reports_backend_database_and_llm() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let response = harness.app().oneshot(get("/api/status")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["backend"], "healthy");
    assert_eq!(body["database"], "in-memory");
    assert_eq!(body["llm"], "healthy");
}

#[tokio::test]
async fn status_reports_llm_error_without_credential() {
    let harness = Harness::new(StubClient::unconfigured());
    let response = harness.app().oneshot(get("/api/status")).await.unwrap();

    let body = body_json(response).await;
    assert_eq!(body["llm"], "error");
}

// ═══════════════════════════════════════════════════════════════════════
// Generate
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn generate_builds_flat_task_list_and_persists() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let response = harness
        .app()
        .oneshot(post(
            "/api/generate",
            json!({"goal": "add search", "users": "", "constraints": "", "template": "web"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;

    let tasks = spec["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 3);

    assert_eq!(tasks[0]["id"], 1);
    assert_eq!(tasks[0]["type"], "User Story");
    assert_eq!(tasks[0]["group"], "User Stories");

    assert_eq!(tasks[1]["id"], 2);
    assert_eq!(tasks[1]["type"], "Task");
    assert_eq!(tasks[1]["group"], "Frontend");
    assert_eq!(tasks[1]["text"], "add search bar");

    assert_eq!(tasks[2]["id"], 3);
    assert_eq!(tasks[2]["type"], "Risk");
    assert_eq!(tasks[2]["group"], "Risks & Unknowns");
    assert_eq!(tasks[2]["text"], "latency");

    assert_eq!(spec["form_data"]["goal"], "add search");

    // The spec must be retrievable by its returned id.
    let id = spec["id"].as_str().unwrap();
    let stored = harness.store.get(id).await.unwrap().unwrap();
    assert_eq!(stored.tasks.len(), 3);
}

#[tokio::test]
async fn generate_tolerates_prose_around_json() {
    let wrapped = format!("Here is the breakdown:\n{STUB_REPLY}\nLet me know!");
    let harness = Harness::new(StubClient::canned(&wrapped));
    let response = harness
        .app()
        .oneshot(post("/api/generate", json!({"goal": "add search"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert_eq!(spec["tasks"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn generate_without_credential_fails_fast() {
    let harness = Harness::new(StubClient::unconfigured());
    let response = harness
        .app()
        .oneshot(post("/api/generate", json!({"goal": "add search"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "GROQ_API_KEY not configured");

    // No completion was attempted and nothing was saved.
    assert_eq!(harness.llm.calls.load(Ordering::SeqCst), 0);
    assert!(harness.store.list_recent(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn generate_parse_failure_leaves_store_unchanged() {
    let harness = Harness::new(StubClient::canned("sorry, I cannot help with that"));
    let response = harness
        .app()
        .oneshot(post("/api/generate", json!({"goal": "add search"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("Failed to generate tasks:"));

    assert!(harness.store.list_recent(5).await.unwrap().is_empty());
}

#[tokio::test]
async fn generate_rejects_empty_goal() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let response = harness
        .app()
        .oneshot(post("/api/generate", json!({"goal": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(harness.llm.calls.load(Ordering::SeqCst), 0);
}

// ═══════════════════════════════════════════════════════════════════════
// Spec CRUD
// ═══════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn list_specs_caps_at_five_newest_first() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    for i in 0..7 {
        harness.seed(&format!("s{i}"), i).await;
    }

    let response = harness.app().oneshot(get("/api/specs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let specs = body.as_array().unwrap();
    assert_eq!(specs.len(), 5);
    let timestamps: Vec<i64> = specs.iter().map(|s| s["timestamp"].as_i64().unwrap()).collect();
    assert_eq!(timestamps, vec![6, 5, 4, 3, 2]);
}

#[tokio::test]
async fn get_spec_by_id() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let seeded = harness.seed("spec-1", 100).await;

    let response = harness.app().oneshot(get("/api/specs/spec-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body, serde_json::to_value(&seeded).unwrap());
}

#[tokio::test]
async fn get_unknown_spec_returns_404() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let response = harness.app().oneshot(get("/api/specs/nope")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Spec not found");
}

#[tokio::test]
async fn put_replaces_record_and_preserves_path_id() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let mut spec = harness.seed("spec-1", 100).await;

    spec.id = "something-else".to_string();
    spec.tasks = vec![Task {
        id: 1,
        text: "rewritten".to_string(),
        task_type: "Task".to_string(),
        group: "Backend".to_string(),
    }];

    let response = harness
        .app()
        .oneshot(put("/api/specs/spec-1", serde_json::to_value(&spec).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], "spec-1");
    assert_eq!(body["tasks"][0]["text"], "rewritten");

    let stored = harness.store.get("spec-1").await.unwrap().unwrap();
    assert_eq!(stored.tasks[0].text, "rewritten");
    // The body's divergent id was not written as a separate record.
    assert!(harness.store.get("something-else").await.unwrap().is_none());
}

#[tokio::test]
async fn put_unknown_spec_returns_404_and_stores_nothing() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    let spec = harness.seed("existing", 100).await;

    let response = harness
        .app()
        .oneshot(put("/api/specs/ghost", serde_json::to_value(&spec).unwrap()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(harness.store.get("ghost").await.unwrap().is_none());
    assert_eq!(harness.store.list_recent(5).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_spec_is_idempotent() {
    let harness = Harness::new(StubClient::canned(STUB_REPLY));
    harness.seed("spec-1", 100).await;
    let app = harness.app();

    let response = app
        .clone()
        .oneshot(delete("/api/specs/spec-1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Spec deleted successfully");

    // Deleting again (or any absent id) still succeeds.
    let response = app.oneshot(delete("/api/specs/spec-1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Spec deleted successfully");

    assert!(harness.store.get("spec-1").await.unwrap().is_none());
}

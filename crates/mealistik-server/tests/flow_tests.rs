//! End-to-end flow tests.
//!
//! Drive the real router with in-process requests: the full submission
//! flows against an in-memory store, plus the failure paths — validation
//! errors that never reach the store and a store that rejects every write.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

use mealistik_core::submit::RecordSubmitter;
use mealistik_server::build_router;
use mealistik_server::state::AppState;
use mealistik_store::{CreatedDocument, DocumentStore, MemoryStore, StoreError};

/// Build the app around an arbitrary store.
fn app(store: Arc<dyn DocumentStore>, backend: &'static str) -> Router {
    build_router(Arc::new(AppState {
        submitter: RecordSubmitter::new(store),
        store_backend: backend,
    }))
}

/// Send one request and collect status, headers, and the UTF-8 body.
async fn send(
    app: Router,
    request: Request<Body>,
) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn post_form(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::USER_AGENT, "flow-test/1.0")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

/// Store stub whose every write fails with a fixed API message.
struct FailingStore(&'static str);

#[async_trait::async_trait]
impl DocumentStore for FailingStore {
    async fn create(
        &self,
        _collection: &str,
        _fields: serde_json::Value,
    ) -> Result<CreatedDocument, StoreError> {
        Err(StoreError::Api {
            status_code: 503,
            message: self.0.to_owned(),
        })
    }
}

// ── Scenario A: happy-path waitlist submission ───────────────────────

#[tokio::test]
async fn valid_waitlist_submission_reaches_success_view() {
    let store = MemoryStore::new();
    let app_store: Arc<dyn DocumentStore> = Arc::new(store.clone());

    // Home offers the waitlist flow.
    let (status, _, body) = send(app(app_store.clone(), "memory"), get("/?utm_source=ig")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Join early waitlist"));
    assert!(body.contains("href=\"/waitlist?utm_source=ig\""));

    // Submit a valid entry.
    let (status, headers, _) = send(
        app(app_store.clone(), "memory"),
        post_form(
            "/waitlist",
            "first_name=Jane&email=jane%40example.com&condition=PCOS&consent=on&utm_source=ig",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        headers.get(header::LOCATION).unwrap(),
        "/waitlist/success?utm_source=ig"
    );

    // The success view renders forward links only and no form.
    let (status, _, body) = send(
        app(app_store.clone(), "memory"),
        get("/waitlist/success?utm_source=ig"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("You're on the list!"));
    assert!(!body.contains("<form"));
    assert!(!body.contains("value=\"Jane\""));

    // Exactly one document, carrying attribution and the user agent.
    let docs = store.documents().await;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].collection, "waitlist_early");
    assert_eq!(docs[0].fields["firstName"], "Jane");
    assert_eq!(docs[0].fields["condition"], "PCOS");
    assert_eq!(docs[0].fields["attribution"]["utm_source"], "ig");
    assert_eq!(docs[0].fields["userAgent"], "flow-test/1.0");
}

// ── Scenario B: validation failure makes no store call ───────────────

#[tokio::test]
async fn investor_submission_without_consent_stays_on_form() {
    let store = MemoryStore::new();
    let app_store: Arc<dyn DocumentStore> = Arc::new(store.clone());

    let (status, _, body) = send(
        app(app_store, "memory"),
        post_form("/investor", "full_name=Sam+Lee&email=sam%40x.co"),
    )
    .await;

    // Same view, inline message, nothing persisted.
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please consent to be contacted."));
    assert!(body.contains("action=\"/investor\""));
    assert!(body.contains("value=\"Sam Lee\""));
    assert_eq!(store.count("investor_partners").await, 0);
}

#[tokio::test]
async fn malformed_email_is_rejected_before_the_store() {
    let store = MemoryStore::new();
    let app_store: Arc<dyn DocumentStore> = Arc::new(store.clone());

    let (status, _, body) = send(
        app(app_store, "memory"),
        post_form(
            "/waitlist",
            "first_name=Jane&email=a%40b&condition=PCOS&consent=on",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please enter a valid email."));
    assert_eq!(store.count("waitlist_early").await, 0);
}

// ── Scenario C: store failure retains the draft ──────────────────────

#[tokio::test]
async fn store_failure_keeps_view_and_draft_for_resubmission() {
    let (status, _, body) = send(
        app(Arc::new(FailingStore("network down")), "memory"),
        post_form(
            "/waitlist",
            "first_name=Jane&email=jane%40example.com&condition=PCOS&consent=on",
        ),
    )
    .await;

    // Same view, the store's own message, every field retained.
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("network down"));
    assert!(body.contains("action=\"/waitlist\""));
    assert!(body.contains("value=\"Jane\""));
    assert!(body.contains("value=\"jane@example.com\""));
    assert!(body.contains("<option value=\"PCOS\" selected>"));
    assert!(body.contains("name=\"consent\" checked"));
}

#[tokio::test]
async fn silent_store_failure_falls_back_to_generic_message() {
    let (status, _, body) = send(
        app(Arc::new(FailingStore("")), "memory"),
        post_form(
            "/investor",
            "full_name=Sam+Lee&email=sam%40x.co&consent=on",
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Something went wrong. Please try again."));
}

// ── Surrounding surface ──────────────────────────────────────────────

#[tokio::test]
async fn healthz_reports_the_store_backend() {
    let (status, _, body) = send(
        app(Arc::new(MemoryStore::new()), "memory"),
        get("/healthz"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store"], "memory");
}

#[tokio::test]
async fn responses_carry_hardening_headers() {
    let (_, headers, _) = send(app(Arc::new(MemoryStore::new()), "memory"), get("/")).await;

    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
}

#[tokio::test]
async fn contact_view_renders_the_static_card() {
    let (status, _, body) = send(
        app(Arc::new(MemoryStore::new()), "memory"),
        get("/contact"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Sowmiya Yoganathan"));
    assert!(body.contains("mailto:hello@innara.com"));
}

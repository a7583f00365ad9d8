//! Drives the full router in-process: stats, contact gate, and admin
//! credential routes against an in-memory store.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use folio_api::{AppStateInner, router};
use folio_core::{CounterStore, CredentialVault, SendGate, Transport};
use folio_db::MemoryStore;
use folio_types::models::{EmailPayload, MessagingCredentials};

const ADMIN_TOKEN: &str = "test-admin-token";

#[derive(Default)]
struct CountingTransport {
    sent: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(&self, _: &MessagingCredentials, _: &EmailPayload) -> anyhow::Result<()> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("relay unreachable");
        }
        Ok(())
    }
}

struct TestApp {
    app: Router,
    transport: Arc<CountingTransport>,
}

fn app_with(transport: CountingTransport) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let vault = Arc::new(CredentialVault::new(store.clone()));
    let transport = Arc::new(transport);
    let gate = SendGate::new(store.clone(), vault.clone(), transport.clone(), "owner@example.com");

    let state = Arc::new(AppStateInner {
        counters: CounterStore::new(store),
        vault,
        gate,
        admin_token: Some(ADMIN_TOKEN.to_string()),
    });

    TestApp {
        app: router(state),
        transport,
    }
}

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn contact_form() -> Value {
    json!({
        "name": "Linus",
        "email": "linus@example.com",
        "subject": "Project",
        "message": "Can we talk?"
    })
}

async fn configure(app: &Router) {
    let (status, _) = call(
        app,
        json_request(
            "PUT",
            "/admin/credentials",
            json!({"publicKey": "pk_live", "serviceId": "service_x", "templateId": "template_y"}),
            Some(ADMIN_TOKEN),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn views_and_likes_flow() {
    let t = app_with(CountingTransport::default());

    let (status, body) = call(&t.app, get("/stats", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"views": 0, "likes": 0, "liked": false}));

    call(&t.app, post("/stats/views")).await;
    let (_, body) = call(&t.app, post("/stats/views")).await;
    assert_eq!(body["views"], 2);

    let (_, body) = call(&t.app, post("/stats/like")).await;
    assert_eq!(body, json!({"views": 2, "likes": 1, "liked": true}));

    let (_, body) = call(&t.app, post("/stats/like")).await;
    assert_eq!(body, json!({"views": 2, "likes": 0, "liked": false}));
}

#[tokio::test]
async fn contact_without_credentials_is_unavailable() {
    let t = app_with(CountingTransport::default());

    let (_, body) = call(&t.app, get("/contact/status", None)).await;
    assert_eq!(body["configured"], false);

    let (status, body) = call(&t.app, json_request("POST", "/contact", contact_form(), None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["kind"], "not_configured");
    assert_eq!(t.transport.sent.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn contact_is_rate_limited_after_three() {
    let t = app_with(CountingTransport::default());
    configure(&t.app).await;

    let (_, body) = call(&t.app, get("/contact/status", None)).await;
    assert_eq!(body["configured"], true);

    for _ in 0..3 {
        let (status, body) =
            call(&t.app, json_request("POST", "/contact", contact_form(), None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sent"], true);
    }

    let (status, body) = call(&t.app, json_request("POST", "/contact", contact_form(), None)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["kind"], "rate_limited");
    assert_eq!(t.transport.sent.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn blank_form_field_never_reaches_the_gate() {
    let t = app_with(CountingTransport::default());
    configure(&t.app).await;

    let mut form = contact_form();
    form["message"] = json!("  ");
    let (status, body) = call(&t.app, json_request("POST", "/contact", form, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");
    assert_eq!(t.transport.sent.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn transport_failure_maps_to_bad_gateway() {
    let t = app_with(CountingTransport {
        fail: true,
        ..CountingTransport::default()
    });
    configure(&t.app).await;

    let (status, body) = call(&t.app, json_request("POST", "/contact", contact_form(), None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "transport_error");
    assert!(!body["message"].as_str().unwrap().contains("relay unreachable"));
}

#[tokio::test]
async fn admin_routes_require_token() {
    let t = app_with(CountingTransport::default());

    let (status, _) = call(&t.app, get("/admin/credentials", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(&t.app, get("/admin/credentials", Some("wrong"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(
        &t.app,
        json_request(
            "PUT",
            "/admin/credentials",
            json!({"publicKey": "a", "serviceId": "b", "templateId": "c"}),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_credentials_masked_and_revealed() {
    let t = app_with(CountingTransport::default());

    let (status, _) = call(&t.app, get("/admin/credentials", Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    configure(&t.app).await;

    let (status, body) = call(&t.app, get("/admin/credentials", Some(ADMIN_TOKEN))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["configured"], true);
    assert_eq!(body["revealed"], false);
    assert_eq!(body["serviceId"], "•••••ce_x");

    let (_, body) = call(
        &t.app,
        get("/admin/credentials?reveal=true", Some(ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(body["revealed"], true);
    assert_eq!(body["serviceId"], "service_x");
    assert_eq!(body["templateId"], "template_y");
}

#[tokio::test]
async fn saving_incomplete_credentials_is_rejected() {
    let t = app_with(CountingTransport::default());
    configure(&t.app).await;

    let (status, body) = call(
        &t.app,
        json_request(
            "PUT",
            "/admin/credentials",
            json!({"publicKey": "new", "serviceId": "", "templateId": "t"}),
            Some(ADMIN_TOKEN),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation");

    let (_, body) = call(
        &t.app,
        get("/admin/credentials?reveal=true", Some(ADMIN_TOKEN)),
    )
    .await;
    assert_eq!(body["publicKey"], "pk_live");
}

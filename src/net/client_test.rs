use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::net::types::{SuccessResponse, User};
use crate::state::credentials::MemoryStorage;
use crate::testing::{BASE_URL, MockTransport};

struct Fixture {
    transport: Arc<MockTransport>,
    store: CredentialStore,
    signal: UnauthorizedSignal,
    client: HttpClient,
}

fn fixture(policy: UnauthorizedPolicy) -> Fixture {
    let config = ConsoleConfig { api_base_url: BASE_URL.to_owned(), unauthorized_policy: policy };
    let transport = MockTransport::new();
    let store = CredentialStore::new(Arc::new(MemoryStorage::new()));
    let signal = UnauthorizedSignal::new();
    let client = HttpClient::new(&config, transport.clone(), store.clone(), signal.clone());
    Fixture { transport, store, signal, client }
}

fn count_signals(signal: &UnauthorizedSignal) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let seen = count.clone();
    signal.subscribe(move |_| {
        seen.fetch_add(1, Ordering::SeqCst);
    });
    count
}

// =============================================================
// Request interceptor
// =============================================================

#[test]
fn request_without_token_has_no_authorization_header() {
    let fx = fixture(UnauthorizedPolicy::Global);
    fx.transport.respond(HttpMethod::Get, "/ping", 200, serde_json::json!({ "success": true }));

    let _: SuccessResponse = block_on(fx.client.get("/ping")).unwrap();

    let req = fx.transport.last_request();
    assert_eq!(req.url, "http://api.test/ping");
    assert_eq!(req.header("authorization"), None);
    assert_eq!(req.header("content-type"), Some("application/json"));
}

#[test]
fn request_with_token_carries_bearer_header() {
    let fx = fixture(UnauthorizedPolicy::Global);
    fx.store.save("tok123", &User::admin("root@x.io")).unwrap();
    fx.transport.respond(HttpMethod::Get, "/ping", 200, serde_json::json!({ "success": true }));

    let _: SuccessResponse = block_on(fx.client.get("/ping")).unwrap();

    assert_eq!(fx.transport.last_request().header("Authorization"), Some("Bearer tok123"));
}

#[test]
fn post_serializes_json_body() {
    let fx = fixture(UnauthorizedPolicy::Global);
    fx.transport.respond(HttpMethod::Post, "/things", 200, serde_json::json!({ "success": true }));

    let _: SuccessResponse = block_on(fx.client.post("/things", &serde_json::json!({ "pack_id": 3 }))).unwrap();

    assert_eq!(fx.transport.last_request().body.as_deref(), Some(r#"{"pack_id":3}"#));
}

// =============================================================
// Response interceptor
// =============================================================

#[test]
fn non_success_status_carries_backend_message() {
    let fx = fixture(UnauthorizedPolicy::Global);
    fx.transport.respond(
        HttpMethod::Post,
        "/things",
        422,
        serde_json::json!({ "success": false, "message": "sku already exists" }),
    );

    let err = block_on(fx.client.post::<_, SuccessResponse>("/things", &serde_json::json!({}))).unwrap_err();

    assert_eq!(err, ApiError::Status { status: 422, message: Some("sku already exists".to_owned()) });
    assert_eq!(err.user_message("fallback"), "sku already exists");
}

#[test]
fn non_json_error_body_uses_fallback_message() {
    let fx = fixture(UnauthorizedPolicy::Global);
    fx.transport.respond(HttpMethod::Get, "/boom", 500, serde_json::json!("gateway exploded"));

    let err = block_on(fx.client.get::<SuccessResponse>("/boom")).unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
}

#[test]
fn undecodable_success_body_is_decode_error() {
    let fx = fixture(UnauthorizedPolicy::Global);
    fx.transport.respond(HttpMethod::Get, "/odd", 200, serde_json::json!({ "unexpected": 1 }));

    let err = block_on(fx.client.get::<SuccessResponse>("/odd")).unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unauthorized_emits_signal_and_returns_error() {
    let fx = fixture(UnauthorizedPolicy::Global);
    let count = count_signals(&fx.signal);
    fx.store.save("stale", &User::admin("root@x.io")).unwrap();
    fx.transport.respond(
        HttpMethod::Get,
        "/api/v1/admin/dashboard",
        401,
        serde_json::json!({ "success": false, "message": "token expired" }),
    );

    let err = block_on(fx.client.get::<SuccessResponse>("/api/v1/admin/dashboard")).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(count.load(Ordering::SeqCst), 1);
    // The client itself never clears storage.
    assert_eq!(fx.store.token().as_deref(), Some("stale"));
}

#[test]
fn unauthorized_event_path_excludes_query() {
    let fx = fixture(UnauthorizedPolicy::Global);
    let paths = Arc::new(std::sync::Mutex::new(Vec::new()));
    let seen = paths.clone();
    fx.signal.subscribe(move |event| seen.lock().unwrap().push(event.path.clone()));
    fx.transport.respond(HttpMethod::Get, "/api/v1/admin/customers", 401, serde_json::json!({}));

    let _ = block_on(fx.client.get::<SuccessResponse>("/api/v1/admin/customers?page=1&limit=10"));

    assert_eq!(*paths.lock().unwrap(), vec!["/api/v1/admin/customers".to_owned()]);
}

#[test]
fn global_policy_signals_on_public_endpoint() {
    let fx = fixture(UnauthorizedPolicy::Global);
    let count = count_signals(&fx.signal);
    fx.transport.respond(HttpMethod::Post, "/api/customer/login", 401, serde_json::json!({}));

    let _ = block_on(fx.client.post::<_, SuccessResponse>("/api/customer/login", &serde_json::json!({})));

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn protected_only_policy_skips_public_endpoints() {
    let fx = fixture(UnauthorizedPolicy::ProtectedOnly);
    let count = count_signals(&fx.signal);
    fx.transport.respond(
        HttpMethod::Post,
        "/api/customer/login",
        401,
        serde_json::json!({ "success": false, "message": "Invalid credentials" }),
    );

    let err = block_on(fx.client.post::<_, SuccessResponse>("/api/customer/login", &serde_json::json!({}))).unwrap_err();

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(err.user_message("Login failed"), "Invalid credentials");
}

#[test]
fn signals_unauthorized_policy_table() {
    assert!(signals_unauthorized(UnauthorizedPolicy::Global, "/api/admin/login"));
    assert!(signals_unauthorized(UnauthorizedPolicy::Global, "/api/v1/customer/subscription"));
    assert!(!signals_unauthorized(UnauthorizedPolicy::ProtectedOnly, "/api/admin/login"));
    assert!(!signals_unauthorized(UnauthorizedPolicy::ProtectedOnly, "/api/customer/signup"));
    assert!(signals_unauthorized(UnauthorizedPolicy::ProtectedOnly, "/api/v1/customer/subscription"));
}

#[test]
fn transport_failure_is_not_unauthorized() {
    let fx = fixture(UnauthorizedPolicy::Global);
    let count = count_signals(&fx.signal);
    let tx = fx.transport.defer(HttpMethod::Get, "/slow");
    drop(tx);

    let err = block_on(fx.client.get::<SuccessResponse>("/slow")).unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

//! Mock backend and recording doubles shared by unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;

use crate::config::{ConsoleConfig, UnauthorizedPolicy};
use crate::net::api::ApiService;
use crate::net::client::HttpClient;
use crate::net::error::TransportError;
use crate::net::signal::UnauthorizedSignal;
use crate::net::transport::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::state::credentials::{CredentialStore, MemoryStorage};
use crate::state::session::Session;
use crate::util::navigate::Navigator;

pub const BASE_URL: &str = "http://api.test";

enum Reply {
    Ready(HttpResponse),
    Deferred(oneshot::Receiver<HttpResponse>),
}

/// Scripted backend. Ready replies are reused for every matching request;
/// deferred replies are consumed once and take priority.
#[derive(Default)]
pub struct MockTransport {
    ready: Mutex<HashMap<(HttpMethod, String), HttpResponse>>,
    deferred: Mutex<Vec<((HttpMethod, String), Reply)>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: HttpMethod, path: &str, status: u16, body: serde_json::Value) {
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method, path.to_owned()), HttpResponse { status, body: body.to_string() });
    }

    /// Register a one-shot reply delivered when the returned sender fires.
    pub fn defer(&self, method: HttpMethod, path: &str) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.deferred
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(((method, path.to_owned()), Reply::Deferred(rx)));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }

    fn take_reply(&self, key: &(HttpMethod, String)) -> Option<Reply> {
        let mut deferred = self.deferred.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pos) = deferred.iter().position(|(k, _)| k == key) {
            return Some(deferred.remove(pos).1);
        }
        drop(deferred);
        self.ready
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .map(Reply::Ready)
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        let key = (request.method, request_path(&request.url).to_owned());
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        let reply = self.take_reply(&key);
        Box::pin(async move {
            match reply {
                Some(Reply::Ready(resp)) => Ok(resp),
                Some(Reply::Deferred(rx)) => rx.await.map_err(|_| TransportError::Network("reply dropped".to_owned())),
                None => Ok(HttpResponse {
                    status: 404,
                    body: serde_json::json!({ "success": false, "message": "no route" }).to_string(),
                }),
            }
        })
    }
}

/// Path portion of an absolute URL, without the query string.
pub fn request_path(url: &str) -> &str {
    let after_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let path = after_scheme.find('/').map_or("/", |i| &after_scheme[i..]);
    path.split_once('?').map_or(path, |(p, _)| p)
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Navigator for RecordingNavigator {
    fn hard_navigate(&self, path: &str) {
        self.visits.lock().unwrap_or_else(PoisonError::into_inner).push(path.to_owned());
    }
}

/// Everything a session test needs, wired like `app::build_session` does.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub storage: Arc<MemoryStorage>,
    pub store: CredentialStore,
    pub navigator: Arc<RecordingNavigator>,
    pub api: ApiService,
    pub session: Session,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(UnauthorizedPolicy::Global)
    }

    pub fn with_policy(policy: UnauthorizedPolicy) -> Self {
        let config = ConsoleConfig { api_base_url: BASE_URL.to_owned(), unauthorized_policy: policy };
        let transport = MockTransport::new();
        let storage = Arc::new(MemoryStorage::new());
        let store = CredentialStore::new(storage.clone());
        let navigator = Arc::new(RecordingNavigator::default());
        let client = HttpClient::new(&config, transport.clone(), store.clone(), UnauthorizedSignal::new());
        let api = ApiService::new(client);
        let session = Session::new(api.clone(), store.clone(), navigator.clone());
        Self { transport, storage, store, navigator, api, session }
    }
}

pub fn customer_login_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "token": "tok123",
        "email": "a@b.com",
        "name": "Ann",
        "phone": "555",
        "expires_in": 3600
    })
}

pub fn admin_login_body() -> serde_json::Value {
    serde_json::json!({
        "success": true,
        "token": "admintok",
        "email": "root@x.io",
        "expires_in": 3600
    })
}

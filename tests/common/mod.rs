#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use candidate_console::confirm::AutoConfirm;
use candidate_console::storage::{MemoryTokenStore, TokenStore};
use candidate_console::{App, Config};
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<JsonValue>,
}

#[derive(Debug, Clone)]
struct Canned {
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
}

#[derive(Default)]
struct StubInner {
    requests: Vec<Recorded>,
    responses: HashMap<String, Canned>,
}

/// In-process stand-in for the tracking backend. Responses are keyed by
/// `"METHOD /path"` or, more specifically, `"METHOD /path?query"`.
#[derive(Clone, Default)]
pub struct Stub {
    inner: Arc<Mutex<StubInner>>,
}

impl Stub {
    pub fn new() -> Self {
        let stub = Self::default();
        stub.respond("POST /auth/login", 200, login_body());
        stub.respond("GET /auth/me", 200, jane());
        stub.respond("GET /candidates", 200, json!([ann(), bob()]));
        stub.respond("GET /notifications", 200, notifications());
        stub.respond(
            "GET /dashboard/stats",
            200,
            json!({"total": 2, "pending": 1, "interviewed": 1, "approved": 0, "rejected": 0, "offered": 0}),
        );
        stub.respond("GET /positions", 200, json!([{"id": 1, "title": "Backend Engineer"}]));
        stub.respond("POST /candidates", 201, json!({"id": 3}));
        stub.respond("PUT /candidates/1", 200, json!({"id": 1}));
        stub.respond_raw("DELETE /candidates/1", 204, "");
        stub.respond("PATCH /candidates/1/status", 200, json!({"id": 1}));
        stub.respond(
            "GET /candidates/1/history",
            200,
            json!([
                {"id": 10, "status": "pending", "changed_by_name": null, "created_at": "2024-03-01T09:00:00Z"},
                {"id": 11, "status": "interviewed", "changed_by_name": "Jane", "notes": "Strong", "created_at": "2024-03-05T10:30:00Z"}
            ]),
        );
        stub.respond("PATCH /notifications/1/read", 200, json!({"success": true}));
        stub.respond(
            "GET /admin/users",
            200,
            json!([
                {"id": 1, "username": "recruiters", "email": "jane@acme.io", "full_name": "Jane", "role": "admin", "is_active": true, "last_login": "2024-03-05T10:00:00Z"},
                {"id": 2, "username": "sam", "email": "sam@acme.io", "full_name": "Sam", "role": "recruiter", "is_active": true, "last_login": null}
            ]),
        );
        stub.respond(
            "GET /admin/audit-logs",
            200,
            json!([
                {"id": 7, "created_at": "2024-03-05T10:30:00Z", "username": "recruiters", "action": "UPDATE_STATUS", "entity_type": "candidate", "entity_id": 1, "ip_address": "10.0.0.1"}
            ]),
        );
        stub.respond("POST /auth/register", 201, json!({"id": 3}));
        stub.respond("PATCH /admin/users/2/status", 200, json!({"id": 2}));
        stub
    }

    pub fn respond(&self, key: &str, status: u16, body: JsonValue) {
        self.respond_raw(key, status, &body.to_string());
    }

    pub fn respond_raw(&self, key: &str, status: u16, body: &str) {
        let canned = Canned {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
            delay: None,
        };
        self.lock().responses.insert(key.to_string(), canned);
    }

    pub fn delay(&self, key: &str, delay: Duration) {
        if let Some(canned) = self.lock().responses.get_mut(key) {
            canned.delay = Some(delay);
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.lock().requests.clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubInner> {
        self.inner.lock().unwrap()
    }

    /// Binds an ephemeral port and returns the API base URL.
    pub async fn serve(&self) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = Router::new().fallback(handle).with_state(self.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }
}

async fn handle(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().trim_start_matches("/api").to_string();
    let query = uri.query().map(str::to_string);
    let recorded = Recorded {
        method: method.to_string(),
        path: path.clone(),
        query: query.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };

    let canned = {
        let mut inner = stub.lock();
        inner.requests.push(recorded);
        let exact = query.map(|q| format!("{} {}?{}", method, path, q));
        exact
            .and_then(|key| inner.responses.get(&key).cloned())
            .or_else(|| inner.responses.get(&format!("{} {}", method, path)).cloned())
    };

    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (
                canned.status,
                [(header::CONTENT_TYPE, "application/json")],
                canned.body,
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            json!({"error": "Not found"}).to_string(),
        )
            .into_response(),
    }
}

pub fn jane() -> JsonValue {
    json!({"id": 1, "username": "recruiters", "fullName": "Jane", "role": "admin", "tenantName": "Acme"})
}

pub fn login_body() -> JsonValue {
    json!({"token": "t1", "user": jane()})
}

pub fn ann() -> JsonValue {
    json!({
        "id": 1, "name": "Ann Lee", "email": "ann@x.com", "phone": "555-0101",
        "position": "Backend Engineer", "status": "pending", "applied_date": "2024-03-01"
    })
}

pub fn bob() -> JsonValue {
    json!({
        "id": 2, "name": "Bob Stone", "email": "bob@x.com", "phone": "555-0102",
        "position": "QA Engineer", "status": "interviewed", "applied_date": "2024-02-20",
        "coverLetter": "Hello"
    })
}

pub fn notifications() -> JsonValue {
    json!([
        {"id": 1, "message": "New applicant: Ann Lee", "time": "2024-03-01T09:00:00Z", "is_read": false},
        {"id": 2, "message": "Bob Stone interviewed", "time": "2024-02-21T12:00:00Z", "is_read": true}
    ])
}

pub fn app(base_url: &str, tokens: Arc<MemoryTokenStore>) -> App {
    let config = Config::with_base_url(base_url).unwrap();
    let tokens: Arc<dyn TokenStore> = tokens;
    App::new(config, tokens, Arc::new(AutoConfirm(true))).unwrap()
}

pub fn credentials() -> candidate_console::dto::auth_dto::LoginRequest {
    candidate_console::dto::auth_dto::LoginRequest {
        username: "recruiters".into(),
        password: "secret".into(),
        tenant_name: "Acme".into(),
    }
}

/// Stub with defaults, a served base URL and an app already signed in.
pub async fn signed_in() -> (Stub, App, Arc<MemoryTokenStore>) {
    let stub = Stub::new();
    let base_url = stub.serve().await;
    let tokens = Arc::new(MemoryTokenStore::new());
    let app = app(&base_url, tokens.clone());
    app.login(credentials()).await.unwrap();
    stub.clear_requests();
    (stub, app, tokens)
}

//! Mock village governance API for integration tests.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};
use village_gov::{SessionGateway, storage::CredentialStore};

pub const MOBILE: &str = "9876543210";
pub const PASSWORD: &str = "secret";

/// Observations shared between the mock server and the test
#[derive(Default)]
pub struct MockState {
    /// `Authorization` header of every authenticated-route request, in order
    pub auth_headers: Mutex<Vec<Option<String>>>,
    pub login_calls: AtomicUsize,
    pub me_calls: AtomicUsize,
    /// When set, every authenticated route answers 401
    pub expire_sessions: AtomicBool,
    /// Token the next login hands out (defaults to AT1/RT1)
    pub issued: Mutex<Option<(String, String)>>,
}

impl MockState {
    pub fn last_auth_header(&self) -> Option<String> {
        self.auth_headers.lock().unwrap().last().cloned().flatten()
    }

    pub fn expire(&self) {
        self.expire_sessions.store(true, Ordering::SeqCst);
    }
}

pub struct MockApi {
    pub base_url: String,
    pub state: Arc<MockState>,
}

impl MockApi {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/signup", post(signup))
            .route("/api/auth/request-password-reset", post(request_reset))
            .route("/api/auth/reset-password", post(reset_password))
            .route("/api/auth/refresh", post(refresh))
            .route("/api/user/me", get(me))
            .route("/api/villages", get(villages).post(create_village))
            .route("/api/issues/{id}/status", put(update_issue_status))
            .route("/api/schemes/active", get(failing_schemes))
            .route("/api/dashboard/admin", get(broken_dashboard))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            state,
        }
    }

    pub fn gateway(&self, store: CredentialStore) -> SessionGateway {
        SessionGateway::new(&self.base_url, store).unwrap()
    }
}

/// Base URL nothing listens on
pub fn unreachable_base_url() -> String {
    "http://127.0.0.1:9/api".to_string()
}

fn envelope(data: Value) -> Json<Value> {
    Json(json!({"success": true, "message": "OK", "data": data}))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "Token expired"})),
    )
        .into_response()
}

/// Records the header and decides whether the caller is signed in
fn authorize(state: &MockState, headers: &HeaderMap) -> bool {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.auth_headers.lock().unwrap().push(value.clone());

    if state.expire_sessions.load(Ordering::SeqCst) {
        return false;
    }
    matches!(value.as_deref(), Some(v) if v.starts_with("Bearer AT"))
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    if body["mobileNumber"] == MOBILE && body["password"] == PASSWORD {
        let (access, refresh) = state
            .issued
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| ("AT1".to_string(), "RT1".to_string()));
        state.expire_sessions.store(false, Ordering::SeqCst);
        return envelope(json!({"accessToken": access, "refreshToken": refresh})).into_response();
    }

    if body["mobileNumber"] == "1111111111" {
        return unauthorized();
    }

    Json(json!({"success": false, "message": "Invalid mobile number or password", "data": null}))
        .into_response()
}

async fn signup(Json(body): Json<Value>) -> Response {
    if body["mobileNumber"] == MOBILE {
        return (
            StatusCode::CONFLICT,
            Json(json!({"success": false, "message": "Mobile number already registered"})),
        )
            .into_response();
    }
    envelope(json!("User registered successfully")).into_response()
}

async fn request_reset(Json(body): Json<Value>) -> Json<Value> {
    envelope(json!(format!("Reset code sent to {}", body["email"].as_str().unwrap_or(""))))
}

async fn reset_password(Json(body): Json<Value>) -> Response {
    if body["token"] == "123456" {
        envelope(json!("Password updated")).into_response()
    } else {
        Json(json!({"success": false, "message": "Invalid or expired reset code"})).into_response()
    }
}

async fn refresh(Json(body): Json<Value>) -> Response {
    match body["token"].as_str() {
        Some("RT1") => envelope(json!({"accessToken": "AT2", "refreshToken": "RT2"})).into_response(),
        Some("RT-keep") => envelope(json!({"accessToken": "AT3"})).into_response(),
        _ => unauthorized(),
    }
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.me_calls.fetch_add(1, Ordering::SeqCst);
    if !authorize(&state, &headers) {
        return unauthorized();
    }
    envelope(json!({
        "id": 1,
        "name": "Asha Devi",
        "mobileNumber": MOBILE,
        "email": "asha@example.org",
        "roles": "ROLE_USER,ROLE_SUPERADMIN"
    }))
    .into_response()
}

async fn villages(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !authorize(&state, &headers) {
        return unauthorized();
    }
    envelope(json!([
        {"id": 1, "name": "Rampur", "district": "Pune", "state": "Maharashtra", "population": 4200, "description": "River side"},
        {"id": 2, "name": "Sonpur", "district": "Nashik", "state": "Maharashtra", "population": 1800, "description": ""}
    ]))
    .into_response()
}

async fn create_village(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if !authorize(&state, &headers) {
        return unauthorized();
    }
    if body["name"].as_str().unwrap_or("").is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "Village name is required"})),
        )
            .into_response();
    }
    let mut village = body;
    village["id"] = json!(3);
    envelope(village).into_response()
}

async fn update_issue_status(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !authorize(&state, &headers) {
        return unauthorized();
    }
    envelope(json!({
        "id": id,
        "title": "Broken hand pump",
        "description": "",
        "status": query.get("status").cloned().unwrap_or_default(),
        "priority": "HIGH",
        "villageId": 1
    }))
    .into_response()
}

async fn failing_schemes() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response()
}

async fn broken_dashboard() -> Response {
    (StatusCode::OK, "<html>maintenance</html>").into_response()
}

//! Test harness for the Neurolab admin console.
//!
//! Provides an in-process mock of the Neurolab backend: an axum server
//! bound to an ephemeral port, serving the admin API with in-memory
//! collections, bearer-token checks, per-route failure injection and the
//! backend's real (per-endpoint inconsistent) envelope shapes.

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used)] // test harness: panics surface as test failures

use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use neurolab_admin::{AdminConsole, Config, MemorySessionStore};
use serde_json::{Value, json};
use url::Url;

/// The bearer token the mock backend considers valid after spawn or login.
pub const TEST_TOKEN: &str = "itest-token";

/// Admin account accepted by the mock login route.
pub const ADMIN_EMAIL: &str = "admin@neurolab.app";

/// Password accepted by the mock login route.
pub const ADMIN_PASSWORD: &str = "orbital-dynamics";

type Shared = Arc<Mutex<BackendState>>;

#[derive(Debug, Default)]
struct BackendState {
    /// The token authorized calls must present; `None` rejects everything.
    token: Option<String>,
    partner_requests: Vec<Value>,
    contacts: Vec<Value>,
    whitelist: Vec<Value>,
    next_whitelist_id: u32,
    fail_partner_requests: bool,
    fail_contacts: bool,
    fail_whitelist: bool,
    fail_status_updates: bool,
    fail_whitelist_removals: bool,
}

/// An in-process mock of the Neurolab backend.
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    /// Bind to an ephemeral port and start serving the admin API.
    ///
    /// The spawned server accepts [`TEST_TOKEN`] on authorized routes until
    /// [`revoke_sessions`](Self::revoke_sessions) is called.
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState {
            token: Some(TEST_TOKEN.to_owned()),
            next_whitelist_id: 1,
            ..BackendState::default()
        }));

        let app = Router::new()
            .route("/api/login", post(login))
            .route("/api/partner-requests", get(list_partner_requests))
            .route("/api/partner-requests/{id}/status", patch(update_status))
            .route("/api/contacts", get(list_contacts))
            .route("/api/whitelist", get(list_whitelist).post(add_whitelist))
            .route("/api/whitelist/{email}", delete(remove_whitelist))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    /// Console configuration pointed at this backend.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            api_url: Url::parse(&format!("http://{}/api", self.addr)).unwrap(),
            token_file: std::env::temp_dir().join("neurolab-itest-unused-token"),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }

    /// A console over this backend holding a valid in-memory session.
    #[must_use]
    pub fn console(&self) -> AdminConsole<MemorySessionStore> {
        AdminConsole::new(&self.config(), MemorySessionStore::with_token(TEST_TOKEN)).unwrap()
    }

    /// A console over this backend with no stored session.
    #[must_use]
    pub fn console_signed_out(&self) -> AdminConsole<MemorySessionStore> {
        AdminConsole::new(&self.config(), MemorySessionStore::new()).unwrap()
    }

    fn lock(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Seed a partner request.
    pub fn push_partner_request(&self, id: &str, company: &str, status: &str) {
        self.lock()
            .partner_requests
            .push(partner_request_json(id, company, status));
    }

    /// Seed a contact message.
    pub fn push_contact(&self, id: &str, name: &str, subject: &str) {
        self.lock().contacts.push(contact_json(id, name, subject));
    }

    /// Seed a whitelist entry.
    pub fn push_whitelist(&self, email: &str, registered: bool) {
        let mut state = self.lock();
        let id = format!("w{}", state.next_whitelist_id);
        state.next_whitelist_id += 1;
        state.whitelist.push(whitelist_json(&id, email, registered));
    }

    // =========================================================================
    // Failure injection
    // =========================================================================

    /// Make `GET /partner-requests` fail with a 500.
    pub fn fail_partner_requests(&self) {
        self.lock().fail_partner_requests = true;
    }

    /// Make `GET /contacts` fail with a 500.
    pub fn fail_contacts(&self) {
        self.lock().fail_contacts = true;
    }

    /// Make `GET /whitelist` fail with a 500.
    pub fn fail_whitelist(&self) {
        self.lock().fail_whitelist = true;
    }

    /// Make `PATCH /partner-requests/{id}/status` fail with a 500.
    pub fn fail_status_updates(&self) {
        self.lock().fail_status_updates = true;
    }

    /// Make `DELETE /whitelist/{email}` fail with a 500.
    pub fn fail_whitelist_removals(&self) {
        self.lock().fail_whitelist_removals = true;
    }

    /// Reject every token until the next successful login.
    pub fn revoke_sessions(&self) {
        self.lock().token = None;
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// The server-side status of a partner request.
    #[must_use]
    pub fn partner_request_status(&self, id: &str) -> Option<String> {
        self.lock()
            .partner_requests
            .iter()
            .find(|r| r["_id"] == id)
            .and_then(|r| r["status"].as_str().map(str::to_owned))
    }

    /// The server-side whitelist emails, in order.
    #[must_use]
    pub fn whitelist_emails(&self) -> Vec<String> {
        self.lock()
            .whitelist
            .iter()
            .filter_map(|e| e["email"].as_str().map(str::to_owned))
            .collect()
    }
}

// =============================================================================
// Entity fixtures
// =============================================================================

/// A partner request document in the backend's wire format.
#[must_use]
pub fn partner_request_json(id: &str, company: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "companyName": company,
        "contactPerson": "Dana Reviewer",
        "email": format!("contact@{id}.example"),
        "phone": "+1 555 0100",
        "website": "https://example.com",
        "businessType": "Research",
        "message": "We would like to collaborate.",
        "status": status,
        "createdAt": "2025-04-01T09:00:00.000Z"
    })
}

/// A contact document in the backend's wire format.
#[must_use]
pub fn contact_json(id: &str, name: &str, subject: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "email": format!("{id}@mail.example"),
        "subject": subject,
        "message": "Hello Neurolab",
        "createdAt": "2025-04-02T09:00:00.000Z"
    })
}

/// A whitelist document in the backend's wire format.
#[must_use]
pub fn whitelist_json(id: &str, email: &str, registered: bool) -> Value {
    json!({
        "_id": id,
        "email": email,
        "isRegistered": registered,
        "createdAt": "2025-04-03T09:00:00.000Z"
    })
}

// =============================================================================
// Handlers
// =============================================================================

fn bearer_ok(state: &BackendState, headers: &HeaderMap) -> bool {
    let Some(expected) = &state.token else {
        return false;
    };
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {expected}"))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "You are not logged in"})),
    )
        .into_response()
}

fn server_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": message})),
    )
        .into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        state.token = Some(TEST_TOKEN.to_owned());
        (StatusCode::OK, Json(json!({"token": TEST_TOKEN}))).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Incorrect email or password"})),
        )
            .into_response()
    }
}

async fn list_partner_requests(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if !bearer_ok(&state, &headers) {
        return unauthorized();
    }
    if state.fail_partner_requests {
        return server_error("Failed to fetch partner requests");
    }
    (
        StatusCode::OK,
        Json(json!({
            "status": "success",
            "data": { "partnerRequests": state.partner_requests }
        })),
    )
        .into_response()
}

async fn update_status(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !bearer_ok(&state, &headers) {
        return unauthorized();
    }
    if state.fail_status_updates {
        return server_error("Failed to update status");
    }

    match state.partner_requests.iter_mut().find(|r| r["_id"] == id) {
        Some(request) => {
            request["status"] = body["status"].clone();
            (
                StatusCode::OK,
                Json(json!({"data": {"partnerRequest": request}})),
            )
                .into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "No partner request found with that ID"})),
        )
            .into_response(),
    }
}

async fn list_contacts(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if !bearer_ok(&state, &headers) {
        return unauthorized();
    }
    if state.fail_contacts {
        return server_error("Failed to fetch contacts");
    }
    // Contacts nest the collection directly under `data`.
    (StatusCode::OK, Json(json!({"data": state.contacts}))).into_response()
}

async fn list_whitelist(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().unwrap();
    if !bearer_ok(&state, &headers) {
        return unauthorized();
    }
    if state.fail_whitelist {
        return server_error("Failed to fetch whitelist");
    }
    (
        StatusCode::OK,
        Json(json!({"data": {"whitelist": state.whitelist}})),
    )
        .into_response()
}

async fn add_whitelist(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    if !bearer_ok(&state, &headers) {
        return unauthorized();
    }

    let Some(email) = body["email"].as_str().filter(|e| !e.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Email is required"})),
        )
            .into_response();
    };

    if state.whitelist.iter().any(|e| e["email"] == email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Email is already whitelisted"})),
        )
            .into_response();
    }

    let id = format!("w{}", state.next_whitelist_id);
    state.next_whitelist_id += 1;
    let entry = whitelist_json(&id, email, false);
    state.whitelist.push(entry.clone());

    (
        StatusCode::CREATED,
        Json(json!({"data": {"whitelistEntry": entry}})),
    )
        .into_response()
}

async fn remove_whitelist(
    State(state): State<Shared>,
    Path(email): Path<String>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.lock().unwrap();
    if !bearer_ok(&state, &headers) {
        return unauthorized();
    }
    if state.fail_whitelist_removals {
        return server_error("Failed to remove email from whitelist");
    }

    let before = state.whitelist.len();
    state.whitelist.retain(|e| e["email"] != email.as_str());

    if state.whitelist.len() == before {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Email not found in whitelist"})),
        )
            .into_response()
    } else {
        StatusCode::NO_CONTENT.into_response()
    }
}

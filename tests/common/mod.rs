use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use reviewbot::api::PracticumClient;
use reviewbot::telegram::TelegramNotifier;

pub const API_TOKEN: &str = "test-practicum-token";
pub const BOT_TOKEN: &str = "1234:test-bot-token";
pub const CHAT_ID: &str = "4242";

// ── Stub homework-statuses API ──────────────────────────────────

/// A stub review API on a random local port: serves whatever (status, body)
/// the test loaded and records every request it sees.
pub struct StubApi {
    pub addr: SocketAddr,
    state: ApiState,
}

#[derive(Clone)]
struct ApiState {
    inner: Arc<Mutex<ApiInner>>,
}

struct ApiInner {
    status: u16,
    body: Value,
    requests: Vec<ApiRequest>,
}

#[derive(Clone)]
pub struct ApiRequest {
    pub from_date: Option<String>,
    pub authorization: Option<String>,
}

impl StubApi {
    pub fn endpoint(&self) -> String {
        format!("http://{}/api/user_api/homework_statuses/", self.addr)
    }

    pub fn client(&self) -> PracticumClient {
        PracticumClient::new(self.endpoint(), API_TOKEN.to_string())
    }

    /// Load the (status, body) served to every request from now on.
    pub fn respond(&self, status: u16, body: Value) {
        let mut inner = self.state.inner.lock().unwrap();
        inner.status = status;
        inner.body = body;
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.inner.lock().unwrap().requests.clone()
    }
}

async fn statuses(
    State(state): State<ApiState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let mut inner = state.inner.lock().unwrap();
    inner.requests.push(ApiRequest {
        from_date: params.get("from_date").cloned(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    (
        StatusCode::from_u16(inner.status).unwrap(),
        Json(inner.body.clone()),
    )
}

pub async fn spawn_api() -> StubApi {
    let state = ApiState {
        inner: Arc::new(Mutex::new(ApiInner {
            status: 200,
            body: json!({ "homeworks": [] }),
            requests: Vec::new(),
        })),
    };

    let app = Router::new()
        .route("/api/user_api/homework_statuses/", get(statuses))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub API failed");
    });

    StubApi { addr, state }
}

// ── Stub Telegram Bot API ───────────────────────────────────────

/// A stub Bot API that records every sendMessage body and can be told to
/// reject sends or the getMe probe.
pub struct StubTelegram {
    pub addr: SocketAddr,
    state: TelegramState,
}

#[derive(Clone, Default)]
struct TelegramState {
    inner: Arc<Mutex<TelegramInner>>,
}

#[derive(Default)]
struct TelegramInner {
    sent: Vec<Value>,
    reject_sends: bool,
    reject_get_me: bool,
}

impl StubTelegram {
    pub fn notifier(&self) -> TelegramNotifier {
        TelegramNotifier::with_base_url(
            format!("http://{}", self.addr),
            BOT_TOKEN.to_string(),
            CHAT_ID.to_string(),
        )
    }

    pub fn reject_sends(&self, reject: bool) {
        self.state.inner.lock().unwrap().reject_sends = reject;
    }

    pub fn reject_get_me(&self, reject: bool) {
        self.state.inner.lock().unwrap().reject_get_me = reject;
    }

    /// Texts delivered so far, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.state
            .inner
            .lock()
            .unwrap()
            .sent
            .iter()
            .filter_map(|body| body.get("text").and_then(|v| v.as_str()))
            .map(str::to_string)
            .collect()
    }

    pub fn sent_bodies(&self) -> Vec<Value> {
        self.state.inner.lock().unwrap().sent.clone()
    }
}

async fn send_message(
    State(state): State<TelegramState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut inner = state.inner.lock().unwrap();
    if inner.reject_sends {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "description": "Bad Request: chat not found" })),
        );
    }
    inner.sent.push(body);
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "result": { "message_id": inner.sent.len() } })),
    )
}

async fn get_me(State(state): State<TelegramState>) -> (StatusCode, Json<Value>) {
    if state.inner.lock().unwrap().reject_get_me {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "ok": false, "description": "Unauthorized" })),
        );
    }
    (
        StatusCode::OK,
        Json(json!({ "ok": true, "result": { "id": 1, "is_bot": true, "username": "reviewbot" } })),
    )
}

pub async fn spawn_telegram() -> StubTelegram {
    let state = TelegramState::default();

    let app = Router::new()
        .route("/bot{token}/sendMessage", post(send_message))
        .route("/bot{token}/getMe", get(get_me))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub Telegram failed");
    });

    StubTelegram { addr, state }
}

//! In-process fakes for the review API and the Telegram Bot API.

#![allow(dead_code)]

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

pub const REVIEW_TOKEN: &str = "y0_review_token";
pub const BOT_TOKEN: &str = "123456:bot-token";
pub const CHAT_ID: &str = "42";
pub const STATUSES_PATH: &str = "/api/user_api/homework_statuses/";

#[derive(Debug, Clone)]
pub enum Reply {
    Json(StatusCode, Value),
    Text(StatusCode, &'static str),
}

impl Reply {
    pub fn ok(body: Value) -> Self {
        Reply::Json(StatusCode::OK, body)
    }

    pub fn homeworks(records: Value, current_date: i64) -> Self {
        Reply::ok(json!({"homeworks": records, "current_date": current_date}))
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(status, body) => (status, Json(body)).into_response(),
            Reply::Text(status, body) => (status, body).into_response(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusRequest {
    pub from_date: Option<String>,
    pub authorization: Option<String>,
}

/// Fake review API. Replays scripted replies, repeating the last one.
#[derive(Default)]
pub struct FakeReviewApi {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<StatusRequest>>,
}

impl FakeReviewApi {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<StatusRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies
                .front()
                .cloned()
                .unwrap_or(Reply::Json(StatusCode::NOT_FOUND, json!({})))
        }
    }

    /// Start serving; returns the full endpoint URL.
    pub async fn start(self: &Arc<Self>) -> String {
        let router = Router::new()
            .route(STATUSES_PATH, get(homework_statuses))
            .with_state(self.clone());
        let base = serve(router).await;
        format!("{}{}", base, STATUSES_PATH)
    }
}

async fn homework_statuses(
    State(api): State<Arc<FakeReviewApi>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    api.requests.lock().unwrap().push(StatusRequest {
        from_date: params.get("from_date").cloned(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    api.next_reply()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentMessage {
    pub bot_path: String,
    pub chat_id: Value,
    pub text: String,
}

/// Fake Telegram Bot API exposing `sendMessage`.
#[derive(Default)]
pub struct FakeTelegram {
    messages: Mutex<Vec<SentMessage>>,
    reject_with: Mutex<Option<&'static str>>,
    never_reply: Mutex<bool>,
}

impl FakeTelegram {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every `sendMessage` call fail with a Bot API error.
    pub fn rejecting(description: &'static str) -> Arc<Self> {
        let telegram = Self::default();
        *telegram.reject_with.lock().unwrap() = Some(description);
        Arc::new(telegram)
    }

    /// Accept every `sendMessage` call and never answer it.
    pub fn hanging() -> Arc<Self> {
        let telegram = Self::default();
        *telegram.never_reply.lock().unwrap() = true;
        Arc::new(telegram)
    }

    pub fn messages(&self) -> Vec<SentMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.messages().into_iter().map(|m| m.text).collect()
    }

    /// Start serving; returns the API base URL.
    pub async fn start(self: &Arc<Self>) -> String {
        let router = Router::new()
            .route("/:bot/sendMessage", post(send_message))
            .with_state(self.clone());
        serve(router).await
    }
}

async fn send_message(
    State(telegram): State<Arc<FakeTelegram>>,
    Path(bot_path): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    telegram.messages.lock().unwrap().push(SentMessage {
        bot_path,
        chat_id: body["chat_id"].clone(),
        text: body["text"].as_str().unwrap_or_default().to_string(),
    });

    let never_reply = *telegram.never_reply.lock().unwrap();
    if never_reply {
        std::future::pending::<()>().await;
    }

    match *telegram.reject_with.lock().unwrap() {
        Some(description) => Reply::Json(
            StatusCode::BAD_REQUEST,
            json!({"ok": false, "error_code": 400, "description": description}),
        ),
        None => Reply::ok(json!({"ok": true, "result": {"message_id": 1}})),
    }
}

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// An address nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}{}", addr, STATUSES_PATH)
}

use anyhow::Result;
use homework_core::{Sanitizer, ServiceType};
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::client::create_http_client;
use crate::recording::RecordingLogger;

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Upper bound on a single Bot API call, so a silent server cannot hold up
/// the poll loop.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The request never got a response. The text never carries the bot token.
    #[error("request to Telegram failed: {0}")]
    Transport(String),

    /// Telegram answered but refused the message.
    #[error("Telegram rejected the message ({status}): {description}")]
    Rejected { status: u16, description: String },
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    description: Option<String>,
}

/// Minimal Telegram Bot API client: just enough to post text messages.
#[derive(Clone)]
pub struct TelegramClient {
    client: ClientWithMiddleware,
    api_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::new_with_recording(api_url, token, None)
    }

    pub fn new_with_recording(
        api_url: impl Into<String>,
        token: impl Into<String>,
        recording_logger: Option<RecordingLogger>,
    ) -> Result<Self> {
        Self::with_timeout(api_url, token, recording_logger, DEFAULT_SEND_TIMEOUT)
    }

    pub fn with_timeout(
        api_url: impl Into<String>,
        token: impl Into<String>,
        recording_logger: Option<RecordingLogger>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = create_http_client(ServiceType::Telegram, recording_logger, Some(timeout))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            method
        )
    }

    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body: Option<BotApiResponse> = response.json().await.ok();

        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiResponse { description, .. }) => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(DeliveryError::Rejected {
                status: status.as_u16(),
                description: "unreadable response body".to_string(),
            }),
        }
    }
}

/// reqwest puts the request URL, and with it the token, into its error text.
fn transport_error(e: reqwest_middleware::Error) -> DeliveryError {
    let text = match e {
        reqwest_middleware::Error::Reqwest(e) => e.without_url().to_string(),
        other => other.to_string(),
    };
    DeliveryError::Transport(Sanitizer::sanitize_url(&text))
}

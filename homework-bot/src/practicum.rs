use anyhow::Result;
use async_trait::async_trait;
use homework_core::ServiceType;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use tracing::{debug, error};

use crate::client::create_http_client;
use crate::error::PollError;
use crate::recording::RecordingLogger;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Source of homework status payloads.
///
/// Implementations return the raw JSON body; shape checks happen in the
/// poller so that every source is validated the same way.
#[async_trait]
pub trait HomeworkSource: Send + Sync {
    async fn fetch_homeworks(&self, from_date: i64) -> Result<Value, PollError>;
}

/// Client for the homework review API.
#[derive(Clone)]
pub struct ReviewApiClient {
    client: ClientWithMiddleware,
    endpoint: String,
    token: String,
}

impl ReviewApiClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::new_with_recording(endpoint, token, None)
    }

    pub fn new_with_recording(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        recording_logger: Option<RecordingLogger>,
    ) -> Result<Self> {
        let client = create_http_client(ServiceType::ReviewApi, recording_logger, None)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    /// Fetch homework statuses updated since `from_date` (unix seconds).
    pub async fn get_homework_statuses(&self, from_date: i64) -> Result<Value, PollError> {
        debug!("Requesting homework statuses from_date={}", from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| {
                error!("Review API request failed: {}", e);
                PollError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PollError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| PollError::Decode(e.to_string()))
    }
}

#[async_trait]
impl HomeworkSource for ReviewApiClient {
    async fn fetch_homeworks(&self, from_date: i64) -> Result<Value, PollError> {
        self.get_homework_statuses(from_date).await
    }
}

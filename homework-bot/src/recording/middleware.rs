use super::logger::RecordingLogger;
use homework_core::{
    CorrelationId, Direction, RecordedEvent, Sanitizer, ServiceType, CORRELATION_ID_HEADER,
};
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next, Result as MiddlewareResult};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

const MAX_RECORDED_BODY: usize = 10_000;

pub struct RecordingMiddleware {
    logger: RecordingLogger,
    service_type: ServiceType,
}

impl RecordingMiddleware {
    pub fn new(logger: RecordingLogger, service_type: ServiceType) -> Self {
        Self {
            logger,
            service_type,
        }
    }
}

#[async_trait::async_trait]
impl Middleware for RecordingMiddleware {
    async fn handle(
        &self,
        mut req: Request,
        extensions: &mut http::Extensions,
        next: Next<'_>,
    ) -> MiddlewareResult<Response> {
        let correlation_id = req
            .headers()
            .get(CORRELATION_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .or_else(|| extensions.get::<CorrelationId>().map(|id| id.0.clone()))
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        if !req.headers().contains_key(CORRELATION_ID_HEADER) {
            if let Ok(value) = correlation_id.parse() {
                req.headers_mut().insert(CORRELATION_ID_HEADER, value);
            }
        }

        let request_data = extract_request_data(&req);
        self.record(
            Direction::Request,
            format!(
                "{} {}",
                request_data.method,
                extract_path(&request_data.url)
            ),
            serde_json::to_value(&request_data).unwrap_or(Value::Null),
            &correlation_id,
        );

        let response = next.run(req, extensions).await;

        match &response {
            Ok(resp) => {
                let response_data = extract_response_data(resp);
                self.record(
                    Direction::Response,
                    format!("response_{}", response_data.status_code),
                    serde_json::to_value(&response_data).unwrap_or(Value::Null),
                    &correlation_id,
                );
            }
            Err(err) => {
                // reqwest errors can embed the request URL, which for Telegram carries the token
                let message = Sanitizer::sanitize_url(&err.to_string());
                self.record(
                    Direction::Response,
                    "error".to_string(),
                    serde_json::json!({ "error": message }),
                    &correlation_id,
                );
            }
        }

        response
    }
}

impl RecordingMiddleware {
    fn record(&self, direction: Direction, operation: String, data: Value, correlation_id: &str) {
        let event = RecordedEvent {
            timestamp: chrono::Utc::now().to_rfc3339(),
            correlation_id: correlation_id.to_string(),
            event_type: self.service_type.event_type(),
            direction,
            operation,
            data,
            metadata: HashMap::new(),
        };

        self.logger.record(event);
    }
}

#[derive(Debug, serde::Serialize)]
struct RequestData {
    method: String,
    url: String,
    headers: HashMap<String, String>,
    body: Value,
}

#[derive(Debug, serde::Serialize)]
struct ResponseData {
    status_code: u16,
    headers: HashMap<String, String>,
    body_size: u64,
}

fn header_map(headers: &reqwest::header::HeaderMap) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for (name, value) in headers {
        if let Ok(value_str) = value.to_str() {
            map.insert(name.to_string(), value_str.to_string());
        }
    }
    Sanitizer::sanitize_headers(&map)
}

fn extract_request_data(request: &Request) -> RequestData {
    let body = match request.body().map(|b| b.as_bytes()) {
        None => Value::Null,
        Some(None) => Value::String("[STREAM_BODY]".to_string()),
        Some(Some(bytes)) if bytes.len() > MAX_RECORDED_BODY => {
            Value::String(format!("[LARGE_BODY_{}b]", bytes.len()))
        }
        Some(Some(bytes)) => match serde_json::from_slice::<Value>(bytes) {
            Ok(json) => Sanitizer::sanitize_json(&json),
            Err(_) => match std::str::from_utf8(bytes) {
                Ok(text) => Value::String(text.to_string()),
                Err(_) => Value::String(format!("[BINARY_BODY_{}b]", bytes.len())),
            },
        },
    };

    RequestData {
        method: request.method().to_string(),
        url: Sanitizer::sanitize_url(request.url().as_str()),
        headers: header_map(request.headers()),
        body,
    }
}

fn extract_response_data(response: &Response) -> ResponseData {
    ResponseData {
        status_code: response.status().as_u16(),
        headers: header_map(response.headers()),
        body_size: response.content_length().unwrap_or(0),
    }
}

fn extract_path(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_else(|_| url.to_string())
}

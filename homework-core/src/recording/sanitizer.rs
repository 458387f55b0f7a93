use serde_json::Value;
use std::collections::HashMap;

pub const REDACTED: &str = "[REDACTED]";

/// Headers that contain security-sensitive values and must be redacted.
pub const SENSITIVE_HEADERS: &[&str] = &["authorization", "cookie", "set-cookie"];

/// JSON keys whose values are credentials.
pub const SENSITIVE_JSON_KEYS: &[&str] = &["token", "password", "secret"];

pub struct Sanitizer;

impl Sanitizer {
    /// Check if a header name is sensitive and should be redacted.
    pub fn is_sensitive_header(header_name: &str) -> bool {
        let lower = header_name.to_lowercase();
        SENSITIVE_HEADERS.contains(&lower.as_str())
    }

    /// Remove sensitive data from headers
    pub fn sanitize_headers(headers: &HashMap<String, String>) -> HashMap<String, String> {
        headers
            .iter()
            .map(|(key, value)| {
                let sanitized_value = if Self::is_sensitive_header(key) {
                    REDACTED.to_string()
                } else {
                    value.clone()
                };
                (key.clone(), sanitized_value)
            })
            .collect()
    }

    /// Redact bot tokens embedded in URL paths.
    ///
    /// The Telegram Bot API addresses every method as `/bot<id>:<secret>/<method>`,
    /// so the credential travels in the path rather than in a header. Segments
    /// that merely start with `bot` are left alone.
    pub fn sanitize_url(url: &str) -> String {
        let mut sanitized = String::with_capacity(url.len());
        let mut rest = url;

        while let Some(start) = rest.find("/bot") {
            let (head, tail) = rest.split_at(start + "/bot".len());
            sanitized.push_str(head);
            let segment_len = tail
                .find(|c: char| matches!(c, '/' | '?' | '#'))
                .unwrap_or(tail.len());
            let (segment, after) = tail.split_at(segment_len);
            if is_bot_token(segment) {
                sanitized.push_str(REDACTED);
            } else {
                sanitized.push_str(segment);
            }
            rest = after;
        }

        sanitized.push_str(rest);
        sanitized
    }

    /// Remove sensitive data from JSON payloads
    pub fn sanitize_json(value: &Value) -> Value {
        match value {
            Value::Object(map) => {
                let mut sanitized = serde_json::Map::new();
                for (key, val) in map {
                    let sanitized_val = if SENSITIVE_JSON_KEYS.contains(&key.as_str()) {
                        Value::String(REDACTED.to_string())
                    } else {
                        Self::sanitize_json(val)
                    };
                    sanitized.insert(key.clone(), sanitized_val);
                }
                Value::Object(sanitized)
            }
            Value::Array(arr) => Value::Array(arr.iter().map(Self::sanitize_json).collect()),
            _ => value.clone(),
        }
    }
}

/// `<numeric bot id>:<secret>`, the shape of a Bot API token.
fn is_bot_token(segment: &str) -> bool {
    match segment.split_once(':') {
        Some((id, secret)) => {
            !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) && !secret.is_empty()
        }
        None => false,
    }
}

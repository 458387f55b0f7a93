use serde_json::Value;
use thiserror::Error;

/// Ways a review API payload or homework record can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseError {
    /// A value had the wrong JSON type.
    #[error("expected {expected} for {context}, got {found}")]
    TypeMismatch {
        context: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A required key was absent.
    #[error("response is missing required key `{key}`")]
    MissingField { key: &'static str },

    /// The homework status is not one of the known verdict codes.
    #[error("unexpected homework status: {status}")]
    UnknownStatus { status: String },
}

impl ResponseError {
    pub(crate) fn type_mismatch(
        context: &'static str,
        expected: &'static str,
        found: &Value,
    ) -> Self {
        Self::TypeMismatch {
            context,
            expected,
            found: json_type_name(found),
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

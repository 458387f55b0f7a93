use serde_json::Value;
use std::fmt;

use crate::error::ResponseError;
use crate::verdict::Verdict;

pub const HOMEWORK_NAME_KEY: &str = "homework_name";
pub const STATUS_KEY: &str = "status";

/// A homework's current review status, ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub homework_name: String,
    pub verdict: Verdict,
}

impl fmt::Display for StatusChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Status changed for submission \"{}\". {}",
            self.homework_name, self.verdict
        )
    }
}

/// Extract the name and verdict from a single homework record.
pub fn parse_status(homework: &Value) -> Result<StatusChange, ResponseError> {
    let record = homework
        .as_object()
        .ok_or_else(|| ResponseError::type_mismatch("homework", "object", homework))?;

    let name = record.get(HOMEWORK_NAME_KEY).ok_or(ResponseError::MissingField {
        key: HOMEWORK_NAME_KEY,
    })?;
    let status = record
        .get(STATUS_KEY)
        .ok_or(ResponseError::MissingField { key: STATUS_KEY })?;

    let homework_name = name
        .as_str()
        .ok_or_else(|| ResponseError::type_mismatch(HOMEWORK_NAME_KEY, "string", name))?;

    let verdict = match status {
        Value::String(code) => Verdict::from_code(code).ok_or_else(|| {
            ResponseError::UnknownStatus {
                status: code.clone(),
            }
        })?,
        other => {
            return Err(ResponseError::UnknownStatus {
                status: other.to_string(),
            })
        }
    };

    Ok(StatusChange {
        homework_name: homework_name.to_string(),
        verdict,
    })
}

/// Render a homework record as notification text.
pub fn format_status(homework: &Value) -> Result<String, ResponseError> {
    parse_status(homework).map(|change| change.to_string())
}

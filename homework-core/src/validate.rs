//! Shape checks for review API responses.
//!
//! The review API answers with a JSON object holding a `homeworks` array and
//! a `current_date` timestamp. Everything else in the payload is ignored.

use serde_json::Value;

use crate::error::ResponseError;

pub const HOMEWORKS_KEY: &str = "homeworks";
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Keys that must be present in every response, in the order they are checked.
pub const REQUIRED_RESPONSE_KEYS: [&str; 2] = [HOMEWORKS_KEY, CURRENT_DATE_KEY];

/// A validated view into a review API response.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewPage<'a> {
    homeworks: &'a [Value],
    current_date: &'a Value,
}

impl<'a> ReviewPage<'a> {
    /// All homework records in the response, newest first.
    pub fn homeworks(&self) -> &'a [Value] {
        self.homeworks
    }

    /// The record the bot reports on: the first one, if any.
    pub fn latest(&self) -> Option<&'a Value> {
        self.homeworks.first()
    }

    /// The server's echoed timestamp, when it is an integer.
    pub fn current_date(&self) -> Option<i64> {
        self.current_date.as_i64()
    }
}

/// Check the shape of a review API response and expose its records.
///
/// An empty `homeworks` array is valid; deciding what to do with it is up to
/// the caller.
pub fn check_response(response: &Value) -> Result<ReviewPage<'_>, ResponseError> {
    let object = response
        .as_object()
        .ok_or_else(|| ResponseError::type_mismatch("response", "object", response))?;

    for key in REQUIRED_RESPONSE_KEYS {
        if !object.contains_key(key) {
            return Err(ResponseError::MissingField { key });
        }
    }

    let homeworks = &object[HOMEWORKS_KEY];
    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| ResponseError::type_mismatch(HOMEWORKS_KEY, "array", homeworks))?;

    Ok(ReviewPage {
        homeworks: homeworks.as_slice(),
        current_date: &object[CURRENT_DATE_KEY],
    })
}

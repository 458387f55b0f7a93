use homework_core::ResponseError;
use thiserror::Error;

/// Everything that can go wrong during one poll cycle.
///
/// Every variant is recoverable: the poller reports it and tries again after
/// the retry period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollError {
    /// The request to the review API could not be completed.
    #[error("request to the review API failed: {0}")]
    Transport(String),

    /// The review API answered with something other than 200 OK.
    #[error("review API request was not successful, response code: {status}")]
    HttpStatus { status: u16 },

    /// The review API answered 200 OK with a body that is not JSON.
    #[error("review API returned an unreadable body: {0}")]
    Decode(String),

    /// The payload or homework record had an unexpected shape.
    #[error(transparent)]
    Response(#[from] ResponseError),
}

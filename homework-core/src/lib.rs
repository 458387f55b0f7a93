//! Domain logic for the homework review bot: verdict lookup, response
//! validation and status formatting. Nothing in this crate performs I/O.

pub mod error;
pub mod recording;
pub mod status;
pub mod validate;
pub mod verdict;

pub use error::{json_type_name, ResponseError};
pub use recording::{
    CorrelationId, Direction, EventType, RecordedEvent, Sanitizer, ServiceType,
    CORRELATION_ID_HEADER,
};
pub use status::{format_status, parse_status, StatusChange};
pub use validate::{check_response, ReviewPage};
pub use verdict::Verdict;

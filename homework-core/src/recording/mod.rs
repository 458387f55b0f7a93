pub mod sanitizer;
pub mod types;

pub use sanitizer::{Sanitizer, REDACTED, SENSITIVE_HEADERS, SENSITIVE_JSON_KEYS};
pub use types::*;

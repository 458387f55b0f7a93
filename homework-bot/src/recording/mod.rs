//! Optional JSON-lines recording of outgoing HTTP traffic.
//!
//! Enabled with `RECORDING_ENABLED=true`. Credentials are redacted before an
//! event leaves the middleware.

pub mod logger;
pub mod middleware;

pub use homework_core::recording::*;
pub use logger::RecordingLogger;
pub use middleware::RecordingMiddleware;

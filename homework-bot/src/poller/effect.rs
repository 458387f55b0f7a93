//! Effects (side effects as data).
//!
//! The transition function only describes what should happen; the poller
//! executes these against the notifier and the log.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Deliver a message to the chat.
    Notify { message: String },

    /// Log a message.
    Log { level: LogLevel, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

//! Poller state carried between cycles.

use serde::{Deserialize, Serialize};

/// How the `from_date` cursor moves between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CursorPolicy {
    /// Keep querying from the start time.
    #[default]
    Fixed,
    /// Adopt the `current_date` echoed by the review API after each valid response.
    FollowServer,
}

/// Everything the poller remembers. Lives in memory only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollState {
    /// Lower bound (unix seconds) for the next fetch.
    pub cursor: i64,
    pub cursor_policy: CursorPolicy,
    /// The last status message delivered to the chat.
    pub last_message: Option<String>,
}

impl PollState {
    pub fn new(cursor: i64, cursor_policy: CursorPolicy) -> Self {
        Self {
            cursor,
            cursor_policy,
            last_message: None,
        }
    }

    /// Cursor to use after a response echoing `current_date`.
    pub fn next_cursor(&self, current_date: Option<i64>) -> i64 {
        match (self.cursor_policy, current_date) {
            (CursorPolicy::FollowServer, Some(date)) => date,
            _ => self.cursor,
        }
    }
}

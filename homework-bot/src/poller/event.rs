//! Outcomes of a single poll cycle, fed into the transition function.

/// What one fetch/validate/format pass observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The latest homework produced a status message.
    StatusReported {
        message: String,
        current_date: Option<i64>,
    },

    /// The response was valid but listed no homework.
    NoHomework { current_date: Option<i64> },

    /// Fetching, validation or formatting failed.
    CycleFailed { error: String },
}

pub mod config;
pub mod error;
pub mod client;
pub mod notifier;
pub mod poller;
pub mod practicum;
pub mod recording;
pub mod telegram;

pub use config::{Config, ConfigError};
pub use error::PollError;
pub use notifier::{Notifier, TelegramNotifier};
pub use poller::{CursorPolicy, PollState, Poller, PollerSettings};
pub use practicum::{HomeworkSource, ReviewApiClient};
pub use recording::RecordingLogger;
pub use telegram::{DeliveryError, TelegramClient};

mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub fn get_bot_version() -> String {
    // First check for a git hash injected by the packaging environment
    if let Some(git_hash) = option_env!("HOMEWORK_BOT_GIT_HASH") {
        short_hash(git_hash)
    } else if let Some(git_hash) = built_info::GIT_COMMIT_HASH {
        // Fall back to built crate's git detection (for cargo builds)
        short_hash(git_hash)
    } else {
        built_info::PKG_VERSION.to_string()
    }
}

fn short_hash(hash: &str) -> String {
    hash.chars().take(8).collect()
}

/// User agent sent with every outgoing request.
pub fn user_agent() -> String {
    format!("homework-bot/{}", get_bot_version())
}

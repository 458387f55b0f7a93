use async_trait::async_trait;
use tracing::{debug, error};

use crate::telegram::TelegramClient;

/// Best-effort delivery of a message to the user.
///
/// Implementations must never fail: a message that cannot be delivered is
/// logged and dropped so the poll loop keeps running.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Sends notifications to a single Telegram chat.
pub struct TelegramNotifier {
    client: TelegramClient,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient, chat_id: impl Into<String>) -> Self {
        Self {
            client,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str) {
        match self.client.send_message(&self.chat_id, message).await {
            Ok(()) => debug!("Sent message: {}", message),
            Err(e) => error!("Failed to send message: {}", e),
        }
    }
}

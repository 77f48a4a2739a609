//! # Operator Log
//!
//! Dispatches escalations and user feedback to the operators. Every entry is
//! written through `tracing` (console and session file); when an operator room
//! is configured the entry is mirrored there as well.

use crate::domain::traits::ChatProvider;
use crate::strings::messages;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone, Default)]
pub struct OperatorLog {
    chat_provider: Option<Arc<dyn ChatProvider>>,
}

impl OperatorLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chat(mut self, provider: Arc<dyn ChatProvider>) -> Self {
        self.chat_provider = Some(provider);
        self
    }

    /// Reports a failed command together with its technical detail.
    pub async fn escalate(&self, command: &str, detail: &str) {
        error!("Escalating failure of '{}': {}", command, detail);
        let at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.mirror(&messages::operator_error(&at, command, detail)).await;
    }

    /// Forwards a user's feedback. Returns whether it reached a room.
    pub async fn relay_feedback(&self, sender: &str, room_id: &str, feedback: &str) -> bool {
        info!("Feedback from {} in {}: {}", sender, room_id, feedback);
        self.mirror(&messages::operator_feedback(sender, room_id, feedback))
            .await
    }

    async fn mirror(&self, content: &str) -> bool {
        let Some(chat) = &self.chat_provider else {
            return false;
        };
        match chat.send_notification(content).await {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to reach operator room {}: {}", chat.room_id(), e);
                false
            }
        }
    }
}

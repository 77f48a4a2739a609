//! # Feedback Command
//!
//! Handles `.feedback MESSAGE`: thanks the user and forwards the message to
//! the operator room.

use crate::application::logging::OperatorLog;
use crate::domain::traits::ChatProvider;
use crate::strings::messages;
use anyhow::Result;

pub async fn handle_feedback(
    operators: &OperatorLog,
    chat: &impl ChatProvider,
    sender: &str,
    feedback: &str,
) -> Result<()> {
    let feedback = feedback.trim();
    if feedback.is_empty() {
        chat.send_message(messages::FEEDBACK_USAGE).await.map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    if !operators.relay_feedback(sender, &chat.room_id(), feedback).await {
        tracing::warn!("Feedback from {} was only logged (no operator room)", sender);
    }
    chat.send_message(messages::FEEDBACK_SENT).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

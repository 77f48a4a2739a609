//! # Domain Traits
//!
//! Abstract interfaces for the outside world (chat rooms, HTTP JSON APIs).
//! Allows for pluggable implementations in the Infrastructure layer.

use crate::domain::errors::QuoteError;
use async_trait::async_trait;

/// Abstract interface for a Chat Provider (e.g., Matrix, Console)
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a message to the room
    async fn send_message(&self, content: &str) -> Result<String, String>;

    /// Send a notification (not tracked)
    async fn send_notification(&self, content: &str) -> Result<(), String>;

    /// Send a typing indicator
    async fn typing(&self, active: bool) -> Result<(), String>;

    /// Get the current room ID
    fn room_id(&self) -> String;
}

/// Abstract interface for a `GET url?params -> JSON` call.
///
/// Any transport failure, non-success status or undecodable body comes back
/// as `QuoteError::Api`.
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn get_json(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> Result<serde_json::Value, QuoteError>;
}

//! In-memory doubles for the outbound traits.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use crate::domain::errors::QuoteError;
use crate::domain::traits::{ChatProvider, JsonFetcher};

/// Serves canned JSON documents keyed by exact URL and records every call.
#[derive(Default)]
pub struct FakeFetcher {
    routes: Vec<(String, Result<Value, QuoteError>)>,
    pub calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, doc: Value) -> Self {
        self.routes.push((url.to_string(), Ok(doc)));
        self
    }

    pub fn failing(mut self, url: &str, err: QuoteError) -> Self {
        self.routes.push((url.to_string(), Err(err)));
        self
    }

    /// Query parameters of the most recent call to `url`.
    pub fn params_of(&self, url: &str) -> Vec<(String, String)> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(u, _)| u == url)
            .map(|(_, params)| params.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl JsonFetcher for FakeFetcher {
    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, QuoteError> {
        self.calls.lock().unwrap().push((
            url.to_string(),
            params.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        ));
        self.routes
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, result)| result.clone())
            .unwrap_or_else(|| Err(QuoteError::api("fake", format!("no route for {}", url))))
    }
}

/// Chat room that keeps everything sent to it.
#[derive(Default)]
pub struct RecordingChat {
    pub room: String,
    pub messages: Mutex<Vec<String>>,
    pub notifications: Mutex<Vec<String>>,
    pub typing: Mutex<Vec<bool>>,
}

impl RecordingChat {
    pub fn new(room: &str) -> Self {
        Self {
            room: room.to_string(),
            ..Default::default()
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatProvider for RecordingChat {
    async fn send_message(&self, content: &str) -> Result<String, String> {
        let mut messages = self.messages.lock().unwrap();
        messages.push(content.to_string());
        Ok(format!("$event{}", messages.len()))
    }

    async fn send_notification(&self, content: &str) -> Result<(), String> {
        self.notifications.lock().unwrap().push(content.to_string());
        Ok(())
    }

    async fn typing(&self, active: bool) -> Result<(), String> {
        self.typing.lock().unwrap().push(active);
        Ok(())
    }

    fn room_id(&self) -> String {
        self.room.clone()
    }
}

//! # Command Router
//!
//! Routes incoming messages to the appropriate command handler (in `interface/commands`).
//! It parses the command string (e.g., `.0x 500 DAI`), dispatches it with the necessary
//! context and turns handler failures into chat replies and operator escalations.

use anyhow::Result;
use std::sync::Arc;

use crate::application::logging::OperatorLog;
use crate::domain::config::AppConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::{ChatProvider, JsonFetcher};
use crate::domain::types::Aggregator;
use crate::interface::commands;
use crate::strings::messages;

pub struct CommandRouter {
    config: AppConfig,
    http: Arc<dyn JsonFetcher>,
    operators: OperatorLog,
}

impl CommandRouter {
    pub fn new(config: AppConfig, http: Arc<dyn JsonFetcher>, operators: OperatorLog) -> Self {
        Self {
            config,
            http,
            operators,
        }
    }

    pub async fn route<C>(&self, chat: &C, message: &str, sender: &str) -> Result<()>
    where
        C: ChatProvider,
    {
        let msg = message.trim();
        let Some(body) = msg.strip_prefix(self.config.system.command_prefix.as_str()) else {
            return Ok(());
        };

        let (cmd, rest) = match body.find(char::is_whitespace) {
            Some(idx) => (&body[..idx], body[idx..].trim()),
            None => (body, ""),
        };
        let cmd = cmd.to_lowercase();
        let args: Vec<String> = rest.split_whitespace().map(String::from).collect();

        let aggregator = Aggregator::from_command(&cmd);
        let known = aggregator.is_some()
            || matches!(cmd.as_str(), "start" | "help" | "pools" | "deepest" | "feedback");
        if !known {
            tracing::debug!("Ignoring unknown command '{}' from {}", cmd, sender);
            return Ok(());
        }

        tracing::info!(
            "Router dispatching cmd='{}' args='{}' sender='{}'",
            cmd,
            rest,
            sender
        );

        let _ = chat.typing(true).await;
        let http = self.http.as_ref();
        let result = match (cmd.as_str(), aggregator) {
            (_, Some(aggregator)) => {
                commands::quote::handle_quote(&self.config.aggregators, http, chat, aggregator, &args)
                    .await
            }
            ("start", _) => commands::help::handle_start(chat).await,
            ("help", _) => commands::help::handle_help(chat).await,
            ("pools", _) => {
                commands::pools::handle_pools(&self.config.services.pools, http, chat, &args).await
            }
            ("deepest", _) => {
                commands::pools::handle_deepest(&self.config.services.pools, http, chat).await
            }
            _ => commands::feedback::handle_feedback(&self.operators, chat, sender, rest).await,
        };
        let _ = chat.typing(false).await;

        match result {
            Ok(()) => Ok(()),
            Err(e) => self.report(chat, msg, e).await,
        }
    }

    /// Error boundary: user-facing reply per error kind, escalation for
    /// upstream failures and anything unclassified.
    async fn report<C>(&self, chat: &C, command: &str, err: anyhow::Error) -> Result<()>
    where
        C: ChatProvider,
    {
        let (reply, escalate) = match err.downcast_ref::<QuoteError>() {
            Some(e) => (e.user_message(), e.should_escalate()),
            None => (messages::API_UNAVAILABLE.to_string(), true),
        };

        if escalate {
            self.operators.escalate(command, &format!("{:#}", err)).await;
        } else {
            tracing::warn!("'{}' rejected: {}", command, err);
        }

        chat.send_message(&reply).await.map_err(|e| anyhow::anyhow!(e))?;
        Ok(())
    }
}

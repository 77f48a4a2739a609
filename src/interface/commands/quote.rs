//! # Quote Commands
//!
//! Handles `.dexag`, `.1inch`, `.paraswap` and `.0x`.

use crate::application::quotes::handle_quote_request;
use crate::domain::config::AggregatorsConfig;
use crate::domain::traits::{ChatProvider, JsonFetcher};
use crate::domain::types::Aggregator;
use anyhow::Result;

pub async fn handle_quote(
    endpoints: &AggregatorsConfig,
    http: &dyn JsonFetcher,
    chat: &impl ChatProvider,
    aggregator: Aggregator,
    args: &[String],
) -> Result<()> {
    let text = handle_quote_request(args, aggregator, endpoints, http).await?;
    chat.send_message(&text).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

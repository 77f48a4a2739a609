//! # Quote Requests
//!
//! The single inbound operation of the quote layer: raw command arguments in,
//! display text out. Parsing, the backend call and formatting are chained
//! here; error kinds are left for the caller's boundary to act on.

use crate::application::order;
use crate::application::quote_formatter::format_quote;
use crate::domain::config::AggregatorsConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;
use crate::domain::types::Aggregator;
use crate::infrastructure::aggregators;
use crate::strings::messages;

/// Quote `args` (already whitespace-split) on `aggregator`.
///
/// Format errors come back carrying the command's usage text.
pub async fn handle_quote_request(
    args: &[String],
    aggregator: Aggregator,
    endpoints: &AggregatorsConfig,
    http: &dyn JsonFetcher,
) -> Result<String, QuoteError> {
    let intent = order::parse(
        args,
        aggregator.allows_buy_amount(),
        aggregator.default_sell_token(),
    )
    .map_err(|e| match e {
        QuoteError::Format(_) => QuoteError::format(messages::quote_usage(aggregator)),
        other => other,
    })?;

    tracing::info!(
        "Quoting {} -> {} ({:?}) on {}",
        intent.sell_token(),
        intent.buy_token(),
        intent.amount(),
        aggregator.as_str()
    );

    let quote = aggregators::quote(aggregator, endpoints, http, &intent).await?;
    let site = &endpoints.endpoint(aggregator).site;
    Ok(format_quote(&quote, Some(site)))
}

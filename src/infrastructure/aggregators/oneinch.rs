//! 1inch provider
//!
//! Sell-side only. The registry is an object keyed by symbol; the quote
//! returns the receive side as a raw integer in the buy token's units.

use serde_json::Value;

use super::{
    from_base_units, number, required, required_number, resolve_pair, to_base_units,
    token_entry, venue_shares,
};
use crate::domain::config::EndpointConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;
use crate::domain::types::{Aggregator, Quote, TokenMetadata, TradeIntent};
use crate::strings::messages;

const SERVICE: &str = "1inch";
const SLIPPAGE: &str = "0.1";

pub async fn quote(
    endpoint: &EndpointConfig,
    http: &dyn JsonFetcher,
    intent: &TradeIntent,
) -> Result<Quote, QuoteError> {
    let sell_amount = intent
        .sell_amount()
        .ok_or_else(|| QuoteError::format(messages::FORMAT_NOT_SUPPORTED))?;

    let tokens_url = endpoint
        .tokens
        .as_deref()
        .ok_or_else(|| QuoteError::api(SERVICE, "No token registry configured"))?;
    let registry = http.get_json(tokens_url, &[]).await?;
    let (sell, buy) = resolve_tokens(&registry, intent)?;

    let params = vec![
        ("fromTokenSymbol", intent.sell_token().to_string()),
        ("toTokenSymbol", intent.buy_token().to_string()),
        ("amount", to_base_units(sell_amount, sell.decimals)),
        ("slippage", SLIPPAGE.to_string()),
    ];
    let doc = http.get_json(&endpoint.offer, &params).await?;
    normalize(intent, sell_amount, &buy, &doc)
}

fn resolve_tokens(
    registry: &Value,
    intent: &TradeIntent,
) -> Result<(TokenMetadata, TokenMetadata), QuoteError> {
    let map = registry
        .as_object()
        .ok_or_else(|| QuoteError::api(SERVICE, "Token registry is not an object"))?;
    resolve_pair(
        map.iter()
            .filter_map(|(symbol, entry)| token_entry(Some(symbol.as_str()), entry, SERVICE)),
        intent,
    )
}

fn normalize(
    intent: &TradeIntent,
    sell_amount: f64,
    buy: &TokenMetadata,
    doc: &Value,
) -> Result<Quote, QuoteError> {
    if let Some(message) = doc.get("message").filter(|m| !m.is_null()) {
        return Err(QuoteError::api(SERVICE, format!("Upstream message: {}", message)));
    }

    let raw_receive = required_number(doc, "toTokenAmount", SERVICE)?;
    // The registry lists tokens it can't actually route; those come back as 0.
    if raw_receive == 0.0 {
        return Err(QuoteError::token_not_found());
    }
    let buy_amount = from_base_units(raw_receive, buy.decimals);

    let exchanges = required(doc, "exchanges", SERVICE)?
        .as_array()
        .ok_or_else(|| QuoteError::api(SERVICE, "'exchanges' is not a list"))?;
    let shares = venue_shares(exchanges.iter().filter_map(|ex| {
        let name = ex.get("name")?.as_str()?.to_string();
        Some((name, number(ex.get("part")?)?))
    }));

    Quote::new(Aggregator::OneInch, intent, sell_amount, buy_amount, shares)
}

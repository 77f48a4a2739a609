//! 0x provider
//!
//! Accepts either side. `price` is always buy-token per sell-token, so the
//! unknown side is a multiplication when selling and a division when buying.
//! Sources report their proportion on a 0–1 scale.

use serde_json::Value;

use super::{number, required, required_number, resolve_from_list, to_base_units, venue_shares};
use crate::domain::config::EndpointConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;
use crate::domain::types::{Aggregator, Quote, TokenMetadata, TradeAmount, TradeIntent};
use crate::strings::messages;

const SERVICE: &str = "0x";

pub async fn quote(
    endpoint: &EndpointConfig,
    http: &dyn JsonFetcher,
    intent: &TradeIntent,
) -> Result<Quote, QuoteError> {
    let tokens_url = endpoint
        .tokens
        .as_deref()
        .ok_or_else(|| QuoteError::api(SERVICE, "No token registry configured"))?;
    let registry = http.get_json(tokens_url, &[]).await?;
    let (sell, buy) = resolve_from_list(&registry, "records", SERVICE, intent)?;

    let params = price_request(intent, &sell, &buy);
    let doc = http.get_json(&endpoint.offer, &params).await?;
    normalize(intent, &doc)
}

fn price_request(
    intent: &TradeIntent,
    sell: &TokenMetadata,
    buy: &TokenMetadata,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("sellToken", intent.sell_token().to_string()),
        ("buyToken", intent.buy_token().to_string()),
    ];
    match intent.amount() {
        TradeAmount::Sell(v) => params.push(("sellAmount", to_base_units(v, sell.decimals))),
        TradeAmount::Buy(v) => params.push(("buyAmount", to_base_units(v, buy.decimals))),
    }
    params
}

fn normalize(intent: &TradeIntent, doc: &Value) -> Result<Quote, QuoteError> {
    // Validation failures (unknown pair, insufficient liquidity) carry a reason
    if let Some(reason) = doc.get("reason").and_then(Value::as_str) {
        tracing::warn!("0x refused {}/{}: {}", intent.sell_token(), intent.buy_token(), reason);
        return Err(QuoteError::data(messages::NO_LIQUIDITY));
    }

    let price = required_number(doc, "price", SERVICE)?;
    let (sell_amount, buy_amount) = match intent.amount() {
        TradeAmount::Sell(sell) => (sell, sell * price),
        TradeAmount::Buy(buy) => (buy / price, buy),
    };

    let sources = required(doc, "sources", SERVICE)?
        .as_array()
        .ok_or_else(|| QuoteError::api(SERVICE, "'sources' is not a list"))?;
    let shares = venue_shares(sources.iter().filter_map(|src| {
        let name = src.get("name")?.as_str()?.to_string();
        Some((name, number(src.get("proportion")?)? * 100.0))
    }));

    Quote::new(Aggregator::ZeroX, intent, sell_amount, buy_amount, shares)
}

//! ParaSwap provider
//!
//! Sell-side only. Token addresses go into the price URL path, and the
//! receive amount comes back in `priceRoute.amount` as raw integer units.

use serde_json::Value;

use super::{
    from_base_units, has_flag, number, required, required_number, resolve_from_list,
    to_base_units, venue_shares,
};
use crate::domain::config::EndpointConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;
use crate::domain::types::{Aggregator, Quote, TokenMetadata, TradeIntent};
use crate::strings::messages;

const SERVICE: &str = "paraswap";

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
    let (sell, buy) = resolve_from_list(&registry, "tokens", SERVICE, intent)?;

    let url = price_url(&endpoint.offer, &sell, &buy, sell_amount)?;
    let doc = http.get_json(&url, &[]).await?;
    normalize(intent, sell_amount, &buy, &doc)
}

fn price_url(
    base: &str,
    sell: &TokenMetadata,
    buy: &TokenMetadata,
    sell_amount: f64,
) -> Result<String, QuoteError> {
    let missing = || QuoteError::api(SERVICE, "Registry entry has no address");
    let from = sell.address.as_deref().ok_or_else(missing)?;
    let to = buy.address.as_deref().ok_or_else(missing)?;
    Ok(format!(
        "{}/{}/{}/{}",
        base.trim_end_matches('/'),
        from,
        to,
        to_base_units(sell_amount, sell.decimals)
    ))
}

fn normalize(
    intent: &TradeIntent,
    sell_amount: f64,
    buy: &TokenMetadata,
    doc: &Value,
) -> Result<Quote, QuoteError> {
    if has_flag(doc, "error") {
        tracing::warn!("ParaSwap has no route for {}/{}: {}", intent.sell_token(), intent.buy_token(), doc["error"]);
        return Err(QuoteError::data(messages::NO_LIQUIDITY));
    }

    let route = required(doc, "priceRoute", SERVICE)?;
    let buy_amount = from_base_units(required_number(route, "amount", SERVICE)?, buy.decimals);

    let best = required(route, "bestRoute", SERVICE)?
        .as_array()
        .ok_or_else(|| QuoteError::api(SERVICE, "'bestRoute' is not a list"))?;
    let shares = venue_shares(best.iter().filter_map(|leg| {
        let name = leg.get("exchange")?.as_str()?.to_string();
        Some((name, number(leg.get("percent")?)?))
    }));

    Quote::new(Aggregator::ParaSwap, intent, sell_amount, buy_amount, shares)
}

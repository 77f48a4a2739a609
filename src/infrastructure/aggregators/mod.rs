//! # Aggregator Adapters
//!
//! One module per backend. Each resolves the intent's tokens against the
//! backend's own registry, requests a price and normalizes the answer into a
//! `Quote`. Token registries are fetched on every call; nothing is cached, so
//! a registry update upstream is visible on the next request.

mod dexag;
mod oneinch;
mod paraswap;
mod zerox;

use serde_json::Value;

use crate::domain::config::AggregatorsConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;
use crate::domain::types::{Aggregator, Quote, TokenMetadata, TradeIntent, VenueShare};

/// Quote the intent on the selected backend.
pub async fn quote(
    aggregator: Aggregator,
    endpoints: &AggregatorsConfig,
    http: &dyn JsonFetcher,
    intent: &TradeIntent,
) -> Result<Quote, QuoteError> {
    let endpoint = endpoints.endpoint(aggregator);
    match aggregator {
        Aggregator::DexAg => dexag::quote(endpoint, http, intent).await,
        Aggregator::OneInch => oneinch::quote(endpoint, http, intent).await,
        Aggregator::ParaSwap => paraswap::quote(endpoint, http, intent).await,
        Aggregator::ZeroX => zerox::quote(endpoint, http, intent).await,
    }
}

/// Reads a JSON number, or a string holding one (several APIs quote big
/// integers as strings).
fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Fetches `key` from an object, treating absence as a broken envelope.
fn required<'a>(doc: &'a Value, key: &str, service: &str) -> Result<&'a Value, QuoteError> {
    doc.get(key)
        .filter(|v| !v.is_null())
        .ok_or_else(|| QuoteError::api(service, format!("Response is missing '{}'", key)))
}

fn required_number(doc: &Value, key: &str, service: &str) -> Result<f64, QuoteError> {
    number(required(doc, key, service)?)
        .ok_or_else(|| QuoteError::api(service, format!("'{}' is not a number", key)))
}

/// Whether an upstream error marker is set (`"error": null` and `false` are not).
fn has_flag(doc: &Value, key: &str) -> bool {
    match doc.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Human amount to on-chain integer units, as a decimal string.
fn to_base_units(amount: f64, decimals: u32) -> String {
    format!("{:.0}", (amount * 10f64.powi(decimals as i32)).round())
}

/// On-chain integer units to a human amount.
fn from_base_units(raw: f64, decimals: u32) -> f64 {
    raw / 10f64.powi(decimals as i32)
}

/// Keeps upstream order and drops venues with no share.
fn venue_shares<I>(entries: I) -> Vec<VenueShare>
where
    I: IntoIterator<Item = (String, f64)>,
{
    entries
        .into_iter()
        .filter(|(_, percent)| *percent != 0.0)
        .map(|(venue, percent)| VenueShare { venue, percent })
        .collect()
}

/// Largest scale any ERC-20 can express (10^77 < 2^256).
const MAX_DECIMALS: u32 = 77;

fn checked_decimals(raw: f64, service: &str) -> Result<u32, QuoteError> {
    if raw.fract() == 0.0 && (0.0..=MAX_DECIMALS as f64).contains(&raw) {
        Ok(raw as u32)
    } else {
        Err(QuoteError::api(service, format!("Bad decimals in registry: {}", raw)))
    }
}

/// Reads a registry entry as `(symbol, metadata)`. Entries without a symbol
/// or decimals are skipped; out-of-range decimals only fail a lookup that
/// actually needs that token.
fn token_entry(
    symbol_hint: Option<&str>,
    entry: &Value,
    service: &str,
) -> Option<(String, Result<TokenMetadata, QuoteError>)> {
    let symbol = entry
        .get("symbol")
        .and_then(Value::as_str)
        .or(symbol_hint)?
        .to_string();
    let decimals = entry.get("decimals").and_then(number)?;
    let address = entry
        .get("address")
        .and_then(Value::as_str)
        .map(str::to_string);

    let metadata = checked_decimals(decimals, service).map(|decimals| TokenMetadata {
        symbol: symbol.clone(),
        address,
        decimals,
    });
    Some((symbol, metadata))
}

/// Finds both sides of the intent in a registry listing (case-insensitive).
fn resolve_pair<I>(tokens: I, intent: &TradeIntent) -> Result<(TokenMetadata, TokenMetadata), QuoteError>
where
    I: IntoIterator<Item = (String, Result<TokenMetadata, QuoteError>)>,
{
    let mut sell = None;
    let mut buy = None;
    for (symbol, token) in tokens {
        let symbol = symbol.to_uppercase();
        if sell.is_none() && symbol == intent.sell_token() {
            sell = Some(token?);
        } else if buy.is_none() && symbol == intent.buy_token() {
            buy = Some(token?);
        }
        if sell.is_some() && buy.is_some() {
            break;
        }
    }

    match (sell, buy) {
        (Some(sell), Some(buy)) => Ok((sell, buy)),
        _ => Err(QuoteError::token_not_found()),
    }
}

/// Registry shaped as `{ "<list_key>": [ {symbol, address, decimals}, ... ] }`.
fn resolve_from_list(
    doc: &Value,
    list_key: &str,
    service: &str,
    intent: &TradeIntent,
) -> Result<(TokenMetadata, TokenMetadata), QuoteError> {
    let list = required(doc, list_key, service)?
        .as_array()
        .ok_or_else(|| QuoteError::api(service, format!("'{}' is not a list", list_key)))?;
    resolve_pair(
        list.iter().filter_map(|entry| token_entry(None, entry, service)),
        intent,
    )
}

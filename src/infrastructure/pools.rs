//! # Pools Analytics Client
//!
//! Blocklytics pools API: exchange listings and per-pool annualized returns.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::config::PoolsConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;
use crate::domain::types::{AnnualizedReturns, PoolExchange};
use crate::strings::messages;

const SERVICE: &str = "pools";

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, QuoteError> {
    serde_json::from_value(value)
        .map_err(|e| QuoteError::api(SERVICE, format!("Failed to decode response: {}", e)))
}

fn key_params(config: &PoolsConfig) -> Vec<(&'static str, String)> {
    config.key().map(|k| vec![("key", k)]).unwrap_or_default()
}

async fn exchanges(
    config: &PoolsConfig,
    http: &dyn JsonFetcher,
    params: &[(&str, String)],
) -> Result<Vec<PoolExchange>, QuoteError> {
    let mut doc = http.get_json(&config.exchanges_url, params).await?;
    let rows = match doc.get_mut("results").map(Value::take) {
        Some(Value::Array(rows)) => rows,
        Some(_) => return Err(QuoteError::api(SERVICE, "'results' is not a list")),
        None => return Err(QuoteError::api(SERVICE, "Response is missing 'results'")),
    };

    // A malformed row only costs that pool
    Ok(rows
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<PoolExchange>(row) {
            Ok(pool) => Some(pool),
            Err(e) => {
                tracing::warn!("Skipping unreadable pool row: {}", e);
                None
            }
        })
        .collect())
}

/// First pool whose token symbol matches, case-insensitively.
pub async fn find_pool(
    config: &PoolsConfig,
    http: &dyn JsonFetcher,
    symbol: &str,
) -> Result<PoolExchange, QuoteError> {
    let params = key_params(config);
    exchanges(config, http, &params)
        .await?
        .into_iter()
        .find(|pool| {
            pool.token_symbol
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(symbol))
        })
        .ok_or_else(|| QuoteError::data(messages::POOL_NOT_FOUND))
}

/// Annualized returns of the pool at `address`, looking back `days`.
pub async fn annualized_returns(
    config: &PoolsConfig,
    http: &dyn JsonFetcher,
    address: &str,
    days: u32,
) -> Result<AnnualizedReturns, QuoteError> {
    let url = format!("{}/{}", config.returns_url.trim_end_matches('/'), address);
    let mut params = key_params(config);
    params.push(("daysBack", days.to_string()));

    // The API answers with a (possibly empty) list
    match http.get_json(&url, &params).await? {
        Value::Array(mut rows) if !rows.is_empty() => decode(rows.swap_remove(0)),
        Value::Array(_) => Ok(AnnualizedReturns::default()),
        other => decode(other),
    }
}

/// Deepest pools by USD liquidity.
pub async fn deepest(
    config: &PoolsConfig,
    http: &dyn JsonFetcher,
    limit: usize,
) -> Result<Vec<PoolExchange>, QuoteError> {
    let mut params = vec![
        ("limit", limit.to_string()),
        ("orderBy", "usdLiquidity".to_string()),
        ("direction", "desc".to_string()),
    ];
    params.extend(key_params(config));
    exchanges(config, http, &params).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::FakeFetcher;
    use serde_json::json;

    fn config() -> PoolsConfig {
        PoolsConfig {
            api_key: Some("k".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_find_pool_matches_symbol_case_insensitively() {
        let c = config();
        let f = FakeFetcher::new().with(
            &c.exchanges_url,
            json!({"results": [
                {"platform": "uniswap", "tokenSymbol": "MKR", "exchange": "0x1", "usdLiquidity": 10.0},
                {"platform": "uniswap", "tokenSymbol": "DAI", "exchange": "0x2", "usdLiquidity": 20.0},
            ]}),
        );
        let pool = find_pool(&c, &f, "dai").await.unwrap();
        assert_eq!(pool.exchange.as_deref(), Some("0x2"));
        assert!(f.params_of(&c.exchanges_url).contains(&("key".to_string(), "k".to_string())));

        let err = find_pool(&c, &f, "xyz").await.unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
    }

    #[tokio::test]
    async fn test_annualized_returns_takes_first_row_or_defaults() {
        let c = config();
        let url = format!("{}/0x2", c.returns_url);
        let f = FakeFetcher::new().with(&url, json!([{"D7_net_annualized": 4.2}]));
        let r = annualized_returns(&c, &f, "0x2", 7).await.unwrap();
        assert_eq!(r.d7, Some(4.2));
        assert_eq!(r.d30, None);
        assert!(f.params_of(&url).contains(&("daysBack".to_string(), "7".to_string())));

        let f = FakeFetcher::new().with(&url, json!([]));
        let r = annualized_returns(&c, &f, "0x2", 1).await.unwrap();
        assert!(r.d7.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_row_does_not_hide_other_pools() {
        let c = config();
        let f = FakeFetcher::new().with(
            &c.exchanges_url,
            json!({"results": [
                {"platform": null, "tokenSymbol": "MKR", "exchange": "0x1", "usdLiquidity": null},
                {"platform": "uniswap", "tokenSymbol": "DAI", "exchange": "0x2", "usdLiquidity": 20.0},
            ]}),
        );
        let pool = find_pool(&c, &f, "dai").await.unwrap();
        assert_eq!(pool.exchange.as_deref(), Some("0x2"));

        let pools = deepest(&c, &f, 5).await.unwrap();
        assert_eq!(pools.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_results_is_api_error() {
        let c = config();
        let f = FakeFetcher::new().with(&c.exchanges_url, json!({"code": 5}));
        let err = deepest(&c, &f, 5).await.unwrap_err();
        assert!(err.should_escalate());
    }
}

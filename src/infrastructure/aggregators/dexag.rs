//! dex.ag provider
//!
//! Symbols are resolved server-side, so there is no registry call. The price
//! endpoint accepts either side's amount and answers with a ratio to apply to
//! the known side, plus a `liquidity` map of venue percentages.

use serde_json::Value;

use super::{has_flag, number, required_number, venue_shares};
use crate::domain::config::EndpointConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::JsonFetcher;
use crate::domain::types::{Aggregator, Quote, TradeAmount, TradeIntent};

const SERVICE: &str = "dexag";

pub async fn quote(
    endpoint: &EndpointConfig,
    http: &dyn JsonFetcher,
    intent: &TradeIntent,
) -> Result<Quote, QuoteError> {
    let params = price_request(intent);
    let doc = http.get_json(&endpoint.offer, &params).await?;
    normalize(intent, &doc)
}

fn price_request(intent: &TradeIntent) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("from", intent.sell_token().to_string()),
        ("to", intent.buy_token().to_string()),
        ("dex", "ag".to_string()),
    ];
    match intent.amount() {
        TradeAmount::Sell(v) => params.push(("fromAmount", v.to_string())),
        TradeAmount::Buy(v) => params.push(("toAmount", v.to_string())),
    }
    params
}

fn normalize(intent: &TradeIntent, doc: &Value) -> Result<Quote, QuoteError> {
    if has_flag(doc, "error") {
        tracing::warn!("dex.ag rejected {}/{}: {}", intent.sell_token(), intent.buy_token(), doc["error"]);
        return Err(QuoteError::token_not_found());
    }

    let price = required_number(doc, "price", SERVICE)?;
    let (sell_amount, buy_amount) = match intent.amount() {
        TradeAmount::Sell(sell) => (sell, sell * price),
        TradeAmount::Buy(buy) => (buy * price, buy),
    };

    let shares = doc
        .get("liquidity")
        .and_then(Value::as_object)
        .map(|venues| {
            venue_shares(
                venues
                    .iter()
                    .filter_map(|(name, pct)| number(pct).map(|p| (name.clone(), p))),
            )
        })
        .unwrap_or_default();

    Quote::new(Aggregator::DexAg, intent, sell_amount, buy_amount, shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::AggregatorsConfig;
    use crate::infrastructure::testing::FakeFetcher;
    use serde_json::json;

    fn endpoint() -> EndpointConfig {
        AggregatorsConfig::default().dexag
    }

    #[tokio::test]
    async fn test_sell_side_price_ratio() {
        let fetcher = FakeFetcher::new().with(
            &endpoint().offer,
            json!({"price": "200.5", "liquidity": {"Uniswap": 60, "Balancer": 0, "Curve": 40}}),
        );
        let intent = TradeIntent::new("ETH", "DAI", TradeAmount::Sell(1.0)).unwrap();

        let q = quote(&endpoint(), &fetcher, &intent).await.unwrap();
        assert_eq!(q.sell_amount, 1.0);
        assert_eq!(q.buy_amount, 200.5);
        assert_eq!(q.rate, 200.5);
        let shares: Vec<(&str, f64)> = q
            .venue_shares
            .iter()
            .map(|s| (s.venue.as_str(), s.percent))
            .collect();
        assert_eq!(shares, vec![("Uniswap", 60.0), ("Curve", 40.0)]);

        let params = fetcher.params_of(&endpoint().offer);
        assert!(params.contains(&("fromAmount".to_string(), "1".to_string())));
        assert!(params.contains(&("dex".to_string(), "ag".to_string())));
    }

    #[tokio::test]
    async fn test_buy_side_multiplies_receive_amount() {
        let fetcher = FakeFetcher::new().with(&endpoint().offer, json!({"price": 150, "liquidity": {}}));
        let intent = TradeIntent::new("DAI", "ETH", TradeAmount::Buy(2.0)).unwrap();

        let q = quote(&endpoint(), &fetcher, &intent).await.unwrap();
        assert_eq!(q.sell_amount, 300.0);
        assert_eq!(q.buy_amount, 2.0);
        assert!((q.rate - 2.0 / 300.0).abs() < 1e-15);
        assert!(fetcher
            .params_of(&endpoint().offer)
            .contains(&("toAmount".to_string(), "2".to_string())));
    }

    #[tokio::test]
    async fn test_error_field_is_token_not_found() {
        let fetcher = FakeFetcher::new().with(&endpoint().offer, json!({"error": "Unknown token FOO"}));
        let intent = TradeIntent::new("ETH", "FOO", TradeAmount::Sell(1.0)).unwrap();
        let err = quote(&endpoint(), &fetcher, &intent).await.unwrap_err();
        assert_eq!(err, QuoteError::token_not_found());
    }

    #[tokio::test]
    async fn test_missing_price_is_api_error() {
        let fetcher = FakeFetcher::new().with(&endpoint().offer, json!({"liquidity": {}}));
        let intent = TradeIntent::new("ETH", "DAI", TradeAmount::Sell(1.0)).unwrap();
        let err = quote(&endpoint(), &fetcher, &intent).await.unwrap_err();
        assert!(err.should_escalate());
    }

    #[tokio::test]
    async fn test_zero_price_is_no_liquidity() {
        let fetcher = FakeFetcher::new().with(&endpoint().offer, json!({"price": "0"}));
        let intent = TradeIntent::new("ETH", "DAI", TradeAmount::Sell(1.0)).unwrap();
        let err = quote(&endpoint(), &fetcher, &intent).await.unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
    }
}

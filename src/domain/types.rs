//! # Domain Types
//!
//! Trade intents, normalized quotes and the closed set of aggregators.

use crate::domain::errors::QuoteError;
use serde::Deserialize;

/// The aggregator backends the bot can quote from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregator {
    DexAg,
    OneInch,
    ParaSwap,
    ZeroX,
}

impl Aggregator {
    pub const ALL: [Aggregator; 4] = [
        Aggregator::DexAg,
        Aggregator::OneInch,
        Aggregator::ParaSwap,
        Aggregator::ZeroX,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregator::DexAg => "dexag",
            Aggregator::OneInch => "oneinch",
            Aggregator::ParaSwap => "paraswap",
            Aggregator::ZeroX => "zerox",
        }
    }

    /// Chat command name, without the prefix.
    pub fn command(&self) -> &'static str {
        match self {
            Aggregator::DexAg => "dexag",
            Aggregator::OneInch => "1inch",
            Aggregator::ParaSwap => "paraswap",
            Aggregator::ZeroX => "0x",
        }
    }

    /// Accepts the chat command or the config key (`1inch` or `oneinch`).
    pub fn from_command(cmd: &str) -> Option<Self> {
        let cmd = cmd.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|a| a.command() == cmd || a.as_str() == cmd)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Aggregator::DexAg => "DEX.AG",
            Aggregator::OneInch => "1inch",
            Aggregator::ParaSwap => "ParaSwap",
            Aggregator::ZeroX => "0x",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Aggregator::DexAg => "🍇",
            Aggregator::OneInch => "🏴‍☠️",
            Aggregator::ParaSwap => "🔷",
            Aggregator::ZeroX => "⚫",
        }
    }

    /// Whether the backend accepts a receive-side amount ("spend X to get 2 Y").
    pub fn allows_buy_amount(&self) -> bool {
        match self {
            Aggregator::DexAg | Aggregator::ZeroX => true,
            Aggregator::OneInch | Aggregator::ParaSwap => false,
        }
    }

    /// Token sold when the user only names what they want to buy.
    pub fn default_sell_token(&self) -> &'static str {
        match self {
            Aggregator::ZeroX => "WETH",
            _ => "ETH",
        }
    }
}

/// Which side of the trade the user fixed an amount for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeAmount {
    Sell(f64),
    Buy(f64),
}

/// A parsed order: what to give up, what to get, and one fixed amount.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeIntent {
    sell_token: String,
    buy_token: String,
    amount: TradeAmount,
}

impl TradeIntent {
    pub fn new(sell_token: &str, buy_token: &str, amount: TradeAmount) -> Result<Self, QuoteError> {
        let sell_token = sell_token.to_uppercase();
        let buy_token = buy_token.to_uppercase();

        let value = match amount {
            TradeAmount::Sell(v) | TradeAmount::Buy(v) => v,
        };
        if !value.is_finite() || value <= 0.0 {
            return Err(QuoteError::data(crate::strings::messages::AMOUNT_NOT_POSITIVE));
        }
        if sell_token == buy_token {
            return Err(QuoteError::data(crate::strings::messages::INVALID_TOKEN_PAIR));
        }

        Ok(Self {
            sell_token,
            buy_token,
            amount,
        })
    }

    pub fn sell_token(&self) -> &str {
        &self.sell_token
    }

    pub fn buy_token(&self) -> &str {
        &self.buy_token
    }

    pub fn amount(&self) -> TradeAmount {
        self.amount
    }

    pub fn sell_amount(&self) -> Option<f64> {
        match self.amount {
            TradeAmount::Sell(v) => Some(v),
            TradeAmount::Buy(_) => None,
        }
    }
}

/// Percentage of the trade routed through one venue.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueShare {
    pub venue: String,
    pub percent: f64,
}

/// A normalized aggregator offer. Both amounts are in human units.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub source: Aggregator,
    pub sell_token: String,
    pub buy_token: String,
    pub sell_amount: f64,
    pub buy_amount: f64,
    pub rate: f64,
    pub venue_shares: Vec<VenueShare>,
}

impl Quote {
    /// Builds a quote from both trade legs. The rate is always derived as
    /// buy per sell; a zero or non-finite leg means the backend had no
    /// liquidity for the pair.
    pub fn new(
        source: Aggregator,
        intent: &TradeIntent,
        sell_amount: f64,
        buy_amount: f64,
        venue_shares: Vec<VenueShare>,
    ) -> Result<Self, QuoteError> {
        if !(sell_amount.is_finite() && buy_amount.is_finite())
            || sell_amount <= 0.0
            || buy_amount <= 0.0
        {
            return Err(QuoteError::data(crate::strings::messages::NO_LIQUIDITY));
        }

        Ok(Self {
            source,
            sell_token: intent.sell_token().to_string(),
            buy_token: intent.buy_token().to_string(),
            sell_amount,
            buy_amount,
            rate: buy_amount / sell_amount,
            venue_shares,
        })
    }
}

/// Token entry from an aggregator's registry.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMetadata {
    pub symbol: String,
    pub address: Option<String>,
    pub decimals: u32,
}

/// One liquidity pool as listed by the pools analytics API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolExchange {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub base_symbol: Option<String>,
    #[serde(default)]
    pub token_symbol: Option<String>,
    #[serde(default)]
    pub token_name: Option<String>,
    /// Pool contract address.
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub usd_liquidity: f64,
    #[serde(default)]
    pub usd_volume: Option<f64>,
    #[serde(default)]
    pub usd_price: Option<f64>,
}

/// Net annualized returns of a pool, in percent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnnualizedReturns {
    #[serde(rename = "D7_net_annualized", default)]
    pub d7: Option<f64>,
    #[serde(rename = "D30_net_annualized", default)]
    pub d30: Option<f64>,
    #[serde(rename = "D90_net_annualized", default)]
    pub d90: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_uppercases_and_exposes_one_side() {
        let intent = TradeIntent::new("rep", "dai", TradeAmount::Buy(2.0)).unwrap();
        assert_eq!(intent.sell_token(), "REP");
        assert_eq!(intent.buy_token(), "DAI");
        assert_eq!(intent.sell_amount(), None);
        assert_eq!(intent.amount(), TradeAmount::Buy(2.0));
    }

    #[test]
    fn test_intent_rejects_bad_values() {
        assert!(matches!(
            TradeIntent::new("ETH", "eth", TradeAmount::Sell(1.0)),
            Err(QuoteError::Data(_))
        ));
        assert!(matches!(
            TradeIntent::new("ETH", "DAI", TradeAmount::Sell(0.0)),
            Err(QuoteError::Data(_))
        ));
        assert!(matches!(
            TradeIntent::new("ETH", "DAI", TradeAmount::Buy(f64::INFINITY)),
            Err(QuoteError::Data(_))
        ));
    }

    #[test]
    fn test_quote_rate_is_buy_per_sell() {
        let intent = TradeIntent::new("DAI", "ETH", TradeAmount::Buy(2.0)).unwrap();
        let quote = Quote::new(Aggregator::ZeroX, &intent, 400.0, 2.0, vec![]).unwrap();
        assert_eq!(quote.rate, 0.005);
    }

    #[test]
    fn test_quote_with_zero_receive_is_no_liquidity() {
        let intent = TradeIntent::new("ETH", "DAI", TradeAmount::Sell(1.0)).unwrap();
        let err = Quote::new(Aggregator::OneInch, &intent, 1.0, 0.0, vec![]).unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
    }

    #[test]
    fn test_aggregator_capabilities() {
        assert!(Aggregator::DexAg.allows_buy_amount());
        assert!(Aggregator::ZeroX.allows_buy_amount());
        assert!(!Aggregator::OneInch.allows_buy_amount());
        assert!(!Aggregator::ParaSwap.allows_buy_amount());
        assert_eq!(Aggregator::ZeroX.default_sell_token(), "WETH");
        assert_eq!(Aggregator::from_command("1INCH"), Some(Aggregator::OneInch));
        assert_eq!(Aggregator::from_command("uniswap"), None);
    }
}

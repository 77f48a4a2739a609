//! # Order Parser
//!
//! Turns the whitespace-split arguments of a quote command into a `TradeIntent`.
//!
//! Each argument is classified as a number (`N`) or a token symbol (`S`) and
//! the resulting signature picks one of the recognized order shapes:
//!
//! | Signature | Example        | Meaning                              |
//! |-----------|----------------|--------------------------------------|
//! | `S`       | `DAI`          | sell 1 of the default token for DAI  |
//! | `S S`     | `REP DAI`      | sell 1 REP for DAI                   |
//! | `N S`     | `2 DAI`        | sell 2 of the default token for DAI  |
//! | `N S S`   | `2 REP DAI`    | sell 2 REP for DAI                   |
//! | `S N S`   | `DAI 2 ETH`    | spend DAI to receive 2 ETH           |
//!
//! The last shape fixes the receive side and is only accepted by backends
//! that can quote that direction.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::errors::QuoteError;
use crate::domain::types::{TradeAmount, TradeIntent};
use crate::strings::messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKind {
    Numeric,
    Symbolic,
}

fn numeric_regex() -> &'static Regex {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    NUMERIC.get_or_init(|| {
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("static regex")
    })
}

/// Classifies one argument.
///
/// Numeric means a plain decimal with an optional sign and an optional
/// exponent (`2`, `-1`, `+0.5`, `.5`, `1e3`). Everything else is a symbol,
/// including `inf`, `nan`, hex literals and `1_000`, since none of those
/// is a usable trade amount.
pub fn classify(arg: &str) -> ArgKind {
    if numeric_regex().is_match(arg) {
        ArgKind::Numeric
    } else {
        ArgKind::Symbolic
    }
}

/// Signature string over `{N, S}` for the given arguments.
pub fn signature(args: &[String]) -> String {
    args.iter()
        .map(|arg| match classify(arg) {
            ArgKind::Numeric => 'N',
            ArgKind::Symbolic => 'S',
        })
        .collect()
}

/// Parses the command arguments into a trade intent.
///
/// Unknown shapes (and the receive-side shape when `allow_amount_as_buy_side`
/// is off) are format errors. A recognized shape with a non-positive amount
/// or identical tokens is a data error.
pub fn parse(
    args: &[String],
    allow_amount_as_buy_side: bool,
    default_sell_token: &str,
) -> Result<TradeIntent, QuoteError> {
    let sig = signature(args);

    let (sell_token, buy_token, amount) = match sig.as_str() {
        "S" => (default_sell_token, args[0].as_str(), None),
        "SS" => (args[0].as_str(), args[1].as_str(), None),
        "NS" => (default_sell_token, args[1].as_str(), Some((args[0].as_str(), false))),
        "NSS" => (args[1].as_str(), args[2].as_str(), Some((args[0].as_str(), false))),
        "SNS" if allow_amount_as_buy_side => {
            (args[0].as_str(), args[2].as_str(), Some((args[1].as_str(), true)))
        }
        _ => {
            tracing::debug!("Rejected order signature '{}' for {:?}", sig, args);
            return Err(QuoteError::format(messages::FORMAT_NOT_SUPPORTED));
        }
    };

    let amount = match amount {
        None => TradeAmount::Sell(1.0),
        Some((raw, buy_side)) => {
            // The regex guarantees a parseable literal; overflow yields inf.
            let value: f64 = raw
                .parse()
                .map_err(|_| QuoteError::data(messages::AMOUNT_NOT_POSITIVE))?;
            if buy_side {
                TradeAmount::Buy(value)
            } else {
                TradeAmount::Sell(value)
            }
        }
    };

    TradeIntent::new(sell_token, buy_token, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_classify_edge_cases() {
        for n in ["2", "-1", "+0.5", ".5", "1.", "1e3", "2.5E-2", "0"] {
            assert_eq!(classify(n), ArgKind::Numeric, "{n}");
        }
        for s in ["DAI", "inf", "NaN", "infinity", "0x", "1_000", "1e", "--1", " 1", ""] {
            assert_eq!(classify(s), ArgKind::Symbolic, "{s}");
        }
    }

    #[test]
    fn test_single_symbol_buys_with_one_default() {
        let intent = parse(&args(&["dai"]), false, "ETH").unwrap();
        assert_eq!(intent.sell_token(), "ETH");
        assert_eq!(intent.buy_token(), "DAI");
        assert_eq!(intent.amount(), TradeAmount::Sell(1.0));
    }

    #[test]
    fn test_recognized_shapes() {
        let intent = parse(&args(&["REP", "DAI"]), false, "ETH").unwrap();
        assert_eq!((intent.sell_token(), intent.buy_token()), ("REP", "DAI"));
        assert_eq!(intent.sell_amount(), Some(1.0));

        let intent = parse(&args(&["2", "DAI"]), false, "WETH").unwrap();
        assert_eq!((intent.sell_token(), intent.buy_token()), ("WETH", "DAI"));
        assert_eq!(intent.sell_amount(), Some(2.0));

        let intent = parse(&args(&["2.5", "rep", "dai"]), false, "ETH").unwrap();
        assert_eq!((intent.sell_token(), intent.buy_token()), ("REP", "DAI"));
        assert_eq!(intent.sell_amount(), Some(2.5));

        let intent = parse(&args(&["DAI", "2", "ETH"]), true, "ETH").unwrap();
        assert_eq!((intent.sell_token(), intent.buy_token()), ("DAI", "ETH"));
        assert_eq!(intent.sell_amount(), None);
        assert_eq!(intent.amount(), TradeAmount::Buy(2.0));
    }

    #[test]
    fn test_receive_side_needs_capability() {
        let err = parse(&args(&["DAI", "2", "ETH"]), false, "ETH").unwrap_err();
        assert!(matches!(err, QuoteError::Format(_)));
    }

    #[test]
    fn test_unknown_shapes_are_format_errors() {
        for list in [
            vec![],
            vec!["2"],
            vec!["DAI", "2"],
            vec!["2", "3", "DAI"],
            vec!["A", "B", "C"],
            vec!["1", "A", "B", "C"],
        ] {
            let err = parse(&args(&list), true, "ETH").unwrap_err();
            assert!(matches!(err, QuoteError::Format(_)), "{list:?}");
        }
    }

    #[test]
    fn test_non_positive_amount_is_data_error() {
        for list in [vec!["-1", "DAI"], vec!["0", "DAI"], vec!["0", "REP", "DAI"]] {
            let err = parse(&args(&list), false, "ETH").unwrap_err();
            assert!(matches!(err, QuoteError::Data(_)), "{list:?}");
        }
        let err = parse(&args(&["DAI", "-2", "ETH"]), true, "ETH").unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
        let err = parse(&args(&["1e999", "DAI"]), false, "ETH").unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
    }

    #[test]
    fn test_same_token_is_data_error_for_every_shape() {
        for list in [
            vec!["eth"],
            vec!["dai", "DAI"],
            vec!["3", "Eth"],
            vec!["3", "dai", "Dai"],
        ] {
            let err = parse(&args(&list), false, "ETH").unwrap_err();
            assert!(matches!(err, QuoteError::Data(_)), "{list:?}");
        }
        let err = parse(&args(&["mkr", "1", "MKR"]), true, "ETH").unwrap_err();
        assert!(matches!(err, QuoteError::Data(_)));
    }
}

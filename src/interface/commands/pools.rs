//! # Pools Commands
//!
//! Handles `.pools TOKEN [DAYS]` and `.deepest`.

use crate::application::pool_formatter::{format_annualized_returns, format_deepest};
use crate::domain::config::PoolsConfig;
use crate::domain::errors::QuoteError;
use crate::domain::traits::{ChatProvider, JsonFetcher};
use crate::infrastructure::pools;
use crate::strings::messages;
use anyhow::Result;

const DEEPEST_LIMIT: usize = 5;

fn parse_days(raw: &str) -> Result<u32, QuoteError> {
    raw.parse::<u32>()
        .ok()
        .filter(|days| *days > 0)
        .ok_or_else(|| QuoteError::format(messages::POOLS_DAYS_INVALID))
}

pub async fn handle_pools(
    config: &PoolsConfig,
    http: &dyn JsonFetcher,
    chat: &impl ChatProvider,
    args: &[String],
) -> Result<()> {
    let (symbol, days) = match args {
        [symbol] => (symbol, 1),
        [symbol, days] => (symbol, parse_days(days)?),
        _ => return Err(QuoteError::format(messages::POOLS_USAGE).into()),
    };

    let pool = pools::find_pool(config, http, symbol).await?;
    let address = pool
        .exchange
        .clone()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| QuoteError::data(messages::POOL_NOT_FOUND))?;
    let returns = pools::annualized_returns(config, http, &address, days).await?;

    let msg = format!(
        "{}\n[pools.fyi]({}/#/returns/{})",
        format_annualized_returns(&pool, &returns),
        config.site.trim_end_matches('/'),
        address
    );
    chat.send_message(&msg).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

pub async fn handle_deepest(
    config: &PoolsConfig,
    http: &dyn JsonFetcher,
    chat: &impl ChatProvider,
) -> Result<()> {
    let deepest = pools::deepest(config, http, DEEPEST_LIMIT).await?;
    let msg = format!("{}\n[pools.fyi]({})", format_deepest(&deepest), config.site);
    chat.send_message(&msg).await.map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_must_be_positive_integer() {
        assert_eq!(parse_days("30"), Ok(30));
        assert!(matches!(parse_days("0"), Err(QuoteError::Format(_))));
        assert!(matches!(parse_days("-3"), Err(QuoteError::Format(_))));
        assert!(matches!(parse_days("1.5"), Err(QuoteError::Format(_))));
    }
}

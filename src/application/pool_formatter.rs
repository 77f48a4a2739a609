//! # Pool Formatter
//!
//! Markdown rendering for the `.pools` and `.deepest` commands.

use crate::application::numbers::{to_emoji, to_metric_prefix};
use crate::domain::types::{AnnualizedReturns, PoolExchange};

const SIG_FIGS: u32 = 4;

fn platform_emoji(platform: &str) -> &'static str {
    match platform.to_lowercase().as_str() {
        "uniswap" => "🦄",
        "bancor" => "☝️",
        _ => "💧",
    }
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn usd(value: Option<f64>) -> String {
    value
        .map(|v| format!("${}", to_metric_prefix(v, SIG_FIGS)))
        .unwrap_or_else(|| "n/a".to_string())
}

fn token_label(pool: &PoolExchange) -> &str {
    pool.token_symbol
        .as_deref()
        .or(pool.token_name.as_deref())
        .unwrap_or("???")
}

pub fn format_annualized_returns(pool: &PoolExchange, returns: &AnnualizedReturns) -> String {
    let base = pool.base_symbol.as_deref().unwrap_or("ETH");
    let mut msg = format!(
        "**{} {}-{} {} Pool**\nLiquidity: **{}**\nVolume (24h): **{}**\nPrice: **{}**\n\nAnnualized returns in ETH, if you joined:\n",
        platform_emoji(&pool.platform),
        base,
        token_label(pool),
        capitalize(&pool.platform),
        usd(Some(pool.usd_liquidity)),
        usd(pool.usd_volume),
        usd(pool.usd_price),
    );

    for (days, value) in [(7, returns.d7), (30, returns.d30), (90, returns.d90)] {
        let shown = match value {
            Some(v) => format!("{:.1}% {}", v, to_emoji(v)),
            None => "n/a".to_string(),
        };
        msg.push_str(&format!("  • {} days ago: **{}**\n", days, shown));
    }

    msg
}

/// Fixed-width table of the deepest pools. All columns are left-aligned
/// except liquidity, which is right-aligned.
pub fn format_deepest(pools: &[PoolExchange]) -> String {
    let names: Vec<String> = pools
        .iter()
        .map(|p| {
            format!(
                "{} {}-{}",
                capitalize(&p.platform),
                p.base_symbol.as_deref().unwrap_or("ETH"),
                token_label(p)
            )
        })
        .collect();
    let liquidities: Vec<String> = pools
        .iter()
        .map(|p| format!("${}", to_metric_prefix(p.usd_liquidity, SIG_FIGS)))
        .collect();

    let num_w = pools.len().to_string().len().max(1);
    let pool_w = names.iter().map(|n| n.chars().count()).max().unwrap_or(0).max("POOL".len());
    // `$` is not counted against the header
    let liq_w = liquidities.iter().map(|l| l.len()).max().unwrap_or(0).max("LIQ".len() + 1);

    let mut table = format!("{:<num_w$} {:<pool_w$} {:>liq_w$}\n", "#", "POOL", "LIQ");
    for (i, (name, liq)) in names.iter().zip(&liquidities).enumerate() {
        table.push_str(&format!("{:<num_w$} {:<pool_w$} {:>liq_w$}\n", i + 1, name, liq));
    }

    format!("```\n{}```", table)
}

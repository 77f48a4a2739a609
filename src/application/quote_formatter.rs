//! # Quote Formatter
//!
//! Renders a normalized `Quote` as a Markdown chat message. Knows nothing
//! about which backend produced it beyond the source label.

use crate::application::numbers::format_sig;
use crate::domain::types::Quote;

const SIG_FIGS: u32 = 4;

pub fn format_quote(quote: &Quote, site: Option<&str>) -> String {
    let source = quote.source;
    let mut msg = format!(
        "**{} {} price**\nSend: **{} {}**\nReceive: **{} {}**\nRate: **{} {}/{}**\n",
        source.emoji(),
        source.display_name(),
        format_sig(quote.sell_amount, SIG_FIGS),
        quote.sell_token,
        format_sig(quote.buy_amount, SIG_FIGS),
        quote.buy_token,
        format_sig(quote.rate, SIG_FIGS),
        quote.buy_token,
        quote.sell_token,
    );

    if !quote.venue_shares.is_empty() {
        msg.push_str("\nTrade routing\n");
        for share in &quote.venue_shares {
            msg.push_str(&format!(
                "  • {}% {}\n",
                format_sig(share.percent, 3),
                share.venue
            ));
        }
    }

    if let Some(url) = site {
        msg.push_str(&format!("\n[{}]({})", source.display_name(), url));
    }

    msg
}

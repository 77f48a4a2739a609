//! # Messages
//!
//! Contains constant strings and format functions for user-facing messages.
//! Includes error messages, usage hints, and operator notification templates.

use crate::domain::types::Aggregator;

// Quote errors
pub const FORMAT_NOT_SUPPORTED: &str = "Format not supported";
pub const TOKEN_NOT_FOUND: &str = "**Token not found**\nPlease try another symbol.";
pub const AMOUNT_NOT_POSITIVE: &str = "**Amount needs to be positive**";
pub const INVALID_TOKEN_PAIR: &str = "**Invalid token combination**\nBuying and selling token can't be the same.";
pub const NO_LIQUIDITY: &str = "**No liquidity**\nThis pair can't be traded right now, try another symbol.";

// Generic errors
pub const API_UNAVAILABLE: &str = "**API Unavailable**\nPlease try again later.";

// Pools
pub const POOLS_USAGE: &str = "**Please check the formatting.**\nTry it:\n`.pools dai`";
pub const POOLS_DAYS_INVALID: &str = "You must enter an integer for days ago.";
pub const POOL_NOT_FOUND: &str = "**No results found**\nTry a different symbol.";

// Feedback
pub const FEEDBACK_SENT: &str = "**Sent**\nThank you for your feedback!";
pub const FEEDBACK_USAGE: &str = "**How to submit feedback**\n`.feedback your message`";

pub fn quote_usage(aggregator: Aggregator) -> String {
    let cmd = aggregator.command();
    let mut usage = format!(
        "**Please check the formatting.**\nTry it:\n`.{cmd} DAI`\n`.{cmd} 500 DAI`\n`.{cmd} 500 DAI MKR`"
    );
    if aggregator.allows_buy_amount() {
        usage.push_str(&format!("\n`.{cmd} ETH 1 MKR`"));
    }
    usage
}

pub fn operator_error(at: &str, command: &str, detail: &str) -> String {
    format!("**Beep-Bop, error found!** ({at})\n`{command}`\n```\n{detail}\n```")
}

pub fn operator_feedback(sender: &str, room_id: &str, feedback: &str) -> String {
    format!("**Feedback from {sender}**\nFrom room: {room_id}\n> {feedback}")
}

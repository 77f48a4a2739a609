//! # Application Layer
//!
//! Contains the core business logic and orchestration of the bot.
//! This includes order parsing, quote and pool formatting, command routing and operator logging.

pub mod logging;
pub mod numbers;
pub mod order;
pub mod pool_formatter;
pub mod quote_formatter;
pub mod quotes;
pub mod router;

//! # Infrastructure Layer
//!
//! Handles interactions with external systems and services.
//! Implements the traits defined in the Domain layer (e.g., ChatProvider, JsonFetcher)
//! and the per-backend aggregator and pools clients.

pub mod aggregators;
pub mod http;
pub mod matrix;
pub mod pools;

#[cfg(test)]
pub mod testing;

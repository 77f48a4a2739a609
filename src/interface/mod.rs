//! # Interface Layer
//!
//! Chat-facing command handlers, one module per command family.

pub mod commands;

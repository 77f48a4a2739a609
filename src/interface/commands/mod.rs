//! # Command Handlers
//!
//! Contains specific handler functions for each supported command (e.g., .pools, .0x, .feedback).
//! These handlers are invoked by the Router, which owns the error boundary.

pub mod feedback;
pub mod help;
pub mod pools;
pub mod quote;

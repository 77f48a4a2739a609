//! # Quote Errors
//!
//! The three failure kinds of the quote pipeline. The kind decides how the
//! boundary reacts: format and data problems are the user's to fix, API
//! problems are escalated to the operators.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuoteError {
    /// The argument shape is not one of the recognized orders.
    #[error("{0}")]
    Format(String),

    /// The shape was fine but the request can't be served (unknown token,
    /// equal tokens, non-positive amount, no liquidity).
    #[error("{0}")]
    Data(String),

    /// An upstream service was unreachable or answered with something we
    /// could not read.
    #[error("[{service}] {detail}")]
    Api { service: String, detail: String },
}

impl QuoteError {
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }

    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    pub fn api(service: &str, detail: impl Into<String>) -> Self {
        Self::Api {
            service: service.to_string(),
            detail: detail.into(),
        }
    }

    pub fn token_not_found() -> Self {
        Self::Data(crate::strings::messages::TOKEN_NOT_FOUND.to_string())
    }

    /// Text shown to the chat user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Format(msg) | Self::Data(msg) => msg.clone(),
            Self::Api { .. } => crate::strings::messages::API_UNAVAILABLE.to_string(),
        }
    }

    /// Whether the operators should hear about it.
    pub fn should_escalate(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_api_errors_escalate() {
        assert!(!QuoteError::format("bad").should_escalate());
        assert!(!QuoteError::data("bad").should_escalate());
        assert!(QuoteError::api("0x", "timeout").should_escalate());
    }

    #[test]
    fn test_api_error_hides_detail_from_user() {
        let err = QuoteError::api("paraswap", "HTTP 502: <html>");
        assert_eq!(err.user_message(), crate::strings::messages::API_UNAVAILABLE);
        assert_eq!(err.to_string(), "[paraswap] HTTP 502: <html>");
    }
}

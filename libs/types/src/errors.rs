//! Error types for value construction
//!
//! Raised when external data (feed snapshots, settings, user input) does not
//! satisfy the invariants of the shared value types.

use thiserror::Error;

/// Validation failure for a shared value type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid pair: {0} (expected base-quote)")]
    InvalidPair(String),

    #[error("Invalid side: {0}")]
    InvalidSide(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_price_display() {
        let err = TypeError::InvalidPrice("-1".to_string());
        assert_eq!(err.to_string(), "Invalid price: -1");
    }

    #[test]
    fn test_invalid_pair_display() {
        let err = TypeError::InvalidPair("BTCUSDT".to_string());
        assert!(err.to_string().contains("BTCUSDT"));
        assert!(err.to_string().contains("base-quote"));
    }
}

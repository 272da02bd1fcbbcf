//! Error taxonomy for the trading computation layer

use rust_decimal::Decimal;
use thiserror::Error;
use types::errors::TypeError;

/// Errors surfaced by aggregation, estimation and settings loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeError {
    #[error("Invalid depth: {0} (bucket width must be positive)")]
    InvalidDepth(Decimal),

    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Arithmetic overflow computing {0}")]
    Overflow(&'static str),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Config decode error: {0}")]
    Config(String),

    #[error(transparent)]
    Type(#[from] TypeError),
}

impl From<serde_json::Error> for TradeError {
    fn from(err: serde_json::Error) -> Self {
        TradeError::Config(err.to_string())
    }
}

//! Pair, coin and ticker metadata
//!
//! Mirrors the exchange's public constants and ticker payloads. Absent
//! numeric fields default to zero, except `increment_price` which defaults
//! to one so that depth bucketing always has a non-zero width.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trading pair configuration as published by the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairConfig {
    #[serde(default)]
    pub name: String,
    /// Base asset symbol
    #[serde(default)]
    pub pair_base: Option<String>,
    /// Quote asset symbol
    #[serde(default)]
    pub pair_2: Option<String>,
    #[serde(default)]
    pub increment_size: Decimal,
    /// Price tick; depth buckets are multiples of this.
    #[serde(default = "default_increment_price")]
    pub increment_price: Decimal,
    #[serde(default)]
    pub min_size: Decimal,
    #[serde(default)]
    pub max_size: Decimal,
    #[serde(default)]
    pub min_price: Decimal,
    #[serde(default)]
    pub max_price: Decimal,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_increment_price() -> Decimal {
    Decimal::ONE
}

fn default_active() -> bool {
    true
}

impl Default for PairConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            pair_base: None,
            pair_2: None,
            increment_size: Decimal::ZERO,
            increment_price: default_increment_price(),
            min_size: Decimal::ZERO,
            max_size: Decimal::ZERO,
            min_price: Decimal::ZERO,
            max_price: Decimal::ZERO,
            active: default_active(),
        }
    }
}

/// Coin metadata. `CoinInfo::default()` stands in for unknown coins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinInfo {
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub fullname: String,
    #[serde(default = "default_coin_min")]
    pub min: Decimal,
    #[serde(default)]
    pub max: Decimal,
    #[serde(default = "default_coin_min")]
    pub increment_unit: Decimal,
}

fn default_coin_min() -> Decimal {
    Decimal::new(1, 3)
}

impl Default for CoinInfo {
    fn default() -> Self {
        Self {
            symbol: String::new(),
            fullname: String::new(),
            min: default_coin_min(),
            max: Decimal::ZERO,
            increment_unit: default_coin_min(),
        }
    }
}

/// 24h ticker for a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ticker {
    pub open: Decimal,
    pub close: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub last: Decimal,
    pub volume: Decimal,
}

impl Ticker {
    /// Quote-denominated traded value used to rank markets.
    ///
    /// Saturates at the `Decimal` bounds so extreme tickers still rank.
    pub fn market_cap(&self) -> Decimal {
        self.volume.saturating_mul(self.close)
    }
}

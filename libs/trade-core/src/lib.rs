//! Trade Core: client computation layer
//!
//! Provides deterministic, client-side computation for the trading views:
//! - Order book depth bucketing and cumulative volume
//! - Depth chart series
//! - Walk-the-book market and quick-trade price estimation
//! - Trade history, market price, and per-pair order/trade lists
//! - Market ranking and 24h change
//!
//! # Determinism
//! All functions are pure: no system time, no RNG, no external calls.
//! Uses `Decimal` (fixed-point) and `BTreeMap` (sorted iteration) throughout.

pub mod config;
pub mod error;
pub mod estimate;
pub mod markets;
pub mod orderbook;
pub mod state;
pub mod trades;

pub use config::TradeSettings;
pub use error::TradeError;
pub use state::MarketState;

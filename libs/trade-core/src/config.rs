//! Trading interface settings
//!
//! User interface preferences and view limits that shape the order book
//! and list views. Every field has a default, so a partial (or empty) JSON
//! object is a valid settings document.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::TradeError;

/// Settings for the trading views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeSettings {
    /// Price levels shown per book side after aggregation.
    #[serde(default = "default_order_book_levels")]
    pub order_book_levels: usize,

    /// Bucket width as a multiple of the pair's price increment.
    #[serde(default = "default_depth_level")]
    pub depth_level: u32,

    /// Open orders listed for the current pair.
    #[serde(default = "default_active_orders_limit")]
    pub active_orders_limit: usize,

    /// Own trades listed for the current pair.
    #[serde(default = "default_user_trades_limit")]
    pub user_trades_limit: usize,

    /// Coin used for a pair's base metadata when the pair omits `pair_base`.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
}

impl Default for TradeSettings {
    fn default() -> Self {
        Self {
            order_book_levels: default_order_book_levels(),
            depth_level: default_depth_level(),
            active_orders_limit: default_active_orders_limit(),
            user_trades_limit: default_user_trades_limit(),
            base_currency: default_base_currency(),
        }
    }
}

impl TradeSettings {
    /// Decode settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, TradeError> {
        let settings: TradeSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would produce empty or undefined views.
    pub fn validate(&self) -> Result<(), TradeError> {
        if self.order_book_levels == 0 {
            warn!("Rejecting settings: order_book_levels is zero");
            return Err(TradeError::InvalidSettings(
                "order_book_levels must be at least 1".to_string(),
            ));
        }
        if self.depth_level == 0 {
            warn!("Rejecting settings: depth_level is zero");
            return Err(TradeError::InvalidSettings(
                "depth_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_order_book_levels() -> usize {
    10
}

fn default_depth_level() -> u32 {
    1
}

fn default_active_orders_limit() -> usize {
    50
}

fn default_user_trades_limit() -> usize {
    10
}

fn default_base_currency() -> String {
    "usdt".to_string()
}

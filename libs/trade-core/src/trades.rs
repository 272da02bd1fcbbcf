//! Trade history and per-pair order/trade lists
//!
//! Public trades arrive newest first. The last traded price is the market
//! price, with the chart's last close as a fallback for quiet pairs.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::{OrderId, PairId};
use types::numeric::{Price, Quantity};
use types::order::Side;

/// A public trade from the pair's trade feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicTrade {
    pub price: Price,
    pub size: Quantity,
    pub side: Side,
    pub timestamp: DateTime<Utc>,
}

/// Recent trades for one pair plus the largest size, for bar scaling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeHistory {
    pub data: Vec<PublicTrade>,
    /// `None` when there are no trades.
    pub max_amount: Option<Quantity>,
}

impl TradeHistory {
    pub fn new(trades: &[PublicTrade]) -> Self {
        Self {
            data: trades.to_vec(),
            max_amount: trades.iter().map(|t| t.size).max(),
        }
    }

    /// Newest trade price, falling back to the chart's last close.
    pub fn market_price(&self, chart_close: Option<Price>) -> Option<Price> {
        self.data.first().map(|t| t.price).or(chart_close)
    }
}

/// One of the user's open orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveOrder {
    pub id: OrderId,
    pub symbol: PairId,
    pub side: Side,
    pub price: Price,
    pub size: Quantity,
    #[serde(default)]
    pub filled: Quantity,
    pub created_at: DateTime<Utc>,
}

impl ActiveOrder {
    /// Size still resting on the book.
    pub fn remaining(&self) -> Decimal {
        self.size.as_decimal() - self.filled.as_decimal()
    }
}

/// One of the user's own executions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserTrade {
    pub symbol: PairId,
    pub side: Side,
    pub price: Price,
    pub size: Quantity,
    #[serde(default)]
    pub fee: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Records that belong to a single trading pair.
pub trait PairScoped {
    fn pair(&self) -> &PairId;
}

impl PairScoped for ActiveOrder {
    fn pair(&self) -> &PairId {
        &self.symbol
    }
}

impl PairScoped for UserTrade {
    fn pair(&self) -> &PairId {
        &self.symbol
    }
}

/// First `limit` records for `pair`, in input order.
pub fn first_for_pair<T: PairScoped + Clone>(items: &[T], pair: &PairId, limit: usize) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.pair() == pair)
        .take(limit)
        .cloned()
        .collect()
}

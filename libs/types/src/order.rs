//! Order side and book side
//!
//! A taker walks the opposite side of the book: a buy consumes asks,
//! a sell consumes bids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TypeError;

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Buy order (bid)
    BUY,
    /// Sell order (ask)
    SELL,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::BUY => Side::SELL,
            Side::SELL => Side::BUY,
        }
    }

    /// The side of the book a market order on this side consumes.
    pub fn book_side(&self) -> BookSide {
        match self {
            Side::BUY => BookSide::Asks,
            Side::SELL => BookSide::Bids,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::BUY => write!(f, "buy"),
            Side::SELL => write!(f, "sell"),
        }
    }
}

impl FromStr for Side {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buy" => Ok(Side::BUY),
            "sell" => Ok(Side::SELL),
            _ => Err(TypeError::InvalidSide(s.to_string())),
        }
    }
}

/// One half of an order book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSide {
    /// Sell interest, best (lowest) price first
    Asks,
    /// Buy interest, best (highest) price first
    Bids,
}

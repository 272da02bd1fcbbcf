//! Market price estimation: walk-the-book fills for hypothetical orders
//!
//! A market order consumes the opposite side of the book best price first.
//! The amount can be given as a base-asset size or, for quick trades, as a
//! quote-asset total. All calculations are deterministic fixed-point
//! `Decimal`; levels are taken in the order the feed delivered them.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use types::order::{BookSide, Side};

use crate::error::TradeError;
use crate::orderbook::{sum_order_total, sum_quantities, RawLevel, RawOrderBook};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Display precision for quoted prices and slippage.
const DISPLAY_DP: u32 = 8;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Accumulated result of walking the book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Σ size × price consumed (quote asset)
    pub value: Decimal,
    /// Σ size consumed (base asset)
    pub size: Decimal,
}

impl Fill {
    /// Volume-weighted average price, zero for an empty fill.
    pub fn average_price(&self) -> Decimal {
        if self.size.is_zero() {
            Decimal::ZERO
        } else {
            // bounded by the highest level price touched
            self.value.checked_div(self.size).unwrap_or(Decimal::MAX)
        }
    }
}

/// Unit the quick-trade amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Denomination {
    /// Size in the pair's base asset
    Base,
    /// Total value in the pair's quote asset
    Quote,
}

/// Quote for a one-click conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickTradeQuote {
    /// Volume-weighted average execution price, unrounded
    pub average_price: Decimal,
    /// Base-asset size that would be exchanged
    pub size: Decimal,
    /// Quote-asset value that would be exchanged
    pub value: Decimal,
    /// |average − best| / best (8 dp), zero when nothing fills
    pub slippage: Decimal,
}

// ---------------------------------------------------------------------------
// Book walks
// ---------------------------------------------------------------------------

/// Consume levels until `size` base units are accumulated.
///
/// The last level touched is partially consumed. If the book runs out the
/// fill covers whatever was available.
pub fn walk_by_size(size: Decimal, levels: &[RawLevel]) -> Result<Fill, TradeError> {
    let mut fill = Fill::default();

    for level in levels {
        if size <= fill.size {
            break;
        }
        let take = (size - fill.size).min(level.size());
        fill.value = take
            .checked_mul(level.price())
            .and_then(|value| fill.value.checked_add(value))
            .ok_or(TradeError::Overflow("fill value"))?;
        fill.size += take;
    }

    Ok(fill)
}

/// Consume levels until `total` quote value is accumulated.
///
/// A level worth more than what is left is consumed for `remaining / price`
/// base units.
pub fn walk_by_total(total: Decimal, levels: &[RawLevel]) -> Result<Fill, TradeError> {
    let overflow = || TradeError::Overflow("fill value");
    let mut fill = Fill::default();

    for level in levels {
        if total <= fill.value {
            break;
        }
        let remaining = total - fill.value;
        let level_value = level.size().checked_mul(level.price()).ok_or_else(overflow)?;

        let (value, size) = if remaining >= level_value {
            (level_value, level.size())
        } else {
            let base = remaining.checked_div(level.price()).ok_or_else(overflow)?;
            (base.checked_mul(level.price()).ok_or_else(overflow)?, base)
        };
        fill.value = fill.value.checked_add(value).ok_or_else(overflow)?;
        fill.size = fill.size.checked_add(size).ok_or_else(overflow)?;
    }

    Ok(fill)
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Estimates execution prices against one pair's book snapshot.
pub struct PriceEstimator<'a> {
    book: &'a RawOrderBook,
}

impl<'a> PriceEstimator<'a> {
    pub fn new(book: &'a RawOrderBook) -> Self {
        Self { book }
    }

    fn levels(&self, side: Side) -> &'a [RawLevel] {
        match side.book_side() {
            BookSide::Asks => &self.book.asks,
            BookSide::Bids => &self.book.bids,
        }
    }

    /// Fill for a market order of `size` base units.
    ///
    /// Fails with `InsufficientLiquidity` when the side cannot absorb the
    /// whole size.
    pub fn market_order(&self, side: Side, size: Decimal) -> Result<Fill, TradeError> {
        if size < Decimal::ZERO {
            return Err(TradeError::InvalidAmount(size));
        }

        let levels = self.levels(side);
        let available = sum_quantities(levels)?;
        if size > available {
            warn!(%side, requested = %size, available = %available, "Market order exceeds book");
            return Err(TradeError::InsufficientLiquidity {
                requested: size,
                available,
            });
        }

        let fill = walk_by_size(size, levels)?;
        debug!(%side, size = %fill.size, value = %fill.value, "Estimated market order");
        Ok(fill)
    }

    /// Quote a quick trade for `amount` in the given denomination.
    pub fn quick_trade(
        &self,
        side: Side,
        amount: Decimal,
        denomination: Denomination,
    ) -> Result<QuickTradeQuote, TradeError> {
        if amount < Decimal::ZERO {
            return Err(TradeError::InvalidAmount(amount));
        }

        let levels = self.levels(side);
        let available = match denomination {
            Denomination::Base => sum_quantities(levels)?,
            Denomination::Quote => sum_order_total(levels)?,
        };
        if amount > available {
            warn!(
                %side,
                ?denomination,
                requested = %amount,
                available = %available,
                "Quick trade exceeds book"
            );
            return Err(TradeError::InsufficientLiquidity {
                requested: amount,
                available,
            });
        }

        let fill = match denomination {
            Denomination::Base => walk_by_size(amount, levels)?,
            Denomination::Quote => walk_by_total(amount, levels)?,
        };

        let average_price = fill.average_price();
        let slippage = match levels.first().map(RawLevel::price) {
            Some(best) if !fill.size.is_zero() => round_display(
                (average_price - best)
                    .abs()
                    .checked_div(best)
                    .ok_or(TradeError::Overflow("slippage"))?,
            ),
            _ => Decimal::ZERO,
        };

        debug!(
            %side,
            ?denomination,
            size = %fill.size,
            average_price = %average_price,
            "Estimated quick trade"
        );

        Ok(QuickTradeQuote {
            average_price,
            size: fill.size,
            value: fill.value,
            slippage,
        })
    }

    /// Average execution price for a market order at display precision.
    pub fn execution_price(&self, side: Side, size: Decimal) -> Result<Decimal, TradeError> {
        Ok(round_display(self.market_order(side, size)?.average_price()))
    }

    /// Slippage for a base-size quick trade (convenience wrapper).
    pub fn slippage(&self, side: Side, size: Decimal) -> Result<Decimal, TradeError> {
        Ok(self.quick_trade(side, size, Denomination::Base)?.slippage)
    }
}

/// Round to display precision, HALF_UP.
fn round_display(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

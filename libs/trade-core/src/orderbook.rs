//! Order book aggregation: depth bucketing and cumulative volume
//!
//! Raw feed levels are bucketed to multiples of the display depth, truncated
//! to the configured number of levels, and annotated with running totals for
//! depth-chart rendering. All arithmetic is fixed-point `Decimal`.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::numeric::{decimal_places, Price, Quantity};

use crate::error::TradeError;

// ---------------------------------------------------------------------------
// Raw feed book
// ---------------------------------------------------------------------------

/// A single raw level as delivered by the feed: `[price, size]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLevel(pub Price, pub Quantity);

impl RawLevel {
    pub fn price(&self) -> Decimal {
        self.0.as_decimal()
    }

    pub fn size(&self) -> Decimal {
        self.1.as_decimal()
    }
}

/// Order book snapshot for one pair.
///
/// Asks are best (lowest) first, bids best (highest) first, exactly as the
/// feed delivers them. Levels are not re-sorted here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrderBook {
    #[serde(default)]
    pub asks: Vec<RawLevel>,
    #[serde(default)]
    pub bids: Vec<RawLevel>,
}

impl RawOrderBook {
    pub fn new(asks: Vec<RawLevel>, bids: Vec<RawLevel>) -> Self {
        Self { asks, bids }
    }

    /// Best ask price, if any.
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|l| l.0)
    }

    /// Best bid price, if any.
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|l| l.0)
    }
}

// ---------------------------------------------------------------------------
// Aggregated book
// ---------------------------------------------------------------------------

/// A price bucket after depth aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub price: Decimal,
    pub size: Decimal,
}

/// An aggregated level with running totals from the best price outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub size: Decimal,
    /// Σ size up to and including this level
    pub cumulative: Decimal,
    /// Σ size × price up to and including this level
    pub cumulative_value: Decimal,
}

/// Display-ready order book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedBook {
    /// Larger of the two sides' total size; scales depth bars.
    pub max_cumulative: Decimal,
    pub asks: Vec<BookLevel>,
    pub bids: Vec<BookLevel>,
}

/// One line of the depth chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSeries {
    pub name: String,
    /// `(price, cumulative size)` points, best price first.
    pub data: Vec<(Decimal, Decimal)>,
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Bucket a price to the nearest multiple of `depth`.
///
/// Ties round away from zero and the result keeps the decimal places of
/// `depth`. A non-zero price never lands on the zero bucket: if rounding
/// would produce zero, the next multiple up is used instead.
pub fn round_to_depth(price: Decimal, depth: Decimal) -> Result<Decimal, TradeError> {
    if depth <= Decimal::ZERO {
        return Err(TradeError::InvalidDepth(depth));
    }
    let overflow = || TradeError::Overflow("bucket price");
    let precision = decimal_places(depth);
    let steps = price.checked_div(depth).ok_or_else(overflow)?;

    let rounded = steps
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(depth)
        .ok_or_else(overflow)?
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    if !rounded.is_zero() {
        return Ok(rounded);
    }

    steps
        .ceil()
        .checked_mul(depth)
        .map(|v| v.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero))
        .ok_or_else(overflow)
}

/// Merge consecutive levels that fall into the same depth bucket.
///
/// Levels are visited in feed order. Only adjacent levels merge; a level
/// that maps back to an earlier, non-adjacent bucket starts a new one.
pub fn aggregate_levels(levels: &[RawLevel], depth: Decimal) -> Result<Vec<Bucket>, TradeError> {
    let mut buckets: Vec<Bucket> = Vec::with_capacity(levels.len());

    for level in levels {
        let price = round_to_depth(level.price(), depth)?;
        match buckets.last_mut() {
            Some(last) if !last.price.is_zero() && last.price == price => {
                last.size = last
                    .size
                    .checked_add(level.size())
                    .ok_or(TradeError::Overflow("bucket size"))?;
            }
            _ => buckets.push(Bucket {
                price,
                size: level.size(),
            }),
        }
    }

    Ok(buckets)
}

/// Σ size over raw levels.
pub fn sum_quantities(levels: &[RawLevel]) -> Result<Decimal, TradeError> {
    levels.iter().try_fold(Decimal::ZERO, |acc, l| {
        acc.checked_add(l.size()).ok_or(TradeError::Overflow("total size"))
    })
}

/// Σ size × price over raw levels (quote-denominated capacity).
pub fn sum_order_total(levels: &[RawLevel]) -> Result<Decimal, TradeError> {
    levels.iter().try_fold(Decimal::ZERO, |acc, l| {
        l.size()
            .checked_mul(l.price())
            .and_then(|value| acc.checked_add(value))
            .ok_or(TradeError::Overflow("total value"))
    })
}

fn bucket_total(buckets: &[Bucket]) -> Result<Decimal, TradeError> {
    buckets.iter().try_fold(Decimal::ZERO, |acc, b| {
        acc.checked_add(b.size).ok_or(TradeError::Overflow("total size"))
    })
}

/// Larger of the two sides' total bucket size.
pub fn max_cumulative(asks: &[Bucket], bids: &[Bucket]) -> Result<Decimal, TradeError> {
    Ok(bucket_total(asks)?.max(bucket_total(bids)?))
}

/// Attach running size and value totals to each bucket.
pub fn with_cumulative(buckets: &[Bucket]) -> Result<Vec<BookLevel>, TradeError> {
    let overflow = || TradeError::Overflow("cumulative volume");
    let mut cumulative = Decimal::ZERO;
    let mut cumulative_value = Decimal::ZERO;
    let mut levels = Vec::with_capacity(buckets.len());

    for bucket in buckets {
        cumulative = cumulative.checked_add(bucket.size).ok_or_else(overflow)?;
        cumulative_value = bucket
            .size
            .checked_mul(bucket.price)
            .and_then(|value| cumulative_value.checked_add(value))
            .ok_or_else(overflow)?;
        levels.push(BookLevel {
            price: bucket.price,
            size: bucket.size,
            cumulative,
            cumulative_value,
        });
    }

    Ok(levels)
}

/// Build the display book for one pair.
///
/// The bucket width is `depth_level × increment_price`. Each side keeps its
/// first `max_levels` buckets and `max_cumulative` is taken over those.
pub fn build(
    raw: &RawOrderBook,
    increment_price: Decimal,
    depth_level: u32,
    max_levels: usize,
) -> Result<AggregatedBook, TradeError> {
    let depth = Decimal::from(depth_level)
        .checked_mul(increment_price)
        .ok_or(TradeError::Overflow("bucket width"))?;
    if depth <= Decimal::ZERO {
        return Err(TradeError::InvalidDepth(depth));
    }

    let mut asks = aggregate_levels(&raw.asks, depth)?;
    let mut bids = aggregate_levels(&raw.bids, depth)?;
    asks.truncate(max_levels);
    bids.truncate(max_levels);

    let book = AggregatedBook {
        max_cumulative: max_cumulative(&asks, &bids)?,
        asks: with_cumulative(&asks)?,
        bids: with_cumulative(&bids)?,
    };

    debug!(
        depth = %depth,
        raw_asks = raw.asks.len(),
        raw_bids = raw.bids.len(),
        asks = book.asks.len(),
        bids = book.bids.len(),
        "Aggregated order book"
    );

    Ok(book)
}

/// Cumulative-size series for the depth chart, asks then bids.
pub fn depth_chart(book: &AggregatedBook) -> [DepthSeries; 2] {
    let series = |name: &str, levels: &[BookLevel]| DepthSeries {
        name: name.to_string(),
        data: levels.iter().map(|l| (l.price, l.cumulative)).collect(),
    };

    [series("Asks", &book.asks), series("Bids", &book.bids)]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

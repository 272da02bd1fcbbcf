//! Trading view state and its derived views
//!
//! `MarketState` holds the latest snapshots handed over by the host (books,
//! trades, tickers, metadata, user lists, settings). Every accessor derives
//! its view from the current pair on demand; a pair with no data behaves as
//! an empty book or an empty list.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::ids::PairId;
use types::market::{CoinInfo, PairConfig, Ticker};
use types::numeric::Price;
use types::order::Side;

use crate::config::TradeSettings;
use crate::error::TradeError;
use crate::estimate::{Denomination, Fill, PriceEstimator, QuickTradeQuote};
use crate::markets::{self, MarketSummary};
use crate::orderbook::{self, AggregatedBook, DepthSeries, RawOrderBook};
use crate::trades::{self, ActiveOrder, PublicTrade, TradeHistory, UserTrade};

/// Snapshot of everything the trading views are derived from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketState {
    /// Currently selected pair
    pub pair: Option<PairId>,
    pub pairs: BTreeMap<PairId, PairConfig>,
    pub pairs_orderbooks: BTreeMap<PairId, RawOrderBook>,
    /// Books used for quick-trade quotes
    pub quick_trade_orderbooks: BTreeMap<PairId, RawOrderBook>,
    /// Public trades per pair, newest first
    pub pairs_trades: BTreeMap<PairId, Vec<PublicTrade>>,
    pub tickers: BTreeMap<PairId, Ticker>,
    pub coins: BTreeMap<String, CoinInfo>,
    pub active_orders: Vec<ActiveOrder>,
    pub user_trades: Vec<UserTrade>,
    /// Last close of the price chart, used before any trade prints
    pub chart_last_close: Option<Price>,
    pub settings: TradeSettings,
}

impl MarketState {
    /// Empty state with the given settings.
    pub fn new(settings: TradeSettings) -> Self {
        Self {
            settings,
            ..Default::default()
        }
    }

    /// Decode a full snapshot from JSON and validate its settings.
    pub fn from_json(json: &str) -> Result<Self, TradeError> {
        let state: MarketState = serde_json::from_str(json)?;
        state.settings.validate()?;
        debug!(
            pair = ?state.pair,
            pairs = state.pairs.len(),
            books = state.pairs_orderbooks.len(),
            "Loaded market state"
        );
        Ok(state)
    }

    pub fn set_pair(&mut self, pair: PairId) {
        debug!(%pair, "Selected pair");
        self.pair = Some(pair);
    }

    /// Replace the order book snapshot for `pair`.
    pub fn update_orderbook(&mut self, pair: PairId, book: RawOrderBook) {
        debug!(%pair, asks = book.asks.len(), bids = book.bids.len(), "Order book updated");
        self.pairs_orderbooks.insert(pair, book);
    }

    /// Replace the quick-trade book snapshot for `pair`.
    pub fn update_quick_trade_orderbook(&mut self, pair: PairId, book: RawOrderBook) {
        debug!(%pair, asks = book.asks.len(), bids = book.bids.len(), "Quick trade book updated");
        self.quick_trade_orderbooks.insert(pair, book);
    }

    /// Replace the public trades for `pair` (newest first).
    pub fn update_trades(&mut self, pair: PairId, trades: Vec<PublicTrade>) {
        self.pairs_trades.insert(pair, trades);
    }

    fn current<'a, T>(&self, map: &'a BTreeMap<PairId, T>) -> Option<&'a T> {
        self.pair.as_ref().and_then(|pair| map.get(pair))
    }

    fn increment_price(&self) -> Decimal {
        self.current(&self.pairs)
            .map(|p| p.increment_price)
            .unwrap_or(Decimal::ONE)
    }

    /// Aggregated, truncated book with cumulative totals.
    pub fn orderbook(&self) -> Result<AggregatedBook, TradeError> {
        let empty = RawOrderBook::default();
        let raw = self.current(&self.pairs_orderbooks).unwrap_or(&empty);
        orderbook::build(
            raw,
            self.increment_price(),
            self.settings.depth_level,
            self.settings.order_book_levels,
        )
    }

    /// Asks and bids cumulative-size series.
    pub fn depth_chart(&self) -> Result<[DepthSeries; 2], TradeError> {
        Ok(orderbook::depth_chart(&self.orderbook()?))
    }

    pub fn trade_history(&self) -> TradeHistory {
        let trades = self
            .current(&self.pairs_trades)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        TradeHistory::new(trades)
    }

    /// Last traded price, or the chart close before the first trade.
    pub fn market_price(&self) -> Option<Price> {
        self.trade_history().market_price(self.chart_last_close)
    }

    pub fn active_orders(&self) -> Vec<ActiveOrder> {
        match &self.pair {
            Some(pair) => {
                trades::first_for_pair(&self.active_orders, pair, self.settings.active_orders_limit)
            }
            None => Vec::new(),
        }
    }

    pub fn user_trades(&self) -> Vec<UserTrade> {
        match &self.pair {
            Some(pair) => {
                trades::first_for_pair(&self.user_trades, pair, self.settings.user_trades_limit)
            }
            None => Vec::new(),
        }
    }

    /// Walk the order book for a market order of `size` base units.
    pub fn estimated_market_price(&self, side: Side, size: Decimal) -> Result<Fill, TradeError> {
        let empty = RawOrderBook::default();
        let book = self.current(&self.pairs_orderbooks).unwrap_or(&empty);
        PriceEstimator::new(book).market_order(side, size)
    }

    /// Quote a quick trade against the quick-trade book.
    pub fn estimated_quick_trade_price(
        &self,
        side: Side,
        amount: Decimal,
        denomination: Denomination,
    ) -> Result<QuickTradeQuote, TradeError> {
        let empty = RawOrderBook::default();
        let book = self.current(&self.quick_trade_orderbooks).unwrap_or(&empty);
        PriceEstimator::new(book).quick_trade(side, amount, denomination)
    }

    pub fn sorted_pair_keys(&self) -> Vec<PairId> {
        markets::sorted_pair_keys(&self.pairs, &self.tickers)
    }

    pub fn markets(&self) -> Vec<MarketSummary> {
        markets::market_summaries(
            &self.sorted_pair_keys(),
            &self.pairs,
            &self.tickers,
            &self.coins,
            &self.settings.base_currency,
        )
    }
}

//! Market listing: pair ranking and per-pair 24h change
//!
//! Pairs are ranked by quote-denominated traded value (`volume × close`).
//! Maps are `BTreeMap` so ties resolve in key order and output is stable.

use std::collections::BTreeMap;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::PairId;
use types::market::{CoinInfo, PairConfig, Ticker};

/// Display precision of the change percentage.
const PERCENT_DP: u32 = 2;

/// One row of the market list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub key: PairId,
    pub pair: PairConfig,
    /// Base coin symbol ("" when the coin is unknown)
    pub symbol: String,
    /// Base coin full name
    pub fullname: String,
    /// Quote coin metadata
    pub pair_two: CoinInfo,
    pub ticker: Option<Ticker>,
    pub increment_price: Decimal,
    /// close − open
    pub price_difference: Decimal,
    /// (close − open) / open × 100, two decimal places
    pub price_difference_percent: Decimal,
    pub price_difference_display: String,
}

/// Pair keys ordered by `volume × close`, largest first.
///
/// Pairs without a ticker rank as zero. Equal values keep key order.
pub fn sorted_pair_keys(
    pairs: &BTreeMap<PairId, PairConfig>,
    tickers: &BTreeMap<PairId, Ticker>,
) -> Vec<PairId> {
    let market_cap = |key: &PairId| tickers.get(key).map(Ticker::market_cap).unwrap_or_default();

    let mut keys: Vec<PairId> = pairs.keys().cloned().collect();
    keys.sort_by(|a, b| market_cap(b).cmp(&market_cap(a)));
    keys
}

/// `close − open`, or zero when the pair has not opened.
pub fn price_difference(ticker: &Ticker) -> Decimal {
    if ticker.open.is_zero() {
        Decimal::ZERO
    } else {
        ticker.close.saturating_sub(ticker.open)
    }
}

/// Percentage change relative to open, rounded to two places.
pub fn price_difference_percent(ticker: &Ticker) -> Decimal {
    let difference = price_difference(ticker);
    if difference.is_zero() || ticker.open.is_zero() {
        return Decimal::ZERO;
    }
    match difference
        .checked_div(ticker.open)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(percent) => {
            percent.round_dp_with_strategy(PERCENT_DP, RoundingStrategy::MidpointAwayFromZero)
        }
        None if difference.is_sign_negative() != ticker.open.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Render a percentage with two decimals, e.g. `-1.50%`.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", value)
}

/// Build market rows for `sorted` keys.
///
/// The base coin is looked up by the pair's `pair_base`, falling back to
/// `base_currency`; unknown coins resolve to `CoinInfo::default()`.
pub fn market_summaries(
    sorted: &[PairId],
    pairs: &BTreeMap<PairId, PairConfig>,
    tickers: &BTreeMap<PairId, Ticker>,
    coins: &BTreeMap<String, CoinInfo>,
    base_currency: &str,
) -> Vec<MarketSummary> {
    sorted
        .iter()
        .filter_map(|key| {
            let pair = pairs.get(key)?;
            let base_key = pair.pair_base.as_deref().unwrap_or(base_currency);
            let base = coins.get(base_key).cloned().unwrap_or_default();
            let pair_two = pair
                .pair_2
                .as_deref()
                .and_then(|quote| coins.get(quote))
                .cloned()
                .unwrap_or_default();

            let ticker = tickers.get(key).cloned();
            let stats = ticker.clone().unwrap_or_default();
            let percent = price_difference_percent(&stats);

            Some(MarketSummary {
                key: key.clone(),
                pair: pair.clone(),
                symbol: base.symbol,
                fullname: base.fullname,
                pair_two,
                ticker,
                increment_price: pair.increment_price,
                price_difference: price_difference(&stats),
                price_difference_percent: percent,
                price_difference_display: format_percentage(percent),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn pair(base: &str, quote: &str) -> PairConfig {
        PairConfig {
            name: format!("{base}-{quote}"),
            pair_base: Some(base.to_string()),
            pair_2: Some(quote.to_string()),
            increment_price: dec("0.01"),
            ..Default::default()
        }
    }

    fn ticker(open: &str, close: &str, volume: &str) -> Ticker {
        Ticker {
            open: dec(open),
            close: dec(close),
            volume: dec(volume),
            ..Default::default()
        }
    }

    fn coin(symbol: &str, fullname: &str) -> CoinInfo {
        CoinInfo {
            symbol: symbol.to_string(),
            fullname: fullname.to_string(),
            ..Default::default()
        }
    }

    fn fixtures() -> (BTreeMap<PairId, PairConfig>, BTreeMap<PairId, Ticker>) {
        let mut pairs = BTreeMap::new();
        pairs.insert(PairId::new("btc-usdt"), pair("btc", "usdt"));
        pairs.insert(PairId::new("eth-usdt"), pair("eth", "usdt"));
        pairs.insert(PairId::new("xht-usdt"), pair("xht", "usdt"));
        pairs.insert(PairId::new("ada-usdt"), pair("ada", "usdt"));

        let mut tickers = BTreeMap::new();
        // 10 * 50000 = 500000
        tickers.insert(PairId::new("btc-usdt"), ticker("49000", "50000", "10"));
        // 400 * 3000 = 1200000
        tickers.insert(PairId::new("eth-usdt"), ticker("3100", "3000", "400"));
        // 1000 * 0.2 = 200
        tickers.insert(PairId::new("xht-usdt"), ticker("0", "0.2", "1000"));

        (pairs, tickers)
    }

    #[test]
    fn test_sorted_by_market_cap_desc() {
        let (pairs, tickers) = fixtures();
        let keys = sorted_pair_keys(&pairs, &tickers);
        let names: Vec<&str> = keys.iter().map(PairId::as_str).collect();
        assert_eq!(names, vec!["eth-usdt", "btc-usdt", "xht-usdt", "ada-usdt"]);
    }

    #[test]
    fn test_sort_ties_keep_key_order() {
        let mut pairs = BTreeMap::new();
        pairs.insert(PairId::new("zzz-usdt"), pair("zzz", "usdt"));
        pairs.insert(PairId::new("aaa-usdt"), pair("aaa", "usdt"));
        let keys = sorted_pair_keys(&pairs, &BTreeMap::new());
        assert_eq!(keys[0].as_str(), "aaa-usdt");
        assert_eq!(keys[1].as_str(), "zzz-usdt");
    }

    #[test]
    fn test_price_difference() {
        assert_eq!(price_difference(&ticker("49000", "50000", "1")), dec("1000"));
        assert_eq!(price_difference(&ticker("0", "0.2", "1")), Decimal::ZERO);
        assert_eq!(price_difference(&Ticker::default()), Decimal::ZERO);
    }

    #[test]
    fn test_price_difference_percent() {
        assert_eq!(price_difference_percent(&ticker("3100", "3000", "1")), dec("-3.23"));
        assert_eq!(price_difference_percent(&ticker("200", "203", "1")), dec("1.5"));
        assert_eq!(price_difference_percent(&ticker("0", "5", "1")), Decimal::ZERO);
    }

    #[test]
    fn test_extreme_tickers_do_not_panic() {
        let mut pairs = BTreeMap::new();
        pairs.insert(PairId::new("btc-usdt"), pair("btc", "usdt"));
        pairs.insert(PairId::new("eth-usdt"), pair("eth", "usdt"));

        let mut tickers = BTreeMap::new();
        tickers.insert(PairId::new("btc-usdt"), ticker("1", "1", "1"));
        let mut whale = ticker("1", "2", "1");
        whale.volume = Decimal::MAX;
        tickers.insert(PairId::new("eth-usdt"), whale);

        let keys = sorted_pair_keys(&pairs, &tickers);
        assert_eq!(keys[0].as_str(), "eth-usdt");

        let tiny_open = "0.0000000000000000000000000001";
        assert_eq!(price_difference_percent(&ticker(tiny_open, "1000", "1")), Decimal::MAX);
        assert_eq!(price_difference_percent(&ticker(tiny_open, "-1000", "1")), Decimal::MIN);

        let mut swing = ticker("1", "1", "1");
        swing.open = Decimal::MIN;
        swing.close = Decimal::MAX;
        assert_eq!(price_difference(&swing), Decimal::MAX);
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec("1.5")), "1.50%");
        assert_eq!(format_percentage(dec("-3.23")), "-3.23%");
        assert_eq!(format_percentage(Decimal::ZERO), "0.00%");
    }

    #[test]
    fn test_market_summaries() {
        let (pairs, tickers) = fixtures();
        let mut coins = BTreeMap::new();
        coins.insert("btc".to_string(), coin("btc", "Bitcoin"));
        coins.insert("usdt".to_string(), coin("usdt", "Tether"));

        let sorted = sorted_pair_keys(&pairs, &tickers);
        let rows = market_summaries(&sorted, &pairs, &tickers, &coins, "usdt");

        assert_eq!(rows.len(), 4);
        let btc = rows.iter().find(|r| r.key.as_str() == "btc-usdt").unwrap();
        assert_eq!(btc.fullname, "Bitcoin");
        assert_eq!(btc.pair_two.fullname, "Tether");
        assert_eq!(btc.price_difference, dec("1000"));
        assert_eq!(btc.price_difference_percent, dec("2.04"));
        assert_eq!(btc.price_difference_display, "2.04%");
        assert_eq!(btc.increment_price, dec("0.01"));

        // eth coin is unknown -> default coin data
        let eth = &rows[0];
        assert_eq!(eth.key.as_str(), "eth-usdt");
        assert_eq!(eth.symbol, "");

        // no ticker at all
        let ada = rows.last().unwrap();
        assert!(ada.ticker.is_none());
        assert_eq!(ada.price_difference_display, "0.00%");
    }

    #[test]
    fn test_missing_pair_base_uses_base_currency() {
        let mut pairs = BTreeMap::new();
        pairs.insert(
            PairId::new("abc-def"),
            PairConfig {
                pair_base: None,
                ..Default::default()
            },
        );
        let mut coins = BTreeMap::new();
        coins.insert("usdt".to_string(), coin("usdt", "Tether"));

        let sorted = sorted_pair_keys(&pairs, &BTreeMap::new());
        let rows = market_summaries(&sorted, &pairs, &BTreeMap::new(), &coins, "usdt");
        assert_eq!(rows[0].symbol, "usdt");
        assert_eq!(rows[0].pair_two, CoinInfo::default());
    }
}

//! Identifier types for exchange entities
//!
//! Order ids are UUIDs (v7 when minted locally, so they sort by creation
//! time). Pair ids are the exchange's lowercase `base-quote` keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TypeError;

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    /// Create a new OrderId with current timestamp
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get inner UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trading pair key
///
/// Format: "base-quote" (e.g., "btc-usdt", "eth-btc")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PairId(String);

impl PairId {
    /// Create a new PairId from a literal
    ///
    /// # Panics
    /// Panics if the format is invalid (must be "base-quote")
    pub fn new(pair: impl Into<String>) -> Self {
        let s = pair.into();
        assert!(is_valid_pair(&s), "PairId must be in base-quote format");
        Self(s)
    }

    /// Try to create a PairId, returning None if invalid
    pub fn try_new(pair: impl Into<String>) -> Option<Self> {
        let s = pair.into();
        if is_valid_pair(&s) {
            Some(Self(s))
        } else {
            None
        }
    }

    /// Get the pair string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into base and quote assets
    pub fn split(&self) -> (&str, &str) {
        self.0.split_once('-').unwrap_or((self.0.as_str(), ""))
    }
}

fn is_valid_pair(s: &str) -> bool {
    match s.split_once('-') {
        Some((base, quote)) => !base.is_empty() && !quote.is_empty() && !quote.contains('-'),
        None => false,
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PairId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(s).ok_or_else(|| TypeError::InvalidPair(s.to_string()))
    }
}

impl TryFrom<String> for PairId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if is_valid_pair(&s) {
            Ok(Self(s))
        } else {
            Err(TypeError::InvalidPair(s))
        }
    }
}

impl From<PairId> for String {
    fn from(pair: PairId) -> Self {
        pair.0
    }
}

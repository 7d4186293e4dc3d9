//! Depth snapshots and the fixed-width console rendering of book state.

use super::error::MarketDataError;
use super::quote::Quote;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rendered in place of a missing bid cell so ask cells stay aligned.
const BLANK_BID_CELL: &str = "          ";

/// One price level as captured by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Price of the level.
    pub price: Decimal,
    /// Cumulative quantity at the level.
    pub quantity: Decimal,
}

impl LevelSnapshot {
    /// Bid-side cell: quantity first, both values at two fractional digits.
    fn bid_cell(&self) -> String {
        format!("{:.2} {:.2}", self.quantity, self.price)
    }

    /// Ask-side cell: price first, both values at two fractional digits.
    fn ask_cell(&self) -> String {
        format!("{:.2} {:.2}", self.price, self.quantity)
    }
}

impl From<&Quote> for LevelSnapshot {
    fn from(quote: &Quote) -> Self {
        Self {
            price: quote.price,
            quantity: quote.quantity,
        }
    }
}

/// The best level of each side, either absent when the side is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TopOfBook {
    /// Best (highest) bid, if any.
    pub bid: Option<Quote>,
    /// Best (lowest) ask, if any.
    pub ask: Option<Quote>,
}

impl TopOfBook {
    /// Render as the single index-0 depth line. An absent side renders as a
    /// blank cell; an entirely empty top renders as an empty string.
    pub fn render(&self) -> String {
        let bids: Vec<LevelSnapshot> = self.bid.as_ref().map(LevelSnapshot::from).into_iter().collect();
        let asks: Vec<LevelSnapshot> = self.ask.as_ref().map(LevelSnapshot::from).into_iter().collect();
        render_rows(&bids, &asks)
    }
}

/// A snapshot of one instrument's book depth at a specific point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthSnapshot {
    /// The instrument this snapshot belongs to.
    pub instrument: String,

    /// Timestamp when the snapshot was created (milliseconds since epoch).
    pub timestamp: u64,

    /// Bid levels, best (highest price) first.
    pub bids: Vec<LevelSnapshot>,

    /// Ask levels, best (lowest price) first.
    pub asks: Vec<LevelSnapshot>,
}

impl DepthSnapshot {
    pub(crate) fn new(instrument: &str, timestamp: u64, bids: Vec<Quote>, asks: Vec<Quote>) -> Self {
        Self {
            instrument: instrument.to_string(),
            timestamp,
            bids: bids.iter().map(LevelSnapshot::from).collect(),
            asks: asks.iter().map(LevelSnapshot::from).collect(),
        }
    }

    /// Number of rows a rendering of this snapshot produces.
    pub fn depth(&self) -> usize {
        self.bids.len().max(self.asks.len())
    }

    /// Render the full depth, one line per level index:
    /// `"<i>: <bid-cell> | <ask-cell>"`. A side with no entry at a given
    /// index renders as a blank cell rather than being omitted.
    pub fn render(&self) -> String {
        render_rows(&self.bids, &self.asks)
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, MarketDataError> {
        serde_json::to_string(self).map_err(|error| MarketDataError::SerializationError {
            message: error.to_string(),
        })
    }

    /// Deserialize a snapshot from JSON.
    pub fn from_json(data: &str) -> Result<Self, MarketDataError> {
        serde_json::from_str(data).map_err(|error| MarketDataError::SerializationError {
            message: error.to_string(),
        })
    }
}

fn render_rows(bids: &[LevelSnapshot], asks: &[LevelSnapshot]) -> String {
    let rows = bids.len().max(asks.len());
    let mut out = String::new();
    for i in 0..rows {
        out.push_str(&i.to_string());
        out.push_str(": ");
        match bids.get(i) {
            Some(level) => out.push_str(&level.bid_cell()),
            None => out.push_str(BLANK_BID_CELL),
        }
        out.push_str(" | ");
        if let Some(level) = asks.get(i) {
            out.push_str(&level.ask_cell());
        }
        out.push('\n');
    }
    out
}

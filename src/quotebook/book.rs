//! Per-instrument price-level book and level-bounded aggregation.

use super::ladder::{AscendingPrice, DescendingPrice, LevelMap};
use super::quote::{Quote, Side, to_scale};
use super::snapshot::{DepthSnapshot, TopOfBook};
use crate::utils::current_time_millis;
use rust_decimal::Decimal;
use tracing::trace;

/// Fractional digits carried by aggregate query results that involve division.
const AGGREGATE_SCALE: u32 = 8;

/// The two-sided price-level book for one instrument.
///
/// Bid levels iterate strictly descending by price, ask levels strictly
/// ascending, so the best level is always first on either side. Exactly one
/// ingestion writer mutates a given book; queries read concurrently from any
/// thread. Aggregate queries are best-effort consistent across the book, not
/// transactional.
pub struct QuoteBook {
    /// The instrument this book belongs to.
    instrument: String,

    /// Bid side, best (highest) price first.
    bids: LevelMap<DescendingPrice>,

    /// Ask side, best (lowest) price first.
    asks: LevelMap<AscendingPrice>,
}

impl QuoteBook {
    /// Create an empty book for the given instrument.
    pub fn new(instrument: &str) -> Self {
        Self {
            instrument: instrument.to_string(),
            bids: LevelMap::new(),
            asks: LevelMap::new(),
        }
    }

    /// Get the instrument of this book.
    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    /// Apply one validated quote to the side it names.
    ///
    /// Zero quantity removes the level at the quote's price, a quote at an
    /// existing price adds its quantity to that level, anything else inserts
    /// a new level. Never fails; validation happened at parse time.
    pub fn apply_quote(&self, quote: Quote) {
        trace!(
            "Book {}: applying {:?} {} @ {}",
            self.instrument, quote.side, quote.quantity, quote.price
        );
        match quote.side {
            Side::Buy => self.bids.apply(quote),
            Side::Sell => self.asks.apply(quote),
        }
    }

    /// The best bid and best ask, either absent when its side has no levels.
    /// A single front lookup per side; no level list is allocated.
    pub fn top_of_book(&self) -> TopOfBook {
        TopOfBook {
            bid: self.bids.best(),
            ask: self.asks.best(),
        }
    }

    /// All bid levels in priority order (highest price first).
    pub fn bid_levels(&self) -> Vec<Quote> {
        self.bids.levels()
    }

    /// All ask levels in priority order (lowest price first).
    pub fn ask_levels(&self) -> Vec<Quote> {
        self.asks.levels()
    }

    /// The first `n` levels of each side, fewer if a side is shallower.
    pub fn top_levels(&self, n: usize) -> (Vec<Quote>, Vec<Quote>) {
        (self.bids.top_levels(n), self.asks.top_levels(n))
    }

    /// Arithmetic mean of the price over the top-`n` union (see
    /// [`top_union`](Self::top_union)). Exact zero when the union is empty.
    /// The division is rounded to 8 fractional digits, half-up.
    pub fn average_price(&self, n: usize) -> Decimal {
        let sample = self.top_union(n);
        if sample.is_empty() {
            return Decimal::ZERO;
        }
        let total: Decimal = sample.iter().map(|quote| quote.price).sum();
        let count = Decimal::from(sample.len() as u64);
        to_scale(total / count, AGGREGATE_SCALE)
    }

    /// Sum of the quantity over the top-`n` union. No rounding beyond the
    /// 2-digit scale quotes already carry.
    pub fn total_quantity(&self, n: usize) -> Decimal {
        self.top_union(n).iter().map(|quote| quote.quantity).sum()
    }

    /// `Σ(price·quantity) / Σ(quantity)` over the top-`n` union. Exact zero
    /// when the total quantity is exactly zero, guarding the division.
    /// Rounded to 8 fractional digits, half-up.
    pub fn volume_weighted_price(&self, n: usize) -> Decimal {
        let sample = self.top_union(n);
        let total_quantity: Decimal = sample.iter().map(|quote| quote.quantity).sum();
        if total_quantity.is_zero() {
            return Decimal::ZERO;
        }
        let weighted: Decimal = sample
            .iter()
            .map(|quote| quote.price * quote.quantity)
            .sum();
        to_scale(weighted / total_quantity, AGGREGATE_SCALE)
    }

    /// Create a timestamped snapshot of the full book depth.
    pub fn create_snapshot(&self) -> DepthSnapshot {
        DepthSnapshot::new(
            &self.instrument,
            current_time_millis(),
            self.bid_levels(),
            self.ask_levels(),
        )
    }

    /// Whether neither side holds any level.
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Total number of price levels across both sides.
    pub fn level_count(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    /// The aggregation sample: top-`n` ask levels and top-`n` bid levels
    /// combined into one undifferentiated union. Each level contributes once
    /// regardless of side; bids and asks are not matched pairwise.
    fn top_union(&self, n: usize) -> Vec<Quote> {
        let mut sample = self.asks.top_levels(n);
        sample.extend(self.bids.top_levels(n));
        sample
    }
}

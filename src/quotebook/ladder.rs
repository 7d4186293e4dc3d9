//! Concurrent ordered price-level map, generic over priority direction.
//!
//! Bid and ask sides need the same insert/merge/remove logic but opposite
//! iteration orders (best bid = highest price, best ask = lowest). Rather than
//! duplicating the logic, [`LevelMap`] is parameterized by a [`PriceOrder`]
//! that maps a price to the skip-list key, so front-to-back iteration is
//! always best-first on either side.

use super::quote::Quote;
use crossbeam_skiplist::SkipMap;
use rust_decimal::Decimal;
use std::cmp::Reverse;
use std::marker::PhantomData;

/// Maps a price to the ordering key used by the underlying skip list.
pub trait PriceOrder: Send + Sync + 'static {
    /// Skip-list key type for this direction.
    type Key: Ord + Send + 'static;

    /// Build the key under which a level at `price` is stored.
    fn key(price: Decimal) -> Self::Key;
}

/// Best-first ordering for the bid side: highest price iterates first.
pub enum DescendingPrice {}

impl PriceOrder for DescendingPrice {
    type Key = Reverse<Decimal>;

    fn key(price: Decimal) -> Self::Key {
        Reverse(price)
    }
}

/// Best-first ordering for the ask side: lowest price iterates first.
pub enum AscendingPrice {}

impl PriceOrder for AscendingPrice {
    type Key = Decimal;

    fn key(price: Decimal) -> Self::Key {
        price
    }
}

/// One side of a book: an ordered map from price to the quote occupying that
/// level, at most one entry per exact price value.
///
/// Backed by a lock-free skip list, so a single ingestion writer and any
/// number of readers share the map without external locking. A quantity merge
/// is a single-entry replace: readers observe the level either before or
/// after the merge, never a torn entry.
pub struct LevelMap<O: PriceOrder> {
    levels: SkipMap<O::Key, Quote>,
    _order: PhantomData<O>,
}

impl<O: PriceOrder> LevelMap<O> {
    pub fn new() -> Self {
        Self {
            levels: SkipMap::new(),
            _order: PhantomData,
        }
    }

    /// Apply one quote to this side.
    ///
    /// Zero quantity removes any level at the quote's price (no-op if absent).
    /// Otherwise the quantity is added to an existing level at that price, or
    /// the quote is inserted as a new level.
    pub fn apply(&self, quote: Quote) {
        let key = O::key(quote.price);
        if quote.quantity.is_zero() {
            self.levels.remove(&key);
        } else if let Some(entry) = self.levels.get(&key) {
            let merged = entry.value().with_added_quantity(quote.quantity);
            self.levels.insert(key, merged);
        } else {
            self.levels.insert(key, quote);
        }
    }

    /// The best level on this side, if any. A single front lookup.
    pub fn best(&self) -> Option<Quote> {
        self.levels.front().map(|entry| entry.value().clone())
    }

    /// All levels in priority order, best first.
    pub fn levels(&self) -> Vec<Quote> {
        self.levels
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// The first `n` levels in priority order. Fewer if the side is shallower.
    pub fn top_levels(&self, n: usize) -> Vec<Quote> {
        self.levels
            .iter()
            .take(n)
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl<O: PriceOrder> Default for LevelMap<O> {
    fn default() -> Self {
        Self::new()
    }
}

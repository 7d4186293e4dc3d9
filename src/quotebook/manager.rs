//! Multi-instrument registry and the query surface consumed by front ends.

use super::book::QuoteBook;
use super::error::MarketDataError;
use super::quote::Quote;
use super::snapshot::{DepthSnapshot, TopOfBook};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Routes quotes to per-instrument books, creating each book lazily on the
/// first quote for its instrument. Books are never removed during the process
/// lifetime.
///
/// Ingestion and queries may run on different threads; the registry itself is
/// a concurrent map and each book tolerates one writer plus any number of
/// readers. Queries against an instrument that has never been seen return
/// [`MarketDataError::UnknownInstrument`] — a result kind to branch on, not a
/// failure.
pub struct BookManager {
    /// Collection of books indexed by instrument.
    books: DashMap<String, Arc<QuoteBook>>,
}

impl BookManager {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
        }
    }

    /// Apply one validated quote, creating the instrument's book on first
    /// sight.
    pub fn ingest(&self, quote: Quote) {
        let book = {
            let entry = self.books.entry(quote.instrument.clone()).or_insert_with(|| {
                info!("Created book for instrument: {}", quote.instrument);
                Arc::new(QuoteBook::new(&quote.instrument))
            });
            Arc::clone(entry.value())
        };
        book.apply_quote(quote);
    }

    /// Parse one wire record and ingest it.
    ///
    /// # Errors
    /// Returns [`MarketDataError::MalformedQuote`] for unparseable records.
    /// The record is dropped and previously ingested state is untouched.
    pub fn ingest_record(&self, record: &str) -> Result<(), MarketDataError> {
        let quote = Quote::parse(record)?;
        self.ingest(quote);
        Ok(())
    }

    /// Get the book for an instrument, if one exists.
    pub fn book(&self, instrument: &str) -> Option<Arc<QuoteBook>> {
        self.books
            .get(instrument)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a book exists for the instrument.
    pub fn has_book(&self, instrument: &str) -> bool {
        self.books.contains_key(instrument)
    }

    /// Instruments with a book in this registry.
    pub fn instruments(&self) -> Vec<String> {
        self.books.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of books in this registry.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    /// Best bid and ask for the instrument.
    pub fn top_of_book(&self, instrument: &str) -> Result<TopOfBook, MarketDataError> {
        Ok(self.existing_book(instrument)?.top_of_book())
    }

    /// Timestamped full-depth snapshot for the instrument.
    pub fn depth(&self, instrument: &str) -> Result<DepthSnapshot, MarketDataError> {
        Ok(self.existing_book(instrument)?.create_snapshot())
    }

    /// Mean price over the top-`n` union of both sides.
    pub fn average_price(&self, instrument: &str, n: usize) -> Result<Decimal, MarketDataError> {
        Ok(self.existing_book(instrument)?.average_price(n))
    }

    /// Total quantity over the top-`n` union of both sides.
    pub fn total_quantity(&self, instrument: &str, n: usize) -> Result<Decimal, MarketDataError> {
        Ok(self.existing_book(instrument)?.total_quantity(n))
    }

    /// Volume-weighted price over the top-`n` union of both sides.
    pub fn volume_weighted_price(
        &self,
        instrument: &str,
        n: usize,
    ) -> Result<Decimal, MarketDataError> {
        Ok(self.existing_book(instrument)?.volume_weighted_price(n))
    }

    /// Best bid/ask rendered as a single depth line, or the no-data sentinel.
    pub fn top_of_book_report(&self, instrument: &str) -> String {
        match self.top_of_book(instrument) {
            Ok(top) => top.render(),
            Err(error) => error.to_string(),
        }
    }

    /// Full depth rendered one line per level, or the no-data sentinel.
    pub fn depth_report(&self, instrument: &str) -> String {
        match self.depth(instrument) {
            Ok(snapshot) => snapshot.render(),
            Err(error) => error.to_string(),
        }
    }

    /// Average price as a decimal string, or the no-data sentinel.
    pub fn average_price_report(&self, instrument: &str, n: usize) -> String {
        match self.average_price(instrument, n) {
            Ok(value) => value.to_string(),
            Err(error) => error.to_string(),
        }
    }

    /// Total quantity as a decimal string, or the no-data sentinel.
    pub fn total_quantity_report(&self, instrument: &str, n: usize) -> String {
        match self.total_quantity(instrument, n) {
            Ok(value) => value.to_string(),
            Err(error) => error.to_string(),
        }
    }

    /// Volume-weighted price as a decimal string, or the no-data sentinel.
    pub fn volume_weighted_price_report(&self, instrument: &str, n: usize) -> String {
        match self.volume_weighted_price(instrument, n) {
            Ok(value) => value.to_string(),
            Err(error) => error.to_string(),
        }
    }

    fn existing_book(&self, instrument: &str) -> Result<Arc<QuoteBook>, MarketDataError> {
        self.book(instrument)
            .ok_or(MarketDataError::UnknownInstrument)
    }
}

impl Default for BookManager {
    fn default() -> Self {
        Self::new()
    }
}

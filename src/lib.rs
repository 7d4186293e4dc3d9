//! A per-instrument, price-leveled market data engine.
//!
//! This crate maintains a live view of buy/sell interest per instrument,
//! built by ingesting a stream of pipe-delimited quote updates, and answers
//! level-bounded aggregate queries over that view. Price levels are stored
//! in concurrent ordered maps (skip lists), so a single ingestion writer and
//! any number of query readers operate without external locking.
//!
//! All prices and quantities are exact base-10 decimals. Binary floating
//! point is never used on the price/quantity path.
//!
//! # Example
//!
//! ```rust
//! use quotebook_rs::prelude::{BookManager, Quote};
//!
//! let manager = BookManager::new();
//! let quote = Quote::parse("t=1712345678901|i=BTCUSD|p=32.99|q=100|s=s").unwrap();
//! manager.ingest(quote);
//!
//! let top = manager.top_of_book("BTCUSD").unwrap();
//! assert!(top.bid.is_none());
//! assert_eq!(top.ask.unwrap().price.to_string(), "32.99");
//! ```
pub mod feed;
pub mod quotebook;
pub mod utils;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::feed::{FeedStats, Pacing, QuoteGenerator};
    pub use crate::quotebook::{
        BookManager, DepthSnapshot, MarketDataError, Quote, QuoteBook, Side, TopOfBook,
    };
}

//! Market data engine: quotes, price-level books and the instrument registry.

pub mod book;
pub mod error;
/// Generic direction-parameterized concurrent price-level map.
pub mod ladder;
/// Multi-instrument registry and query surface.
pub mod manager;
pub mod quote;
pub mod snapshot;

pub use book::QuoteBook;
pub use error::MarketDataError;
pub use manager::BookManager;
pub use quote::{Quote, Side};
pub use snapshot::{DepthSnapshot, LevelSnapshot, TopOfBook};

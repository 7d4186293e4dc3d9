//! Error types for the market data engine.

use std::fmt;

/// Fixed sentinel returned by the query surface for instruments that have
/// never produced a quote. Consumers print it verbatim.
pub const NO_MARKET_DATA: &str = "Market Data doesn't exist for this instrument";

/// Errors surfaced by quote ingestion and the query surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketDataError {
    /// An input record could not be parsed into a valid quote. The record is
    /// dropped; ingestion continues.
    MalformedQuote {
        /// Description of what made the record unparseable.
        message: String,
    },

    /// A query named an instrument with no market data. This is a result kind
    /// callers branch on, not a failure of the engine.
    UnknownInstrument,

    /// A snapshot could not be serialized.
    SerializationError {
        /// Underlying serializer message.
        message: String,
    },
}

impl fmt::Display for MarketDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketDataError::MalformedQuote { message } => {
                write!(f, "malformed quote: {}", message)
            }
            MarketDataError::UnknownInstrument => write!(f, "{}", NO_MARKET_DATA),
            MarketDataError::SerializationError { message } => {
                write!(f, "snapshot serialization failed: {}", message)
            }
        }
    }
}

impl std::error::Error for MarketDataError {}

//! Quote records and the wire-format parser.
//!
//! The ingestion format is one record per line:
//! `t=<epoch-ms>|i=<instrument>|p=<decimal>|q=<decimal>|s=<b|s>`
//! Exactly five `|`-delimited fields, each value after a two-character tag.
//! The timestamp value is carried on the wire but not interpreted here.

use super::error::MarketDataError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fields in a well-formed quote line.
const FIELD_COUNT: usize = 5;

/// Canonical fractional digits carried by prices and quantities.
const PRICE_SCALE: u32 = 2;

/// Which side of the book a quote updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Bid side.
    Buy,
    /// Ask side.
    Sell,
}

/// A validated quote update for one price level of one instrument.
///
/// Price and quantity are non-negative decimals at 2-digit canonical scale.
/// A quantity of exactly zero is a valid transient value meaning "remove the
/// level at this price".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Instrument identifier, e.g. `BTCUSD`.
    pub instrument: String,
    /// Price of the level this quote updates.
    pub price: Decimal,
    /// Quantity at the level. Grows when quotes aggregate at the same price.
    pub quantity: Decimal,
    /// Side of the book this quote belongs to.
    pub side: Side,
}

impl Quote {
    /// Parse a wire record into a validated quote.
    ///
    /// Trailing CR/LF characters are tolerated and stripped. Price and
    /// quantity are rounded to 2 fractional digits, half-up.
    ///
    /// # Errors
    /// Returns [`MarketDataError::MalformedQuote`] when the field count is
    /// wrong, a value is missing its tag, price or quantity is not a
    /// non-negative decimal, or the side is neither `b` nor `s`.
    pub fn parse(record: &str) -> Result<Self, MarketDataError> {
        let record = record.trim_end_matches(['\r', '\n']);
        let fields: Vec<&str> = record.split('|').collect();
        if fields.len() != FIELD_COUNT {
            return Err(malformed(format!(
                "expected {} fields, got {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let instrument = tag_value(fields[1])?;
        let price = parse_amount(tag_value(fields[2])?, "price")?;
        let quantity = parse_amount(tag_value(fields[3])?, "quantity")?;
        let side = match tag_value(fields[4])?.chars().next() {
            Some('b') => Side::Buy,
            Some('s') => Side::Sell,
            other => {
                return Err(malformed(format!("side is not b/s: {:?}", other)));
            }
        };

        Ok(Self {
            instrument: instrument.to_string(),
            price,
            quantity,
            side,
        })
    }

    /// Copy of this quote with `quantity` added, used when a level aggregates
    /// a second quote at the same price.
    pub(crate) fn with_added_quantity(&self, quantity: Decimal) -> Self {
        Self {
            quantity: self.quantity + quantity,
            ..self.clone()
        }
    }
}

/// Round `value` half-up at `scale` fractional digits, then pad the scale so
/// the decimal prints with exactly `scale` digits.
pub(crate) fn to_scale(value: Decimal, scale: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);
    rounded
}

fn malformed(message: String) -> MarketDataError {
    MarketDataError::MalformedQuote { message }
}

/// Value of a `x=`-tagged field, i.e. everything after the two tag characters.
fn tag_value(field: &str) -> Result<&str, MarketDataError> {
    field
        .get(2..)
        .ok_or_else(|| malformed(format!("field too short for tag: {:?}", field)))
}

fn parse_amount(value: &str, what: &str) -> Result<Decimal, MarketDataError> {
    let amount: Decimal = value
        .parse()
        .map_err(|_| malformed(format!("{} is not a decimal: {:?}", what, value)))?;
    if amount.is_sign_negative() {
        return Err(malformed(format!("{} is negative: {}", what, value)));
    }
    Ok(to_scale(amount, PRICE_SCALE))
}

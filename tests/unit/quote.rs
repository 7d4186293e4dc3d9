//! Wire-format parsing tests.

use quotebook_rs::prelude::{MarketDataError, Quote, Side};

fn assert_malformed(record: &str) {
    match Quote::parse(record) {
        Err(MarketDataError::MalformedQuote { .. }) => {}
        other => panic!("expected MalformedQuote for {:?}, got {:?}", record, other),
    }
}

#[test]
fn parses_a_valid_record() {
    let quote = Quote::parse("t=1638848595|i=BTCUSD|p=32.99|q=100|s=s").unwrap();
    assert_eq!(quote.instrument, "BTCUSD");
    assert_eq!(quote.price.to_string(), "32.99");
    assert_eq!(quote.quantity.to_string(), "100.00");
    assert_eq!(quote.side, Side::Sell);
}

#[test]
fn decodes_buy_side() {
    let quote = Quote::parse("t=1|i=ETHUSD|p=41.6|q=654.56|s=b").unwrap();
    assert_eq!(quote.side, Side::Buy);
    assert_eq!(quote.price.to_string(), "41.60");
}

#[test]
fn strips_trailing_line_endings() {
    let quote = Quote::parse("t=1|i=BTCUSD|p=10.00|q=5|s=b\r\n").unwrap();
    assert_eq!(quote.side, Side::Buy);
    assert_eq!(quote.quantity.to_string(), "5.00");
}

#[test]
fn rounds_half_up_to_two_digits() {
    let quote = Quote::parse("t=1|i=BTCUSD|p=32.995|q=0.005|s=b").unwrap();
    assert_eq!(quote.price.to_string(), "33.00");
    assert_eq!(quote.quantity.to_string(), "0.01");
}

#[test]
fn zero_quantity_is_valid() {
    let quote = Quote::parse("t=1|i=BTCUSD|p=32.99|q=0|s=s").unwrap();
    assert!(quote.quantity.is_zero());
}

#[test]
fn rejects_wrong_field_count() {
    assert_malformed("t=1|i=BTCUSD|p=32.99|q=100");
    assert_malformed("t=1|i=BTCUSD|p=32.99|q=100|s=s|x=extra");
    assert_malformed("");
}

#[test]
fn rejects_unparseable_amounts() {
    assert_malformed("t=1|i=BTCUSD|p=abc|q=100|s=s");
    assert_malformed("t=1|i=BTCUSD|p=32.99|q=ten|s=s");
    assert_malformed("t=1|i=BTCUSD|p=|q=100|s=s");
}

#[test]
fn rejects_negative_amounts() {
    assert_malformed("t=1|i=BTCUSD|p=-32.99|q=100|s=s");
    assert_malformed("t=1|i=BTCUSD|p=32.99|q=-1|s=s");
}

#[test]
fn rejects_unknown_side() {
    assert_malformed("t=1|i=BTCUSD|p=32.99|q=100|s=x");
    assert_malformed("t=1|i=BTCUSD|p=32.99|q=100|s=");
}

#[test]
fn rejects_fields_shorter_than_their_tag() {
    assert_malformed("t=1|i|p=32.99|q=100|s=s");
    assert_malformed("t=1|i=BTCUSD|p|q=100|s=s");
}

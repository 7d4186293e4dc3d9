//! Depth rendering and snapshot tests.

use quotebook_rs::prelude::BookManager;

#[test]
fn lone_ask_renders_with_a_blank_bid_cell() {
    let manager = BookManager::new();
    manager
        .ingest_record("t=1|i=BTCUSD|p=32.99|q=100|s=s")
        .unwrap();

    let expected = concat!("0: ", "          ", " | ", "32.99 100.00", "\n");
    assert_eq!(manager.depth_report("BTCUSD"), expected);
    assert_eq!(manager.top_of_book_report("BTCUSD"), expected);
}

#[test]
fn depth_renders_both_sides_in_priority_order() {
    let manager = BookManager::new();
    manager
        .ingest_record("t=1|i=BTCUSD|p=37.59|q=1949.5|s=b")
        .unwrap();
    manager
        .ingest_record("t=2|i=BTCUSD|p=41.6|q=654.56|s=b")
        .unwrap();
    manager
        .ingest_record("t=3|i=BTCUSD|p=32.99|q=160|s=s")
        .unwrap();
    manager
        .ingest_record("t=4|i=BTCUSD|p=34.2|q=170.8|s=s")
        .unwrap();

    let expected = concat!(
        "0: 654.56 41.60 | 32.99 160.00\n",
        "1: 1949.50 37.59 | 34.20 170.80\n",
    );
    assert_eq!(manager.depth_report("BTCUSD"), expected);
}

#[test]
fn uneven_sides_render_blank_trailing_cells() {
    let manager = BookManager::new();
    manager
        .ingest_record("t=1|i=BTCUSD|p=41.60|q=654.56|s=b")
        .unwrap();
    manager
        .ingest_record("t=2|i=BTCUSD|p=32.99|q=160|s=s")
        .unwrap();
    manager
        .ingest_record("t=3|i=BTCUSD|p=34.20|q=170.8|s=s")
        .unwrap();

    let expected = concat!(
        "0: 654.56 41.60 | 32.99 160.00\n",
        "1: ", "          ", " | ", "34.20 170.80", "\n",
    );
    assert_eq!(manager.depth_report("BTCUSD"), expected);
}

#[test]
fn top_of_book_renders_the_single_best_line() {
    let manager = BookManager::new();
    manager
        .ingest_record("t=1|i=BTCUSD|p=37.59|q=1949.5|s=b")
        .unwrap();
    manager
        .ingest_record("t=2|i=BTCUSD|p=41.6|q=654.56|s=b")
        .unwrap();
    manager
        .ingest_record("t=3|i=BTCUSD|p=32.99|q=160|s=s")
        .unwrap();

    assert_eq!(
        manager.top_of_book_report("BTCUSD"),
        "0: 654.56 41.60 | 32.99 160.00\n"
    );
}

#[test]
fn empty_top_of_book_renders_nothing() {
    let manager = BookManager::new();
    // Create the book, then clear its only level.
    manager
        .ingest_record("t=1|i=BTCUSD|p=32.99|q=100|s=s")
        .unwrap();
    manager
        .ingest_record("t=2|i=BTCUSD|p=32.99|q=0|s=s")
        .unwrap();

    assert_eq!(manager.top_of_book_report("BTCUSD"), "");
    assert_eq!(manager.depth_report("BTCUSD"), "");
}

#[test]
fn snapshots_serialize_to_json_and_back() {
    let manager = BookManager::new();
    manager
        .ingest_record("t=1|i=BTCUSD|p=32.99|q=100|s=s")
        .unwrap();

    let snapshot = manager.depth("BTCUSD").unwrap();
    assert_eq!(snapshot.instrument, "BTCUSD");
    assert_eq!(snapshot.depth(), 1);

    let json = snapshot.to_json().unwrap();
    let restored = quotebook_rs::prelude::DepthSnapshot::from_json(&json).unwrap();
    assert_eq!(restored, snapshot);
}

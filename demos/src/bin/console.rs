//! Interactive market data console.
//!
//! Starts an ingestion feed on a background thread — replaying a quote file
//! when a path is given as the first argument, otherwise generating synthetic
//! quotes — then serves aggregate queries from a stdin menu loop.

use anyhow::Result;
use quotebook_rs::feed::{self, Pacing};
use quotebook_rs::prelude::BookManager;
use std::io::{self, BufRead};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const MENU: &str = "\
1. Print top level
2. Print all bids/asks
3. Average price
4. Total Quantity
5. Volume Weighted Price
6. Depth snapshot (JSON)

Enter 1-6:";

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let manager = Arc::new(BookManager::new());

    let _feed = match std::env::args().nth(1) {
        Some(path) => {
            info!("Replaying quote file: {}", path);
            feed::spawn_file_replay(path.into(), Arc::clone(&manager), Some(Pacing::default()))
        }
        None => {
            info!("No quote file given, generating synthetic quotes");
            feed::spawn_synthetic(Arc::clone(&manager), usize::MAX, Some(Pacing::default()))
        }
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    // Runs until stdin is exhausted.
    loop {
        println!("{}", MENU);
        let Some(line) = next_line(&mut lines)? else {
            break;
        };
        let Ok(action) = line.parse::<u32>() else {
            println!("Invalid action choice");
            continue;
        };
        if !(1..=6).contains(&action) {
            println!("Invalid action choice");
            continue;
        }

        println!("Enter instrument:");
        let Some(instrument) = next_line(&mut lines)? else {
            break;
        };

        let output = match action {
            1 => manager.top_of_book_report(&instrument),
            2 => manager.depth_report(&instrument),
            6 => match manager.depth(&instrument) {
                Ok(snapshot) => snapshot.to_json()?,
                Err(e) => e.to_string(),
            },
            _ => {
                println!("Enter number of levels:");
                let Some(line) = next_line(&mut lines)? else {
                    break;
                };
                let Ok(levels) = line.parse::<usize>() else {
                    println!("Invalid level count");
                    continue;
                };
                match action {
                    3 => manager.average_price_report(&instrument, levels),
                    4 => manager.total_quantity_report(&instrument, levels),
                    _ => manager.volume_weighted_price_report(&instrument, levels),
                }
            }
        };

        println!("{}", output);
        println!();
    }

    Ok(())
}

/// Next trimmed stdin line, or `None` once stdin is exhausted.
fn next_line(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

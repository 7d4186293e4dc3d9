//! Ingestion feeds: file replay and a synthetic quote generator.
//!
//! Feeds are external collaborators of the engine: they push records through
//! [`BookManager::ingest_record`] one at a time and own the pacing policy.
//! A malformed record is reported and dropped, never fatal; an unreadable
//! feed terminates with an error, leaving already-ingested state intact.

use crate::quotebook::BookManager;
use crate::utils::current_time_millis;
use rand::Rng;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{error, info, warn};

/// Instruments the synthetic generator quotes by default.
const DEFAULT_INSTRUMENTS: [&str; 3] = ["BTCUSD", "ETHUSD", "SOLUSD"];

/// Randomized delay between ingested records, in milliseconds.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Minimum delay (inclusive).
    pub min_ms: u64,
    /// Maximum delay (exclusive).
    pub max_ms: u64,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            min_ms: 10,
            max_ms: 500,
        }
    }
}

impl Pacing {
    fn sleep(&self) {
        let delay = rand::thread_rng().gen_range(self.min_ms..self.max_ms);
        thread::sleep(Duration::from_millis(delay));
    }
}

/// Outcome counters for one feed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Records parsed and applied to a book.
    pub applied: usize,
    /// Malformed records reported and dropped.
    pub dropped: usize,
}

/// Replay a line-oriented quote file into the registry.
///
/// Malformed lines are logged and counted as dropped; the replay continues.
/// With `pacing` set, the feed sleeps a randomized delay between records.
///
/// # Errors
/// Returns the I/O error if the file cannot be opened or read. State ingested
/// before the failure is preserved.
pub fn replay_file(
    path: impl AsRef<Path>,
    manager: &BookManager,
    pacing: Option<Pacing>,
) -> io::Result<FeedStats> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut stats = FeedStats::default();

    for line in reader.lines() {
        let line = line?;
        apply_record(manager, &line, &mut stats);
        if let Some(pacing) = pacing {
            pacing.sleep();
        }
    }

    info!(
        "Feed {}: replay finished, {} applied, {} dropped",
        path.display(),
        stats.applied,
        stats.dropped
    );
    Ok(stats)
}

/// Generate and ingest `count` synthetic quotes.
pub fn run_synthetic(manager: &BookManager, count: usize, pacing: Option<Pacing>) -> FeedStats {
    let generator = QuoteGenerator::default();
    let mut stats = FeedStats::default();

    for _ in 0..count {
        let record = generator.record();
        apply_record(manager, &record, &mut stats);
        if let Some(pacing) = pacing {
            pacing.sleep();
        }
    }

    stats
}

/// Start a file replay on a background thread.
pub fn spawn_file_replay(
    path: PathBuf,
    manager: Arc<BookManager>,
    pacing: Option<Pacing>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("Feed {}: replay started", path.display());
        if let Err(e) = replay_file(&path, &manager, pacing) {
            error!("Feed {}: replay failed: {}", path.display(), e);
        }
    })
}

/// Start a synthetic feed on a background thread.
pub fn spawn_synthetic(
    manager: Arc<BookManager>,
    count: usize,
    pacing: Option<Pacing>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!("Synthetic feed started");
        let stats = run_synthetic(&manager, count, pacing);
        info!(
            "Synthetic feed finished, {} applied, {} dropped",
            stats.applied, stats.dropped
        );
    })
}

fn apply_record(manager: &BookManager, record: &str, stats: &mut FeedStats) {
    match manager.ingest_record(record) {
        Ok(()) => stats.applied += 1,
        Err(e) => {
            warn!("Quote cannot be parsed: {} ({})", record, e);
            stats.dropped += 1;
        }
    }
}

/// Produces random quote records in the ingestion wire format.
pub struct QuoteGenerator {
    instruments: Vec<String>,
}

impl Default for QuoteGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUMENTS.iter().map(|s| s.to_string()).collect())
    }
}

impl QuoteGenerator {
    /// Generator quoting the given instrument set.
    pub fn new(instruments: Vec<String>) -> Self {
        Self { instruments }
    }

    /// One random record, e.g. `t=1712345678901|i=BTCUSD|p=41.60|q=654.56|s=b`.
    /// Prices fall in (0.01, 999.99), quantities in (0, 10737418.23), each
    /// rendered with one or two fractional digits at random.
    pub fn record(&self) -> String {
        let mut rng = rand::thread_rng();
        let instrument = &self.instruments[rng.gen_range(0..self.instruments.len())];
        let price = random_amount(&mut rng, 0.01, 999.99);
        let quantity = random_amount(&mut rng, 0.0, 10737418.23);
        let side = if rng.gen_bool(0.5) { 'b' } else { 's' };
        format!(
            "t={}|i={}|p={}|q={}|s={}",
            current_time_millis(),
            instrument,
            price,
            quantity,
            side
        )
    }
}

fn random_amount(rng: &mut impl Rng, low: f64, high: f64) -> String {
    let value = rng.gen_range(low..high);
    if rng.gen_bool(0.5) {
        format!("{:.2}", value)
    } else {
        format!("{:.1}", value)
    }
}

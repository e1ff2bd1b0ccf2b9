//! Jukebox Collections - Demo Entry Point
//!
//! Builds a small dance table, a play queue and a probability table, and
//! prints what the engine reports about them. Set `RUST_LOG=debug` to see
//! the engine diagnostics.

use jukebox_collections::config::CollationConfig;
use jukebox_collections::types::collation;
use jukebox_collections::{IList, ListOrder, NList, Queue, SList};
use tracing_subscriber::EnvFilter;

const FIELD_NAME: i64 = 0;
const FIELD_BPM: i64 = 1;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = CollationConfig::from_env();
    if let Err(err) = collation::init(&config) {
        tracing::warn!(error = %err, "falling back to root collation");
    }

    println!("===========================================");
    println!("  Jukebox Collections");
    println!("===========================================");
    println!("Collation locale: {}", config.locale);
    println!();

    // Dance names sorted by collation
    let mut dances: SList = SList::new("dance-names", ListOrder::Unordered);
    for (name, bpm) in [("Waltz", 90), ("Tango", 64), ("Cha Cha", 120), ("Éclair Swing", 110)] {
        dances.set_num(name, bpm);
    }
    let swaps = dances.sort();
    println!("Dances ({} entries, {} swaps to sort):", dances.len(), swaps);
    let mut cursor = dances.start_iterator();
    while let Some(idx) = dances.iterate_index(&mut cursor) {
        let name = dances.get_key_str_by_index(idx).unwrap_or_default();
        let bpm = dances.get_num_by_index(idx).unwrap_or_default();
        println!("  {:<width$} {:>4} bpm", name, bpm, width = dances.max_key_width());
    }
    println!("  digest: {}", dances.content_digest_hex());
    println!();

    // Record/field table
    let mut table: IList = IList::new("dance-table", ListOrder::Ordered);
    table.set_str(0, FIELD_NAME, "Waltz");
    table.set_num(0, FIELD_BPM, 90);
    table.set_str(1, FIELD_NAME, "Tango");
    table.set_num(1, FIELD_BPM, 64);
    let name = table.get_str(1, FIELD_NAME).unwrap_or("?").to_string();
    let bpm = table.get_num(1, FIELD_BPM).unwrap_or_default();
    println!("Record 1: {name} at {bpm} bpm");
    table.dump_info();

    // Cumulative selection weights
    let mut weights: NList = NList::new("dance-prob-table", ListOrder::Ordered);
    weights.set_double(&0, 0.5);
    weights.set_double(&1, 1.0);
    for draw in [0.25, 0.75] {
        println!("Draw {draw:.2} selects dance {:?}", weights.search_prob_table(draw));
    }
    println!();

    // Play queue
    let mut queue = Queue::new("music-queue");
    for song in ["intro.mp3", "waltz.mp3", "tango.mp3", "cha-cha.mp3", "outro.mp3"] {
        queue.push(song.to_string());
    }
    queue.move_item(1, 3);
    let next = queue.get_by_index(2).cloned().unwrap_or_default();
    println!(
        "Queue of {}: position 2 is {} (walked {} steps)",
        queue.len(),
        next,
        queue.search_distance()
    );
    let mut cursor = queue.start_iterator();
    while let Some(song) = queue.iterate(&mut cursor) {
        println!("  {song}");
    }

    collation::cleanup();
}

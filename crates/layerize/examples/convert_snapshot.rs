//! Convert a snapshot file and print the nested layer tree as JSON.
//!
//! Usage: cargo run --example convert_snapshot -- page.json

use layerize::{ConvertOptions, Snapshot, convert};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: convert_snapshot <snapshot.json>")?;

    let snapshot = Snapshot::open_file(&path)?;
    let outcome = convert(&snapshot, &ConvertOptions::nested())?;

    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    println!("{}", serde_json::to_string_pretty(&outcome.value)?);
    Ok(())
}

use std::path::Path;

use layerize::Snapshot;
use layerize::layerize_snapshot::{Node, descendants};

struct Stats {
    elements: usize,
    text_runs: usize,
    max_depth: usize,
}

fn collect_stats(snapshot: &Snapshot) -> Stats {
    let mut stats = Stats {
        elements: 1, // the root element
        text_runs: 0,
        max_depth: 0,
    };
    for id in descendants(snapshot, snapshot.root()) {
        match snapshot.node(id) {
            Node::Element(_) => stats.elements += 1,
            Node::Text(_) => stats.text_runs += 1,
        }

        let mut depth = 0;
        let mut cursor = snapshot.parent(id);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = snapshot.parent(parent);
        }
        stats.max_depth = stats.max_depth.max(depth);
    }
    stats
}

pub fn run(file: &Path, json: bool) -> Result<(), i32> {
    let snapshot = Snapshot::open_file(file).map_err(|e| {
        eprintln!("Error reading {}: {e}", file.display());
        2
    })?;

    let stats = collect_stats(&snapshot);

    if json {
        let value = serde_json::json!({
            "viewportWidth": snapshot.viewport_width,
            "scrollHeight": snapshot.scroll_height,
            "elements": stats.elements,
            "textRuns": stats.text_runs,
            "maxDepth": stats.max_depth,
        });
        println!("{value}");
    } else {
        println!(
            "Viewport: {} x {}",
            snapshot.viewport_width, snapshot.scroll_height
        );
        println!("Elements: {}", stats.elements);
        println!("Text runs: {}", stats.text_runs);
        println!("Max depth: {}", stats.max_depth);
    }
    Ok(())
}

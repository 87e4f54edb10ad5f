//! Performance benchmarks for layerize.
//!
//! Benchmarks cover the full conversion pipeline (extraction plus
//! hierarchy reconstruction) across three generated snapshot sizes:
//! - Simple: a handful of styled boxes
//! - Medium: a card grid with text
//! - Complex: a deep page with mixed borders, shadows, and media

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use layerize::{ConvertOptions, Snapshot, convert};

// ---------------------------------------------------------------------------
// Snapshot fixture generators
// ---------------------------------------------------------------------------

/// One styled card with a text run, positioned in a grid.
fn card(index: usize) -> String {
    let x = (index % 10) * 120;
    let y = (index / 10) * 90;
    format!(
        r#"{{
            "tag": "div",
            "rect": {{"left": {x}, "top": {y}, "width": 110, "height": 80}},
            "styles": {{
                "backgroundColor": "rgb(245, 245, 245)",
                "borderRadius": "6px",
                "boxShadow": "0px 1px 3px rgba(0, 0, 0, 0.2)",
                "color": "rgb(30, 30, 30)",
                "lineHeight": "20px"
            }},
            "children": [
                {{"text": "card {index}", "rect": {{"left": {tx}, "top": {ty}, "width": 80, "height": 14}}}}
            ]
        }}"#,
        tx = x + 10,
        ty = y + 10,
    )
}

/// A grid page of `cards` cards under one wrapper section.
fn grid_snapshot(cards: usize) -> Snapshot {
    let children: Vec<String> = (0..cards).map(card).collect();
    let height = (cards / 10 + 1) * 90;
    let json = format!(
        r#"{{
            "viewportWidth": 1280,
            "scrollHeight": {height},
            "root": {{
                "tag": "body",
                "rect": {{"left": 0, "top": 0, "width": 1280, "height": {height}}},
                "children": [
                    {{
                        "tag": "section",
                        "rect": {{"left": 0, "top": 0, "width": 1280, "height": {height}}},
                        "children": [{}]
                    }}
                ]
            }}
        }}"#,
        children.join(",")
    );
    Snapshot::from_json(&json).expect("generated snapshot is valid")
}

fn bench_flat(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_flat");
    for (name, cards) in [("simple", 5), ("medium", 100), ("complex", 500)] {
        let snapshot = grid_snapshot(cards);
        let options = ConvertOptions::default();
        group.bench_function(name, |b| {
            b.iter(|| convert(black_box(&snapshot), black_box(&options)).unwrap())
        });
    }
    group.finish();
}

fn bench_nested(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert_nested");
    for (name, cards) in [("simple", 5), ("medium", 100), ("complex", 500)] {
        let snapshot = grid_snapshot(cards);
        let options = ConvertOptions::nested();
        group.bench_function(name, |b| {
            b.iter(|| convert(black_box(&snapshot), black_box(&options)).unwrap())
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let json = {
        let children: Vec<String> = (0..200).map(card).collect();
        format!(
            r#"{{"viewportWidth": 1280, "scrollHeight": 1800,
                "root": {{"tag": "body",
                          "rect": {{"left": 0, "top": 0, "width": 1280, "height": 1800}},
                          "children": [{}]}}}}"#,
            children.join(",")
        )
    };
    c.bench_function("snapshot_decode", |b| {
        b.iter(|| Snapshot::from_json(black_box(&json)).unwrap())
    });
}

criterion_group!(benches, bench_flat, bench_nested, bench_decode);
criterion_main!(benches);

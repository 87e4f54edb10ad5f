use std::fs;
use std::path::Path;

use layerize::{ConvertOptions, OutputMode, Snapshot, convert};

/// Exit code 2: the snapshot could not be read or decoded.
/// Exit code 1: conversion or output writing failed.
pub fn run(
    file: &Path,
    selector: Option<&str>,
    nested: bool,
    pretty: bool,
    output: Option<&Path>,
    quiet: bool,
) -> Result<(), i32> {
    let snapshot = Snapshot::open_file(file).map_err(|e| {
        eprintln!("Error reading {}: {e}", file.display());
        2
    })?;

    let options = ConvertOptions {
        selector: selector.map(str::to_string),
        mode: if nested {
            OutputMode::Nested
        } else {
            OutputMode::Flat
        },
        collect_warnings: !quiet,
        ..ConvertOptions::default()
    };

    let outcome = convert(&snapshot, &options).map_err(|e| {
        eprintln!("Conversion failed: {e}");
        1
    })?;

    if !quiet {
        for warning in &outcome.warnings {
            eprintln!("warning: {warning}");
        }
    }

    let json = if pretty {
        serde_json::to_string_pretty(&outcome.value)
    } else {
        serde_json::to_string(&outcome.value)
    }
    .map_err(|e| {
        eprintln!("Serialization failed: {e}");
        1
    })?;

    match output {
        Some(path) => fs::write(path, json).map_err(|e| {
            eprintln!("Error writing {}: {e}", path.display());
            1
        })?,
        None => println!("{json}"),
    }
    Ok(())
}

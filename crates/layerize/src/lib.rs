//! layerize: Convert rendered-document snapshots into design layer trees.
//!
//! This is the public API facade crate. It re-exports types from
//! layerize-core and uses layerize-snapshot for decoding captured pages.
//!
//! # Architecture
//!
//! - **layerize-core**: Backend-independent data types and algorithms
//! - **layerize-snapshot**: The rendered-document capture model
//! - **layerize** (this crate): Extraction pass and the `convert` API
//!
//! # Example
//!
//! ```no_run
//! use layerize::{ConvertOptions, Snapshot, convert};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let snapshot = Snapshot::open_file("page.json")?;
//! let outcome = convert(&snapshot, &ConvertOptions::nested())?;
//! for warning in &outcome.warnings {
//!     eprintln!("{warning}");
//! }
//! println!("{} top-level layers", outcome.value.len());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod convert;

pub use layerize_core;
pub use layerize_snapshot;

pub use builder::LayerBuilder;
pub use convert::{convert, convert_file};
pub use layerize_core::error::{
    ConvertError, ConvertOptions, ConvertOutcome, ConvertWarning, ConvertWarningCode, OutputMode,
};
pub use layerize_core::layer::{LayerNode, Paint, ScaleMode, ShadowEffect, ShadowKind};
pub use layerize_snapshot::{Snapshot, SnapshotError};

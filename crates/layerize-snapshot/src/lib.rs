//! layerize-snapshot: Rendered-document snapshot model.
//!
//! Decodes the JSON capture of a rendered page (element tree with resolved
//! computed styles and layout boxes, measured text runs, document metrics)
//! into arena storage with parent links, and provides the traversal
//! helpers the conversion pipeline consumes.

pub mod document;
pub mod error;
pub mod walk;

pub use document::{Element, Node, ScopedTree, Snapshot, TextRun};
pub use error::SnapshotError;
pub use walk::{Descendants, descendants, in_vector_subtree, is_hidden};

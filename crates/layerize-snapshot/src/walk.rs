//! Snapshot traversal helpers.

use layerize_core::nesting::SourceId;

use crate::document::{Node, Snapshot};

/// Pre-order iterator over the descendants of a node, excluding the node
/// itself, in document order.
pub struct Descendants<'a> {
    snapshot: &'a Snapshot,
    stack: Vec<SourceId>,
}

impl Iterator for Descendants<'_> {
    type Item = SourceId;

    fn next(&mut self) -> Option<SourceId> {
        let id = self.stack.pop()?;
        for &child in self.snapshot.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

/// Descendants of `start` in document order, excluding `start`.
pub fn descendants(snapshot: &Snapshot, start: SourceId) -> Descendants<'_> {
    let stack = snapshot.children(start).iter().rev().copied().collect();
    Descendants { snapshot, stack }
}

/// Whether a node is hidden by its own styles or any ancestor's, up to and
/// including `boundary`. Text runs inherit visibility from their ancestors.
pub fn is_hidden(snapshot: &Snapshot, id: SourceId, boundary: SourceId) -> bool {
    let mut cursor = Some(id);
    while let Some(node) = cursor {
        if let Node::Element(element) = snapshot.node(node) {
            if element.styles.get("display") == Some("none")
                || element.styles.get("visibility") == Some("hidden")
            {
                return true;
            }
        }
        if node == boundary {
            break;
        }
        cursor = snapshot.parent(node);
    }
    false
}

/// Whether a node sits strictly inside an `svg` element (not counting the
/// node itself), up to `boundary`. Vector content is absorbed by its root
/// element and must not produce layers of its own.
pub fn in_vector_subtree(snapshot: &Snapshot, id: SourceId, boundary: SourceId) -> bool {
    if id == boundary {
        return false;
    }
    let mut cursor = snapshot.parent(id);
    while let Some(node) = cursor {
        if let Node::Element(element) = snapshot.node(node) {
            if element.tag.eq_ignore_ascii_case("svg") {
                return true;
            }
        }
        if node == boundary {
            break;
        }
        cursor = snapshot.parent(node);
    }
    false
}

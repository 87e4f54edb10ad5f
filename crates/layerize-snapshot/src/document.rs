//! Snapshot decoding and arena storage.
//!
//! A snapshot is a JSON capture of a rendered page produced by an external
//! collaborator: an element tree with resolved computed styles and layout
//! boxes, interleaved with measured text runs, plus document metrics. The
//! raw nested form is flattened into an arena with parent links so node
//! identity is a plain index ([`SourceId`]).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use layerize_core::geometry::LayoutRect;
use layerize_core::nesting::{SourceId, SourceTree};
use layerize_core::style::ComputedStyle;
use serde::Deserialize;

use crate::error::SnapshotError;

/// Raw top-level snapshot document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    viewport_width: f64,
    scroll_height: f64,
    root: RawNode,
}

/// Raw tree node: elements carry `tag`, text runs carry `text`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Element {
        tag: String,
        rect: LayoutRect,
        #[serde(default)]
        styles: ComputedStyle,
        #[serde(default)]
        attributes: HashMap<String, String>,
        #[serde(default)]
        markup: Option<String>,
        #[serde(default)]
        children: Vec<RawNode>,
    },
    Text {
        text: String,
        rect: LayoutRect,
    },
}

/// A rendered element: tag, resolved styles, layout box, and the capture
/// attributes the conversion consumes (`id`, `class`, `src`, `poster`).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub styles: ComputedStyle,
    pub rect: LayoutRect,
    pub attributes: HashMap<String, String>,
    /// Raw outer markup, captured for vector roots only.
    pub markup: Option<String>,
}

impl Element {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// A measured text run with whitespace-significant content.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub content: String,
    pub rect: LayoutRect,
}

/// One snapshot node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(TextRun),
}

/// A decoded snapshot, flattened into index-addressed storage.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub viewport_width: f64,
    pub scroll_height: f64,
    nodes: Vec<Node>,
    parents: Vec<Option<SourceId>>,
    children: Vec<Vec<SourceId>>,
    root: SourceId,
}

impl Snapshot {
    /// Decode a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let raw: RawSnapshot = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Read and decode a snapshot file.
    pub fn open_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn from_raw(raw: RawSnapshot) -> Result<Self, SnapshotError> {
        if raw.viewport_width < 1.0 || raw.scroll_height < 1.0 {
            return Err(SnapshotError::Invalid(format!(
                "degenerate document metrics: {} x {}",
                raw.viewport_width, raw.scroll_height
            )));
        }
        if matches!(raw.root, RawNode::Text { .. }) {
            return Err(SnapshotError::Invalid(
                "snapshot root must be an element".to_string(),
            ));
        }

        let mut snapshot = Self {
            viewport_width: raw.viewport_width,
            scroll_height: raw.scroll_height,
            nodes: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            root: SourceId::new(0),
        };
        snapshot.root = snapshot.intern(raw.root, None);
        Ok(snapshot)
    }

    fn intern(&mut self, raw: RawNode, parent: Option<SourceId>) -> SourceId {
        let id = SourceId::new(self.nodes.len());
        let raw_children = match raw {
            RawNode::Element {
                tag,
                rect,
                styles,
                attributes,
                markup,
                children,
            } => {
                self.nodes.push(Node::Element(Element {
                    tag,
                    styles,
                    rect,
                    attributes,
                    markup,
                }));
                children
            }
            RawNode::Text { text, rect } => {
                self.nodes.push(Node::Text(TextRun {
                    content: text,
                    rect,
                }));
                Vec::new()
            }
        };
        self.parents.push(parent);
        self.children.push(Vec::new());

        for child in raw_children {
            let child_id = self.intern(child, Some(id));
            self.children[id.index()].push(child_id);
        }
        id
    }

    pub fn root(&self) -> SourceId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: SourceId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The node as an element, if it is one.
    pub fn element(&self, id: SourceId) -> Option<&Element> {
        match self.node(id) {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// The node as a text run, if it is one.
    pub fn text(&self, id: SourceId) -> Option<&TextRun> {
        match self.node(id) {
            Node::Text(run) => Some(run),
            Node::Element(_) => None,
        }
    }

    pub fn parent(&self, id: SourceId) -> Option<SourceId> {
        self.parents[id.index()]
    }

    pub fn children(&self, id: SourceId) -> &[SourceId] {
        &self.children[id.index()]
    }

    /// Resolve a root selector against the element tree, in document order.
    ///
    /// Supported forms: `#id` (exact `id` attribute), `.class` (member of
    /// the whitespace-separated `class` attribute), anything else is a
    /// case-insensitive tag name.
    pub fn select(&self, selector: &str) -> Option<SourceId> {
        let matches = |element: &Element| -> bool {
            if let Some(id) = selector.strip_prefix('#') {
                element.attribute("id") == Some(id)
            } else if let Some(class) = selector.strip_prefix('.') {
                element
                    .attribute("class")
                    .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
            } else {
                element.tag.eq_ignore_ascii_case(selector)
            }
        };

        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if let Some(element) = self.element(id) {
                if matches(element) {
                    return Some(id);
                }
            }
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// Ancestor view scoped to `boundary` for hierarchy reconstruction:
    /// walks stop at the selected conversion root.
    pub fn scoped(&self, boundary: SourceId) -> ScopedTree<'_> {
        ScopedTree {
            snapshot: self,
            boundary,
        }
    }
}

/// [`SourceTree`] adapter over a snapshot, bounded at the selected root.
pub struct ScopedTree<'a> {
    snapshot: &'a Snapshot,
    boundary: SourceId,
}

impl SourceTree for ScopedTree<'_> {
    fn parent(&self, node: SourceId) -> Option<SourceId> {
        self.snapshot.parent(node)
    }

    fn is_boundary(&self, node: SourceId) -> bool {
        node == self.boundary
    }
}

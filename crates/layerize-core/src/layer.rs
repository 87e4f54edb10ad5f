//! The layer data model.
//!
//! Two representations live here:
//!
//! - [`Layer`] / [`LayerArena`] — the mutable working form used during
//!   extraction and hierarchy reconstruction. Layers are stored in an
//!   id-indexed arena so reconstruction can re-parent them by relocating
//!   ids; layer payloads are never deep-copied.
//! - [`LayerNode`] — the final serializable tree (or flat sequence). It has
//!   no back-reference field, so materializing an arena into `LayerNode`s
//!   is also what strips construction-only state.

use crate::color::Rgba;
use crate::geometry::PixelRect;
use crate::nesting::SourceId;
use crate::text_style::TextStyle;

/// An RGB color as serialized in paint descriptors, channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// How an image fill is scaled into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ScaleMode {
    /// Cover the box, cropping as needed.
    Fill,
    /// Contain the image within the box.
    Fit,
}

/// A fill or stroke entry.
///
/// Image paints carry only the source URL; fetching the referenced bytes is
/// the upload collaborator's job, outside this pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum Paint {
    Solid {
        color: Color,
        opacity: f64,
    },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Image {
        url: String,
        scale_mode: ScaleMode,
    },
}

impl Paint {
    /// A solid paint from a parsed color; the alpha channel becomes the
    /// paint opacity.
    pub fn solid(color: Rgba) -> Self {
        Paint::Solid {
            color: Color {
                r: color.r,
                g: color.g,
                b: color.b,
            },
            opacity: color.a,
        }
    }

    pub fn image(url: impl Into<String>, scale_mode: ScaleMode) -> Self {
        Paint::Image {
            url: url.into(),
            scale_mode,
        }
    }
}

/// Shadow effect direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum ShadowKind {
    DropShadow,
    InnerShadow,
}

/// Shadow offset in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowOffset {
    pub x: f64,
    pub y: f64,
}

/// A single shadow effect descriptor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowEffect {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ShadowKind,
    pub color: Rgba,
    pub offset: ShadowOffset,
    /// Blur radius in pixels.
    pub radius: f64,
    /// Spread radius in pixels.
    pub spread: f64,
}

/// Four independent corner radii. A zero or unparseable radius is absent
/// rather than serialized as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct CornerRadii {
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub top_left_radius: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub top_right_radius: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub bottom_right_radius: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub bottom_left_radius: Option<f64>,
}

impl CornerRadii {
    pub fn is_empty(&self) -> bool {
        self.top_left_radius.is_none()
            && self.top_right_radius.is_none()
            && self.bottom_right_radius.is_none()
            && self.bottom_left_radius.is_none()
    }
}

/// Identifier of a layer within a [`LayerArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

impl LayerId {
    /// Position of this layer in arena insertion (emission) order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Type-specific layer payload in the working representation.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Frame {
        backgrounds: Vec<Paint>,
        clips_content: Option<bool>,
        children: Vec<LayerId>,
    },
    Rectangle {
        fills: Vec<Paint>,
        strokes: Vec<Paint>,
        stroke_weight: Option<i32>,
        radii: CornerRadii,
        effects: Vec<ShadowEffect>,
    },
    Text {
        characters: String,
        fills: Vec<Paint>,
        style: TextStyle,
    },
    Vector {
        svg: String,
    },
}

/// One layer in the working arena.
///
/// `source` is the transient back-reference to the snapshot node the layer
/// was derived from. It drives hierarchy reconstruction and never reaches
/// serialized output.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Document-absolute pixel box until coordinate normalization runs.
    pub rect: PixelRect,
    /// Back-reference to the originating snapshot node.
    pub source: Option<SourceId>,
    pub data: LayerData,
}

impl Layer {
    /// An empty frame layer.
    pub fn frame(rect: PixelRect, source: Option<SourceId>) -> Self {
        Self {
            rect,
            source,
            data: LayerData::Frame {
                backgrounds: Vec::new(),
                clips_content: None,
                children: Vec::new(),
            },
        }
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.data, LayerData::Frame { .. })
    }
}

/// Id-indexed storage for layers under construction.
///
/// Insertion order is emission (flat/paint) order. Reconstruction moves
/// layer ids between frame children lists; the layers themselves stay put.
#[derive(Debug, Default)]
pub struct LayerArena {
    layers: Vec<Layer>,
}

impl LayerArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.layers.len());
        self.layers.push(layer);
        id
    }

    pub fn get(&self, id: LayerId) -> &Layer {
        &self.layers[id.0]
    }

    pub fn get_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All layer ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        (0..self.layers.len()).map(LayerId)
    }

    /// Children of a layer; empty for non-frames.
    pub fn children(&self, id: LayerId) -> &[LayerId] {
        match &self.layers[id.0].data {
            LayerData::Frame { children, .. } => children,
            _ => &[],
        }
    }

    /// Mutable children list; `None` for non-frames.
    pub fn children_mut(&mut self, id: LayerId) -> Option<&mut Vec<LayerId>> {
        match &mut self.layers[id.0].data {
            LayerData::Frame { children, .. } => Some(children),
            _ => None,
        }
    }

    /// Clear every back-reference in the arena.
    pub fn clear_sources(&mut self) {
        for layer in &mut self.layers {
            layer.source = None;
        }
    }

    /// Materialize the flat sequence in emission order. Frames come out
    /// with empty children; coordinates stay document-absolute.
    pub fn into_flat(self) -> Vec<LayerNode> {
        self.layers.into_iter().map(shallow_node).collect()
    }

    /// Materialize the nested tree rooted at `root`. Layers unreachable
    /// from `root` are dropped.
    pub fn into_nested(mut self, root: LayerId) -> LayerNode {
        self.take_node(root)
    }

    fn take_node(&mut self, id: LayerId) -> LayerNode {
        let placeholder = Layer::frame(PixelRect::new(0, 0, 0, 0), None);
        let layer = std::mem::replace(&mut self.layers[id.0], placeholder);

        match layer.data {
            LayerData::Frame {
                backgrounds,
                clips_content,
                children,
            } => {
                let children = children
                    .into_iter()
                    .map(|child| self.take_node(child))
                    .collect();
                LayerNode::Frame {
                    x: layer.rect.x,
                    y: layer.rect.y,
                    width: layer.rect.width,
                    height: layer.rect.height,
                    backgrounds,
                    clips_content,
                    children,
                }
            }
            data => shallow_node(Layer {
                rect: layer.rect,
                source: None,
                data,
            }),
        }
    }
}

fn shallow_node(layer: Layer) -> LayerNode {
    let PixelRect {
        x,
        y,
        width,
        height,
    } = layer.rect;

    match layer.data {
        LayerData::Frame {
            backgrounds,
            clips_content,
            ..
        } => LayerNode::Frame {
            x,
            y,
            width,
            height,
            backgrounds,
            clips_content,
            children: Vec::new(),
        },
        LayerData::Rectangle {
            fills,
            strokes,
            stroke_weight,
            radii,
            effects,
        } => LayerNode::Rectangle {
            x,
            y,
            width,
            height,
            fills,
            strokes,
            stroke_weight,
            radii,
            effects,
        },
        LayerData::Text {
            characters,
            fills,
            style,
        } => LayerNode::Text {
            x,
            y,
            width,
            height,
            characters,
            fills,
            style,
        },
        LayerData::Vector { svg } => LayerNode::Vector {
            x,
            y,
            width,
            height,
            svg,
        },
    }
}

/// One element of the final design tree.
///
/// Serialized with a `type` discriminator (`FRAME` | `RECTANGLE` | `TEXT` |
/// `VECTOR`) and camelCase fields; absent optionals are omitted entirely.
/// `x`/`y` are parent-relative in nested output and document-absolute in
/// flat output; `width`/`height` are always ≥ 1.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum LayerNode {
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Frame {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Vec::is_empty", default)
        )]
        backgrounds: Vec<Paint>,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Option::is_none", default)
        )]
        clips_content: Option<bool>,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Vec::is_empty", default)
        )]
        children: Vec<LayerNode>,
    },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Rectangle {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Vec::is_empty", default)
        )]
        fills: Vec<Paint>,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Vec::is_empty", default)
        )]
        strokes: Vec<Paint>,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Option::is_none", default)
        )]
        stroke_weight: Option<i32>,
        #[cfg_attr(feature = "serde", serde(flatten))]
        radii: CornerRadii,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Vec::is_empty", default)
        )]
        effects: Vec<ShadowEffect>,
    },
    #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
    Text {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        characters: String,
        #[cfg_attr(
            feature = "serde",
            serde(skip_serializing_if = "Vec::is_empty", default)
        )]
        fills: Vec<Paint>,
        #[cfg_attr(feature = "serde", serde(flatten))]
        style: TextStyle,
    },
    Vector {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        svg: String,
    },
}

impl LayerNode {
    /// The node's position, whichever variant it is.
    pub fn position(&self) -> (i32, i32) {
        match self {
            LayerNode::Frame { x, y, .. }
            | LayerNode::Rectangle { x, y, .. }
            | LayerNode::Text { x, y, .. }
            | LayerNode::Vector { x, y, .. } => (*x, *y),
        }
    }

    /// The node's size, whichever variant it is.
    pub fn size(&self) -> (i32, i32) {
        match self {
            LayerNode::Frame { width, height, .. }
            | LayerNode::Rectangle { width, height, .. }
            | LayerNode::Text { width, height, .. }
            | LayerNode::Vector { width, height, .. } => (*width, *height),
        }
    }

    /// Children of a frame; empty for every other variant.
    pub fn children(&self) -> &[LayerNode] {
        match self {
            LayerNode::Frame { children, .. } => children,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_layer(x: i32, y: i32) -> Layer {
        Layer {
            rect: PixelRect::new(x, y, 10, 10),
            source: Some(SourceId::new(1)),
            data: LayerData::Rectangle {
                fills: vec![Paint::solid(Rgba::new(1.0, 0.0, 0.0, 1.0))],
                strokes: Vec::new(),
                stroke_weight: None,
                radii: CornerRadii::default(),
                effects: Vec::new(),
            },
        }
    }

    #[test]
    fn arena_preserves_insertion_order() {
        let mut arena = LayerArena::new();
        let a = arena.push(Layer::frame(PixelRect::new(0, 0, 100, 100), None));
        let b = arena.push(rect_layer(1, 1));
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn into_flat_drops_children_and_sources() {
        let mut arena = LayerArena::new();
        let root = arena.push(Layer::frame(PixelRect::new(0, 0, 100, 100), None));
        let child = arena.push(rect_layer(5, 5));
        arena.children_mut(root).unwrap().push(child);

        let flat = arena.into_flat();
        assert_eq!(flat.len(), 2);
        assert!(flat[0].children().is_empty());
    }

    #[test]
    fn into_nested_builds_recursive_tree() {
        let mut arena = LayerArena::new();
        let root = arena.push(Layer::frame(PixelRect::new(0, 0, 100, 100), None));
        let child = arena.push(rect_layer(5, 5));
        arena.children_mut(root).unwrap().push(child);

        let tree = arena.into_nested(root);
        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.children()[0].position(), (5, 5));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialized_output_has_no_back_reference() {
        let mut arena = LayerArena::new();
        let root = arena.push(Layer::frame(PixelRect::new(0, 0, 100, 100), None));
        let child = arena.push(rect_layer(5, 5));
        arena.children_mut(root).unwrap().push(child);

        let json = serde_json::to_string(&arena.into_nested(root)).unwrap();
        assert!(!json.contains("source"));
        assert!(json.contains("\"type\":\"FRAME\""));
        assert!(json.contains("\"type\":\"RECTANGLE\""));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn absent_radii_are_omitted() {
        let node = shallow_node(rect_layer(0, 0));
        let json = serde_json::to_string(&node).unwrap();
        assert!(!json.contains("topLeftRadius"));
        assert!(!json.contains("strokeWeight"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn paint_serialization_shapes() {
        let solid = Paint::solid(Rgba::new(1.0, 0.0, 0.0, 0.5));
        let json = serde_json::to_value(&solid).unwrap();
        assert_eq!(json["type"], "SOLID");
        assert_eq!(json["opacity"], 0.5);

        let image = Paint::image("https://example.com/a.png", ScaleMode::Fit);
        let json = serde_json::to_value(&image).unwrap();
        assert_eq!(json["type"], "IMAGE");
        assert_eq!(json["scaleMode"], "FIT");
    }
}

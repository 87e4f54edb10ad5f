//! layerize-core: Backend-independent data types and algorithms.
//!
//! This crate provides the foundational types (rectangles, colors, paints,
//! the layer arena) and algorithms (style diffing, border and shadow
//! parsing, hierarchy reconstruction) used by layerize. Its only runtime
//! dependency is `regex`; serialization support is feature-gated behind
//! `serde`.

pub mod border;
pub mod color;
pub mod css;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod nesting;
pub mod shadow;
pub mod style;
pub mod text_style;

pub use border::{BorderEdge, BorderShorthand, Hairline, UniformStroke, edge_hairlines, uniform_stroke};
pub use color::{Rgba, is_transparent_color, parse_color};
pub use css::{background_image_url, corner_radii, parse_px};
pub use error::{
    ConvertError, ConvertOptions, ConvertOutcome, ConvertWarning, ConvertWarningCode, OutputMode,
};
pub use geometry::{LayoutRect, PixelRect, round_px};
pub use layer::{
    CornerRadii, Layer, LayerArena, LayerData, LayerId, LayerNode, Paint, ScaleMode, ShadowEffect,
    ShadowKind, ShadowOffset,
};
pub use nesting::{SourceId, SourceTree, reconstruct};
pub use shadow::{BoxShadow, ShadowParse, parse_box_shadow};
pub use style::{ComputedStyle, StyleProperty, applied_styles};
pub use text_style::{
    TextAlignHorizontal, TextCase, TextDecoration, TextStyle, collapse_whitespace, text_fill,
    text_style,
};

#[cfg(test)]
mod tests {
    #[test]
    fn crate_compiles() {
        assert_eq!(2 + 2, 4);
    }
}

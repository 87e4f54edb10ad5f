//! Flat layer extraction.
//!
//! [`LayerBuilder`] makes a single pass over the descendants of the
//! selected root, in document order, and emits a flat sequence of layers
//! with document-absolute pixel boxes. Every emitted layer records the
//! snapshot node it came from; hierarchy reconstruction consumes those
//! back-references afterwards.

use layerize_core::border::{edge_hairlines, uniform_stroke};
use layerize_core::color::parse_color;
use layerize_core::css::{
    background_image_url, corner_radii, parse_px, scale_mode_from_background_size,
    scale_mode_from_object_fit,
};
use layerize_core::error::{ConvertWarning, ConvertWarningCode};
use layerize_core::geometry::{PixelRect, round_px};
use layerize_core::layer::{
    CornerRadii, Layer, LayerArena, LayerData, LayerId, Paint, ShadowEffect, ShadowKind,
    ShadowOffset,
};
use layerize_core::nesting::SourceId;
use layerize_core::shadow::{ShadowParse, parse_box_shadow};
use layerize_core::style::applied_styles;
use layerize_core::text_style::{collapse_whitespace, text_fill, text_style};
use layerize_snapshot::{Element, Snapshot, descendants, in_vector_subtree, is_hidden};

/// Single-pass extractor from a snapshot subtree to flat layers.
pub struct LayerBuilder<'a> {
    snapshot: &'a Snapshot,
    root_source: SourceId,
    arena: LayerArena,
    root: LayerId,
    warnings: Vec<ConvertWarning>,
}

impl<'a> LayerBuilder<'a> {
    /// Start a build rooted at `root_source`. The first layer pushed is
    /// the synthetic root frame: viewport width by scroll height, at the
    /// document origin.
    pub fn new(snapshot: &'a Snapshot, root_source: SourceId) -> Self {
        let mut arena = LayerArena::new();
        let rect = PixelRect::new(
            0,
            0,
            round_px(snapshot.viewport_width),
            round_px(snapshot.scroll_height),
        );
        let root = arena.push(Layer::frame(rect, Some(root_source)));
        Self {
            snapshot,
            root_source,
            arena,
            root,
            warnings: Vec::new(),
        }
    }

    /// Run the element pass, then the text-run pass.
    pub fn build(&mut self) {
        self.build_elements();
        self.build_text_runs();
    }

    /// The arena, the root frame id, and the collected warnings.
    pub fn finish(self) -> (LayerArena, LayerId, Vec<ConvertWarning>) {
        (self.arena, self.root, self.warnings)
    }

    fn build_elements(&mut self) {
        for id in descendants(self.snapshot, self.root_source) {
            let Some(element) = self.snapshot.element(id) else {
                continue;
            };
            if is_hidden(self.snapshot, id, self.root_source)
                || in_vector_subtree(self.snapshot, id, self.root_source)
            {
                continue;
            }

            if element.tag.eq_ignore_ascii_case("svg") {
                self.emit_vector(id, element);
                continue;
            }
            self.emit_element(id, element);
        }
    }

    /// A vector root absorbs its whole subtree as raw markup.
    fn emit_vector(&mut self, id: SourceId, element: &Element) {
        let Some(markup) = &element.markup else {
            self.warnings.push(
                ConvertWarning::with_code(
                    ConvertWarningCode::MalformedStyle,
                    "vector element without captured markup",
                )
                .on_element(&element.tag)
                .at_node(id.index()),
            );
            return;
        };
        let rect = PixelRect::from_layout(&element.rect);
        if !rect.is_renderable() {
            self.warn_degenerate(id, &element.tag);
            return;
        }
        self.arena.push(Layer {
            rect,
            source: Some(id),
            data: LayerData::Vector {
                svg: markup.clone(),
            },
        });
    }

    fn emit_element(&mut self, id: SourceId, element: &Element) {
        let styles = &element.styles;
        let tag = element.tag.to_ascii_lowercase();
        let is_media = matches!(tag.as_str(), "img" | "video");

        // An element yields a layer only if some recognized style departs
        // from its resolved default, or it is a media element.
        if applied_styles(styles).is_empty() && !is_media {
            return;
        }

        let rect = PixelRect::from_layout(&element.rect);
        if !rect.is_renderable() {
            self.warn_degenerate(id, &element.tag);
            return;
        }

        let mut fills: Vec<Paint> = Vec::new();
        if let Some(color) = styles.get("backgroundColor").and_then(parse_color) {
            fills.push(Paint::solid(color));
        }
        if let Some(url) = styles.get("backgroundImage").and_then(background_image_url) {
            fills.push(Paint::image(
                url,
                scale_mode_from_background_size(styles.get("backgroundSize")),
            ));
        }
        match tag.as_str() {
            "img" => {
                if let Some(src) = element.attribute("src") {
                    fills.push(Paint::image(
                        src,
                        scale_mode_from_object_fit(styles.get("objectFit")),
                    ));
                }
            }
            "video" => {
                if let Some(poster) = element.attribute("poster") {
                    fills.push(Paint::image(
                        poster,
                        scale_mode_from_object_fit(styles.get("objectFit")),
                    ));
                }
            }
            _ => {}
        }

        // Uniform borders become a stroke on the rectangle itself. Mixed
        // edges are synthesized as hairline siblings, pushed before the
        // owning rectangle so it paints above them.
        let mut strokes: Vec<Paint> = Vec::new();
        let mut stroke_weight = None;
        match uniform_stroke(styles) {
            Some(stroke) => {
                strokes.push(Paint::solid(stroke.color));
                stroke_weight = Some(stroke.weight);
            }
            None => {
                for hairline in edge_hairlines(styles, &rect) {
                    self.arena.push(Layer {
                        rect: hairline.rect,
                        source: Some(id),
                        data: LayerData::Rectangle {
                            fills: vec![Paint::solid(hairline.color)],
                            strokes: Vec::new(),
                            stroke_weight: None,
                            radii: CornerRadii::default(),
                            effects: Vec::new(),
                        },
                    });
                }
            }
        }

        let mut effects: Vec<ShadowEffect> = Vec::new();
        if let Some(value) = styles.get("boxShadow") {
            match parse_box_shadow(value) {
                ShadowParse::Visible(shadow) => effects.push(ShadowEffect {
                    kind: if shadow.inset {
                        ShadowKind::InnerShadow
                    } else {
                        ShadowKind::DropShadow
                    },
                    color: shadow.color,
                    offset: ShadowOffset {
                        x: shadow.offset_x,
                        y: shadow.offset_y,
                    },
                    radius: shadow.blur_radius,
                    spread: shadow.spread_radius,
                }),
                ShadowParse::Invisible => {}
                ShadowParse::Invalid => self.warnings.push(
                    ConvertWarning::with_code(
                        ConvertWarningCode::MalformedStyle,
                        format!("boxShadow value did not yield an effect: {value:?}"),
                    )
                    .on_element(&element.tag)
                    .at_node(id.index()),
                ),
            }
        }

        self.arena.push(Layer {
            rect,
            source: Some(id),
            data: LayerData::Rectangle {
                fills,
                strokes,
                stroke_weight,
                radii: corner_radii(styles),
                effects,
            },
        });
    }

    fn build_text_runs(&mut self) {
        for id in descendants(self.snapshot, self.root_source) {
            let Some(run) = self.snapshot.text(id) else {
                continue;
            };
            if run.content.trim().is_empty() {
                continue;
            }
            if is_hidden(self.snapshot, id, self.root_source)
                || in_vector_subtree(self.snapshot, id, self.root_source)
            {
                continue;
            }
            let Some(parent_styles) = self
                .snapshot
                .parent(id)
                .and_then(|parent| self.snapshot.element(parent))
                .map(|element| &element.styles)
            else {
                continue;
            };

            // Range-measured boxes hug the glyphs; a box shorter than the
            // line height is expanded symmetrically to match it.
            let mut layout = run.rect;
            if let Some(line_height) = parent_styles.get("lineHeight").and_then(parse_px) {
                if layout.height < line_height {
                    layout.top -= (line_height - layout.height) / 2.0;
                    layout.height = line_height;
                }
            }

            let rect = PixelRect::from_layout(&layout);
            if !rect.is_renderable() {
                self.warn_degenerate(id, "#text");
                continue;
            }

            self.arena.push(Layer {
                rect,
                source: Some(id),
                data: LayerData::Text {
                    characters: collapse_whitespace(&run.content),
                    fills: text_fill(parent_styles).into_iter().collect(),
                    style: text_style(parent_styles),
                },
            });
        }
    }

    fn warn_degenerate(&mut self, id: SourceId, context: &str) {
        self.warnings.push(
            ConvertWarning::with_code(
                ConvertWarningCode::DegenerateBox,
                "box smaller than one pixel, layer skipped",
            )
            .on_element(context)
            .at_node(id.index()),
        );
    }
}

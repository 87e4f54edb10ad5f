//! Border extraction: uniform strokes and per-edge hairline rectangles.
//!
//! A border that resolves to a single uniform shorthand becomes a stroke on
//! the owning rectangle. When the edges differ, each visible edge is
//! instead synthesized as a thin solid rectangle sitting flush against that
//! edge, emitted as a sibling flat layer of the owning box.

use std::sync::OnceLock;

use regex::Regex;

use crate::color::{Rgba, parse_color};
use crate::geometry::{PixelRect, round_px};
use crate::style::ComputedStyle;

/// A parsed `<width>px <style> <color>` border shorthand.
#[derive(Debug, Clone, PartialEq)]
pub struct BorderShorthand {
    /// Border width in pixels.
    pub width: f64,
    /// Border line style keyword (`solid`, `dashed`, `none`, …).
    pub line_style: String,
    /// The raw color remainder of the declaration.
    pub color: String,
}

fn border_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([\d.]+)px\s*(\w+)\s*(.*)$").expect("border regex is valid"))
}

/// Parse a resolved border shorthand string.
pub fn parse_border_shorthand(value: &str) -> Option<BorderShorthand> {
    let caps = border_regex().captures(value)?;
    Some(BorderShorthand {
        width: caps.get(1)?.as_str().parse().ok()?,
        line_style: caps.get(2)?.as_str().to_string(),
        color: caps.get(3)?.as_str().to_string(),
    })
}

impl BorderShorthand {
    /// Whether this border paints anything: non-zero width, a real line
    /// style, and a color that parses to something visible.
    pub fn visible_color(&self) -> Option<Rgba> {
        if self.width == 0.0 || self.line_style == "none" {
            return None;
        }
        parse_color(&self.color)
    }
}

/// A uniform border expressed as stroke data for the owning rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformStroke {
    pub color: Rgba,
    /// Stroke weight, rounded to whole pixels.
    pub weight: i32,
}

/// Extract a uniform stroke from the `border` shorthand, if all four edges
/// resolved to one description.
pub fn uniform_stroke(style: &ComputedStyle) -> Option<UniformStroke> {
    let shorthand = parse_border_shorthand(style.get("border")?)?;
    let color = shorthand.visible_color()?;
    Some(UniformStroke {
        color,
        weight: round_px(shorthand.width),
    })
}

/// One box edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderEdge {
    Top,
    Left,
    Right,
    Bottom,
}

impl BorderEdge {
    pub const ALL: [BorderEdge; 4] = [
        BorderEdge::Top,
        BorderEdge::Left,
        BorderEdge::Right,
        BorderEdge::Bottom,
    ];

    /// The computed-style key for this edge's shorthand.
    pub fn property(self) -> &'static str {
        match self {
            BorderEdge::Top => "borderTop",
            BorderEdge::Left => "borderLeft",
            BorderEdge::Right => "borderRight",
            BorderEdge::Bottom => "borderBottom",
        }
    }
}

/// A synthesized border-edge rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Hairline {
    pub edge: BorderEdge,
    /// Box flush against the owning rectangle's edge, document-absolute.
    pub rect: PixelRect,
    pub color: Rgba,
}

/// Synthesize hairline rectangles for every edge with a visible border.
///
/// Called only when no uniform stroke was resolved; per the tie-break rule,
/// any edge differing from the others routes all four edges through here.
/// Top and bottom hairlines span the full box width and sit exactly above /
/// below it; left and right hairlines span the full box height and sit
/// exactly beside it. Edges whose width rounds below one pixel are dropped,
/// keeping the 1×1 minimum emission size.
pub fn edge_hairlines(style: &ComputedStyle, rect: &PixelRect) -> Vec<Hairline> {
    let mut hairlines = Vec::new();

    for edge in BorderEdge::ALL {
        let Some(value) = style.get(edge.property()) else {
            continue;
        };
        let Some(shorthand) = parse_border_shorthand(value) else {
            continue;
        };
        let Some(color) = shorthand.visible_color() else {
            continue;
        };

        let weight = round_px(shorthand.width);
        if weight < 1 {
            continue;
        }

        let hairline_rect = match edge {
            BorderEdge::Top => PixelRect::new(rect.x, rect.y - weight, rect.width, weight),
            BorderEdge::Bottom => PixelRect::new(rect.x, rect.bottom(), rect.width, weight),
            BorderEdge::Left => PixelRect::new(rect.x - weight, rect.y, weight, rect.height),
            BorderEdge::Right => PixelRect::new(rect.right(), rect.y, weight, rect.height),
        };

        hairlines.push(Hairline {
            edge,
            rect: hairline_rect,
            color,
        });
    }

    hairlines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthand() {
        let b = parse_border_shorthand("2px solid rgb(255, 0, 0)").unwrap();
        assert_eq!(b.width, 2.0);
        assert_eq!(b.line_style, "solid");
        assert_eq!(b.color, "rgb(255, 0, 0)");
    }

    #[test]
    fn zero_or_none_border_is_invisible() {
        let b = parse_border_shorthand("0px none rgb(0, 0, 0)").unwrap();
        assert_eq!(b.visible_color(), None);

        let b = parse_border_shorthand("2px none rgb(0, 0, 0)").unwrap();
        assert_eq!(b.visible_color(), None);
    }

    #[test]
    fn uniform_stroke_from_border_shorthand() {
        let mut style = ComputedStyle::new();
        style.set("border", "3px solid rgb(0, 0, 255)");
        let stroke = uniform_stroke(&style).unwrap();
        assert_eq!(stroke.weight, 3);
        assert_eq!(stroke.color, Rgba::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn no_uniform_stroke_without_border_key() {
        let mut style = ComputedStyle::new();
        style.set("borderTop", "2px solid rgb(255, 0, 0)");
        assert_eq!(uniform_stroke(&style), None);
    }

    #[test]
    fn top_hairline_sits_above_the_box() {
        let mut style = ComputedStyle::new();
        style.set("borderTop", "2px solid rgb(255, 0, 0)");

        let rect = PixelRect::new(10, 50, 100, 10);
        let hairlines = edge_hairlines(&style, &rect);
        assert_eq!(hairlines.len(), 1);

        let top = &hairlines[0];
        assert_eq!(top.edge, BorderEdge::Top);
        assert_eq!(top.rect, PixelRect::new(10, 48, 100, 2));
        assert_eq!(top.color, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn all_four_edges_are_placed_flush() {
        let mut style = ComputedStyle::new();
        for edge in BorderEdge::ALL {
            style.set(edge.property(), "1px solid rgb(0, 0, 0)");
        }

        let rect = PixelRect::new(0, 0, 20, 30);
        let hairlines = edge_hairlines(&style, &rect);
        assert_eq!(hairlines.len(), 4);

        let by_edge = |edge: BorderEdge| {
            hairlines
                .iter()
                .find(|h| h.edge == edge)
                .map(|h| h.rect)
                .unwrap()
        };
        assert_eq!(by_edge(BorderEdge::Top), PixelRect::new(0, -1, 20, 1));
        assert_eq!(by_edge(BorderEdge::Bottom), PixelRect::new(0, 30, 20, 1));
        assert_eq!(by_edge(BorderEdge::Left), PixelRect::new(-1, 0, 1, 30));
        assert_eq!(by_edge(BorderEdge::Right), PixelRect::new(20, 0, 1, 30));
    }

    #[test]
    fn sub_pixel_edges_are_dropped() {
        let mut style = ComputedStyle::new();
        style.set("borderTop", "0.4px solid rgb(0, 0, 0)");
        assert!(edge_hairlines(&style, &PixelRect::new(0, 0, 10, 10)).is_empty());
    }

    #[test]
    fn transparent_edges_are_dropped() {
        let mut style = ComputedStyle::new();
        style.set("borderTop", "2px solid rgba(0, 0, 0, 0)");
        assert!(edge_hairlines(&style, &PixelRect::new(0, 0, 10, 10)).is_empty());
    }
}

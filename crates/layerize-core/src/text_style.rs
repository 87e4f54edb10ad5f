//! Typography extraction for text layers.

use crate::color::parse_color;
use crate::css::parse_px;
use crate::geometry::round_px;
use crate::layer::Paint;
use crate::style::ComputedStyle;

/// Letter casing applied to rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TextCase {
    Upper,
    Lower,
    Title,
}

/// Text decoration line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TextDecoration {
    Underline,
    Strikethrough,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TextAlignHorizontal {
    Left,
    Center,
    Right,
    Justified,
}

/// Typography attributes of a text layer. Absent attributes are omitted
/// from serialized output.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct TextStyle {
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub font_size: Option<i32>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub font_family: Option<String>,
    /// Letter spacing in pixels.
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub letter_spacing: Option<f64>,
    /// Line height in pixels.
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub line_height: Option<f64>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub text_case: Option<TextCase>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub text_decoration: Option<TextDecoration>,
    #[cfg_attr(
        feature = "serde",
        serde(skip_serializing_if = "Option::is_none", default)
    )]
    pub text_align_horizontal: Option<TextAlignHorizontal>,
}

/// Extract typography attributes from the styled ancestor of a text run.
pub fn text_style(style: &ComputedStyle) -> TextStyle {
    TextStyle {
        font_size: style
            .get("fontSize")
            .and_then(parse_px)
            .map(round_px),
        font_family: style
            .get("fontFamily")
            .filter(|family| !family.is_empty())
            .map(str::to_string),
        letter_spacing: style.get("letterSpacing").and_then(parse_px),
        line_height: style.get("lineHeight").and_then(parse_px),
        text_case: style.get("textTransform").and_then(text_case),
        text_decoration: style.get("textDecoration").and_then(text_decoration),
        text_align_horizontal: style.get("textAlign").and_then(text_align),
    }
}

/// The fill for a text run: its ancestor's resolved text color.
pub fn text_fill(style: &ComputedStyle) -> Option<Paint> {
    parse_color(style.current_color()).map(Paint::solid)
}

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn collapse_whitespace(content: &str) -> String {
    content.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn text_case(value: &str) -> Option<TextCase> {
    match value {
        "uppercase" => Some(TextCase::Upper),
        "lowercase" => Some(TextCase::Lower),
        "capitalize" => Some(TextCase::Title),
        _ => None,
    }
}

fn text_decoration(value: &str) -> Option<TextDecoration> {
    // Computed text-decoration strings carry style and color after the
    // line keyword ("underline solid rgb(0, 0, 0)").
    match value.split_whitespace().next()? {
        "underline" => Some(TextDecoration::Underline),
        "line-through" => Some(TextDecoration::Strikethrough),
        _ => None,
    }
}

fn text_align(value: &str) -> Option<TextAlignHorizontal> {
    match value {
        "left" => Some(TextAlignHorizontal::Left),
        "center" => Some(TextAlignHorizontal::Center),
        "right" => Some(TextAlignHorizontal::Right),
        "justify" | "justified" => Some(TextAlignHorizontal::Justified),
        _ => None,
    }
}

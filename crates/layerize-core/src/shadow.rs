//! Box-shadow string parsing.
//!
//! Computed `box-shadow` strings are awkward: depending on the engine the
//! color token may appear before or after the numeric tokens, and the color
//! itself contains commas and whitespace inside its parentheses. The parser
//! normalizes a leading color to canonical "numerics then color" order and
//! splits only on whitespace outside parentheses.
//!
//! Only a single shadow is supported; for a comma-separated list the first
//! shadow is parsed and the rest are ignored.

use std::sync::OnceLock;

use regex::Regex;

use crate::color::{Rgba, is_transparent_color, parse_color};

/// A parsed box shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxShadow {
    /// Whether the `inset` keyword was present (inner shadow).
    pub inset: bool,
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur_radius: f64,
    pub spread_radius: f64,
    pub color: Rgba,
}

/// Outcome of interpreting a computed `box-shadow` value.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadowParse {
    /// A shadow that paints.
    Visible(BoxShadow),
    /// Valid input with nothing to paint: `none`, empty, or a fully
    /// transparent color.
    Invisible,
    /// Input that could not be interpreted.
    Invalid,
}

fn length_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9.]+[a-zA-Z%]+$").expect("length regex is valid"))
}

/// Whether a token is a plain length (`4px`, `0.5em`, `1%`).
fn is_length(token: &str) -> bool {
    token == "0" || length_regex().is_match(token)
}

/// Numeric value of a length token: pixel lengths and bare `0` parse,
/// anything else contributes 0.
fn to_px(token: &str) -> f64 {
    if !token.ends_with("px") && token != "0" {
        return 0.0;
    }
    token.trim_end_matches("px").parse().unwrap_or(0.0)
}

/// Split on whitespace that is not inside parentheses.
fn split_outside_parens(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if start < i {
                    parts.push(&value[start..i]);
                }
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    if start < value.len() {
        parts.push(&value[start..]);
    }
    parts
}

/// Take the first comma-separated shadow segment, honoring parentheses.
fn first_shadow_segment(value: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return &value[..i],
            _ => {}
        }
    }
    value
}

/// Move a leading `rgb(…)` / `rgba(…)` color token to the end of the
/// string, producing canonical "numerics then color" ordering.
fn normalize_color_position(value: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(rgba?\([^)]*\))(.+)$").expect("color position regex is valid")
    });

    if !value.starts_with("rgb") {
        return value.to_string();
    }
    match re.captures(value) {
        Some(caps) => format!("{} {}", caps[2].trim(), &caps[1]),
        None => value.to_string(),
    }
}

/// Parse a computed `box-shadow` value into a single [`BoxShadow`].
///
/// The last token that is not a plain length is the color; if no such token
/// exists the color defaults to opaque black. The remaining numeric tokens,
/// left to right, are offsetX, offsetY, blurRadius, spreadRadius, with
/// spreadRadius defaulting to 0. `"none"`, empty input, and a fully
/// transparent color are valid no-ops ([`ShadowParse::Invisible`]); a color
/// token that fails to parse is [`ShadowParse::Invalid`].
pub fn parse_box_shadow(value: &str) -> ShadowParse {
    let value = value.trim();
    if value.is_empty() || value == "none" {
        return ShadowParse::Invisible;
    }

    let segment = first_shadow_segment(value).trim();
    let normalized = normalize_color_position(segment);
    let parts = split_outside_parens(&normalized);
    let Some(&last) = parts.last() else {
        return ShadowParse::Invalid;
    };

    let inset = parts.contains(&"inset");

    let (color, color_token) = if is_length(last) || last == "inset" {
        (Rgba::black(), None)
    } else if is_transparent_color(last) {
        return ShadowParse::Invisible;
    } else {
        match parse_color(last) {
            Some(color) => (color, Some(last)),
            None => return ShadowParse::Invalid,
        }
    };

    let nums: Vec<f64> = parts
        .iter()
        .filter(|&&p| p != "inset" && Some(p) != color_token)
        .map(|p| to_px(p))
        .collect();

    ShadowParse::Visible(BoxShadow {
        inset,
        offset_x: nums.first().copied().unwrap_or(0.0),
        offset_y: nums.get(1).copied().unwrap_or(0.0),
        blur_radius: nums.get(2).copied().unwrap_or(0.0),
        spread_radius: nums.get(3).copied().unwrap_or(0.0),
        color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visible(value: &str) -> BoxShadow {
        match parse_box_shadow(value) {
            ShadowParse::Visible(shadow) => shadow,
            other => panic!("expected a visible shadow for {value:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_color_last() {
        let s = visible("2px 4px 6px 1px rgba(0, 0, 0, 0.5)");
        assert_eq!(s.offset_x, 2.0);
        assert_eq!(s.offset_y, 4.0);
        assert_eq!(s.blur_radius, 6.0);
        assert_eq!(s.spread_radius, 1.0);
        assert_eq!(s.color, Rgba::new(0.0, 0.0, 0.0, 0.5));
        assert!(!s.inset);
    }

    #[test]
    fn parses_color_first() {
        // Some engines compute the color token at the front of the string.
        let s = visible("rgba(0, 0, 0, 0.5) 2px 4px 6px 1px");
        assert_eq!(s.offset_x, 2.0);
        assert_eq!(s.offset_y, 4.0);
        assert_eq!(s.blur_radius, 6.0);
        assert_eq!(s.spread_radius, 1.0);
        assert_eq!(s.color, Rgba::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn spread_defaults_to_zero() {
        let s = visible("1px 2px 3px rgb(10, 20, 30)");
        assert_eq!(s.spread_radius, 0.0);
    }

    #[test]
    fn missing_color_defaults_to_opaque_black() {
        let s = visible("2px 4px 6px");
        assert_eq!(s.color, Rgba::black());
    }

    #[test]
    fn inset_marks_inner_shadow() {
        let s = visible("inset 0 1px 2px rgba(0, 0, 0, 0.3)");
        assert!(s.inset);
        assert_eq!(s.offset_x, 0.0);
        assert_eq!(s.offset_y, 1.0);
    }

    #[test]
    fn none_and_empty_are_invisible() {
        assert_eq!(parse_box_shadow("none"), ShadowParse::Invisible);
        assert_eq!(parse_box_shadow(""), ShadowParse::Invisible);
        assert_eq!(parse_box_shadow("   "), ShadowParse::Invisible);
    }

    #[test]
    fn transparent_color_is_invisible_not_invalid() {
        assert_eq!(
            parse_box_shadow("2px 4px 6px rgba(0, 0, 0, 0)"),
            ShadowParse::Invisible
        );
    }

    #[test]
    fn keyword_color_that_cannot_parse_is_invalid() {
        assert_eq!(parse_box_shadow("2px 4px 6px red"), ShadowParse::Invalid);
    }

    #[test]
    fn multi_shadow_takes_first_segment() {
        let s = visible("rgba(0, 0, 0, 0.5) 2px 4px 6px, rgb(255, 0, 0) 0px 0px 4px");
        assert_eq!(s.offset_x, 2.0);
        assert_eq!(s.color, Rgba::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn fractional_lengths_are_lengths_not_colors() {
        let s = visible("0.5px 1.5px 2.5px");
        assert_eq!(s.offset_x, 0.5);
        assert_eq!(s.offset_y, 1.5);
        assert_eq!(s.blur_radius, 2.5);
        assert_eq!(s.color, Rgba::black());
    }

    #[test]
    fn splits_only_outside_parentheses() {
        assert_eq!(
            split_outside_parens("rgba(0, 0, 0, 0.5) 2px"),
            vec!["rgba(0, 0, 0, 0.5)", "2px"]
        );
    }
}

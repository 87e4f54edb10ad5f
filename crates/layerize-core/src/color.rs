//! Parsing of resolved CSS color strings.
//!
//! Rendering engines resolve every color to an `rgb(r, g, b)` or
//! `rgba(r, g, b, a)` functional form, so those are the only notations this
//! parser accepts. Anything else is "no data" and yields `None`.

use std::sync::OnceLock;

use regex::Regex;

/// An RGBA color with all channels normalized to `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    /// Create a color from already-normalized channels.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque black (0, 0, 0, 1).
    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

fn color_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"rgba?\(\s*([\d.]+)\s*,\s*([\d.]+)\s*,\s*([\d.]+)(?:\s*,\s*([\d.]+))?\s*\)")
            .expect("color regex is valid")
    })
}

/// Parse a resolved `rgb(…)` / `rgba(…)` color string.
///
/// Channels are normalized from 0–255 to 0–1; the alpha channel is taken
/// as-is (already 0–1). A color whose alpha is exactly 0 is treated as the
/// absence of a color — fully transparent paint carries no information —
/// and yields `None`, as does any string that fails to parse.
pub fn parse_color(value: &str) -> Option<Rgba> {
    let caps = color_regex().captures(value)?;

    let r: f64 = caps.get(1)?.as_str().parse().ok()?;
    let g: f64 = caps.get(2)?.as_str().parse().ok()?;
    let b: f64 = caps.get(3)?.as_str().parse().ok()?;
    let a: f64 = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => 1.0,
    };

    if a == 0.0 {
        return None;
    }

    Some(Rgba::new(r / 255.0, g / 255.0, b / 255.0, a))
}

/// Whether a string is a well-formed `rgba(…)` color whose alpha is
/// exactly 0. [`parse_color`] folds such colors into `None`; callers that
/// must tell "valid but transparent" apart from "not a color" check this
/// first.
pub fn is_transparent_color(value: &str) -> bool {
    let Some(caps) = color_regex().captures(value) else {
        return false;
    };
    match caps.get(4) {
        Some(m) => m.as_str().parse::<f64>().map(|a| a == 0.0).unwrap_or(false),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb() {
        let c = parse_color("rgb(255, 0, 0)").unwrap();
        assert_eq!(c, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn parses_rgba_with_alpha() {
        let c = parse_color("rgba(0, 0, 0, 0.5)").unwrap();
        assert_eq!(c, Rgba::new(0.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn normalizes_channels() {
        let c = parse_color("rgb(51, 102, 255)").unwrap();
        assert!((c.r - 0.2).abs() < 1e-9);
        assert!((c.g - 0.4).abs() < 1e-9);
        assert!((c.b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn zero_alpha_is_no_color() {
        assert_eq!(parse_color("rgba(0, 0, 0, 0)"), None);
        assert_eq!(parse_color("rgba(255, 255, 255, 0)"), None);
    }

    #[test]
    fn tolerates_tight_whitespace() {
        assert!(parse_color("rgb(1,2,3)").is_some());
        assert!(parse_color("rgba( 10 , 20 , 30 , 0.25 )").is_some());
    }

    #[test]
    fn rejects_non_functional_colors() {
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#ff0000"), None);
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("none"), None);
    }

    #[test]
    fn transparency_check_requires_a_valid_color() {
        assert!(is_transparent_color("rgba(0, 0, 0, 0)"));
        assert!(is_transparent_color("rgba(255, 255, 255, 0)"));
        assert!(!is_transparent_color("rgba(0, 0, 0, 0.5)"));
        assert!(!is_transparent_color("rgb(0, 0, 0)"));
        assert!(!is_transparent_color("transparent"));
        assert!(!is_transparent_color("honeydew"));
    }
}

//! Small parsers for resolved CSS value strings.
//!
//! Everything here is best-effort: an unparseable value is "no data" and
//! yields `None`, never an error.

use std::sync::OnceLock;

use regex::Regex;

use crate::layer::{CornerRadii, ScaleMode};
use crate::style::ComputedStyle;

fn px_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([\d.]+)px").expect("px regex is valid"))
}

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"url\(['"]?(.*?)['"]?\)"#).expect("url regex is valid"))
}

/// Parse a pixel length (`"12px"`, `"1.5px"`). Values in any other unit —
/// including unitless `line-height` multipliers and `"normal"` — yield
/// `None`.
pub fn parse_px(value: &str) -> Option<f64> {
    let caps = px_regex().captures(value)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Extract the source URL from a `url(…)` background-image declaration.
pub fn background_image_url(value: &str) -> Option<String> {
    let caps = url_regex().captures(value)?;
    let url = caps.get(1)?.as_str();
    if url.is_empty() {
        return None;
    }
    Some(url.to_string())
}

/// Scale mode for a background image: FIT when `background-size` resolves
/// to `contain`, FILL otherwise.
pub fn scale_mode_from_background_size(value: Option<&str>) -> ScaleMode {
    match value {
        Some("contain") => ScaleMode::Fit,
        _ => ScaleMode::Fill,
    }
}

/// Scale mode for a media element: FIT when `object-fit` resolves to
/// `contain`, FILL otherwise.
pub fn scale_mode_from_object_fit(value: Option<&str>) -> ScaleMode {
    match value {
        Some("contain") => ScaleMode::Fit,
        _ => ScaleMode::Fill,
    }
}

/// Read the four corner radii from an element's computed style.
///
/// Each corner is parsed independently as a pixel length; a zero or
/// unparseable radius is omitted.
pub fn corner_radii(style: &ComputedStyle) -> CornerRadii {
    let corner = |property: &str| -> Option<f64> {
        let radius = parse_px(style.get(property)?)?;
        if radius == 0.0 { None } else { Some(radius) }
    };

    CornerRadii {
        top_left_radius: corner("borderTopLeftRadius"),
        top_right_radius: corner("borderTopRightRadius"),
        bottom_right_radius: corner("borderBottomRightRadius"),
        bottom_left_radius: corner("borderBottomLeftRadius"),
    }
}

//! Computed-style access and baseline-default diffing.
//!
//! A [`ComputedStyle`] is the resolved style map captured for one element.
//! [`applied_styles`] returns only the recognized properties whose value
//! differs from the baseline default an unstyled element would resolve to —
//! an element with an empty diff produced no visible styling of its own and
//! is skipped by the layer builder (unless it is a media element).

use std::collections::HashMap;

/// Resolved computed styles for a single element, keyed by the camelCase
/// property names the capture layer records (`backgroundColor`, `boxShadow`,
/// …). Absent keys mean the property was not captured and is treated as
/// "no data".
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct ComputedStyle(HashMap<String, String>);

impl ComputedStyle {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Look up a resolved property value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.0.get(property).map(String::as_str)
    }

    /// Insert a resolved property value, replacing any existing one.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(property.into(), value.into());
        self
    }

    /// The element's resolved text color, used to resolve color-dependent
    /// property defaults. Empty when not captured.
    pub fn current_color(&self) -> &str {
        self.get("color").unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for ComputedStyle {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The closed set of style properties the pipeline recognizes.
///
/// Each property carries its own default-resolution rule. Border defaults
/// are derived from the element's resolved text color ("zero width, no
/// style, current text color"), so they cannot come from a static table
/// alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    BackgroundColor,
    Border,
    BorderTop,
    BorderLeft,
    BorderRight,
    BorderBottom,
    BorderRadius,
    BackgroundImage,
    BorderColor,
    BoxShadow,
}

impl StyleProperty {
    /// All recognized properties, in diff order.
    pub const ALL: [StyleProperty; 11] = [
        StyleProperty::Opacity,
        StyleProperty::BackgroundColor,
        StyleProperty::Border,
        StyleProperty::BorderTop,
        StyleProperty::BorderLeft,
        StyleProperty::BorderRight,
        StyleProperty::BorderBottom,
        StyleProperty::BorderRadius,
        StyleProperty::BackgroundImage,
        StyleProperty::BorderColor,
        StyleProperty::BoxShadow,
    ];

    /// The camelCase key this property is captured under.
    pub fn name(self) -> &'static str {
        match self {
            StyleProperty::Opacity => "opacity",
            StyleProperty::BackgroundColor => "backgroundColor",
            StyleProperty::Border => "border",
            StyleProperty::BorderTop => "borderTop",
            StyleProperty::BorderLeft => "borderLeft",
            StyleProperty::BorderRight => "borderRight",
            StyleProperty::BorderBottom => "borderBottom",
            StyleProperty::BorderRadius => "borderRadius",
            StyleProperty::BackgroundImage => "backgroundImage",
            StyleProperty::BorderColor => "borderColor",
            StyleProperty::BoxShadow => "boxShadow",
        }
    }

    /// The value this property resolves to on an unstyled element.
    ///
    /// `current_color` is the element's own resolved text color; border
    /// shorthands and `borderColor` default to it.
    pub fn default_value(self, current_color: &str) -> String {
        match self {
            StyleProperty::Opacity => "1".to_string(),
            StyleProperty::BackgroundColor => "rgba(0, 0, 0, 0)".to_string(),
            StyleProperty::Border
            | StyleProperty::BorderTop
            | StyleProperty::BorderLeft
            | StyleProperty::BorderRight
            | StyleProperty::BorderBottom => format!("0px none {current_color}"),
            StyleProperty::BorderRadius => "0px".to_string(),
            StyleProperty::BackgroundImage => "none".to_string(),
            StyleProperty::BorderColor => current_color.to_string(),
            StyleProperty::BoxShadow => "none".to_string(),
        }
    }
}

/// Return the recognized properties whose resolved value differs from the
/// per-element baseline default. Properties that were not captured, are
/// empty, or match their default are omitted; an empty result means the
/// element produced no visible styling of its own.
pub fn applied_styles(style: &ComputedStyle) -> Vec<(StyleProperty, &str)> {
    let current_color = style.current_color();
    let mut applied = Vec::new();

    for property in StyleProperty::ALL {
        let Some(value) = style.get(property.name()) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        if value != property.default_value(current_color) {
            applied.push((property, value));
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_style_has_no_applied_properties() {
        assert!(applied_styles(&ComputedStyle::new()).is_empty());
    }

    #[test]
    fn defaults_are_not_reported() {
        let s = style(&[
            ("opacity", "1"),
            ("backgroundColor", "rgba(0, 0, 0, 0)"),
            ("backgroundImage", "none"),
            ("borderRadius", "0px"),
            ("boxShadow", "none"),
        ]);
        assert!(applied_styles(&s).is_empty());
    }

    #[test]
    fn non_default_background_is_reported() {
        let s = style(&[("backgroundColor", "rgb(255, 0, 0)")]);
        let applied = applied_styles(&s);
        assert_eq!(
            applied,
            vec![(StyleProperty::BackgroundColor, "rgb(255, 0, 0)")]
        );
    }

    #[test]
    fn border_default_resolves_against_current_color() {
        // A zero border in the element's own text color is the default and
        // must not be reported, whatever that color is.
        let s = style(&[
            ("color", "rgb(20, 30, 40)"),
            ("border", "0px none rgb(20, 30, 40)"),
            ("borderColor", "rgb(20, 30, 40)"),
        ]);
        assert!(applied_styles(&s).is_empty());

        // The same border string under a different text color is a diff.
        let s = style(&[
            ("color", "rgb(0, 0, 0)"),
            ("border", "0px none rgb(20, 30, 40)"),
        ]);
        assert_eq!(applied_styles(&s).len(), 1);
    }

    #[test]
    fn empty_values_are_skipped() {
        let s = style(&[("boxShadow", "")]);
        assert!(applied_styles(&s).is_empty());
    }

    #[test]
    fn real_border_is_reported() {
        let s = style(&[
            ("color", "rgb(0, 0, 0)"),
            ("border", "2px solid rgb(255, 0, 0)"),
        ]);
        let applied = applied_styles(&s);
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].0, StyleProperty::Border);
    }
}

//! Pixel-space geometry types.
//!
//! Layout boxes arrive from the capture layer as fractional CSS pixels and
//! are rounded to whole pixels on entry. All emitted layers carry a
//! [`PixelRect`] in document-absolute coordinates until hierarchy
//! reconstruction converts them to parent-relative.

/// A layout bounding box in fractional CSS pixels, as measured by the
/// rendering engine (`getBoundingClientRect` coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct LayoutRect {
    /// Left edge, document-absolute.
    pub left: f64,
    /// Top edge, document-absolute.
    pub top: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
}

impl LayoutRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (`left + width`).
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// An integer pixel box, rounded from a [`LayoutRect`].
///
/// Coordinates are document-absolute during extraction. After hierarchy
/// reconstruction, every non-root node's `x`/`y` are relative to its
/// containing frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Round a layout box to the nearest whole pixel.
    pub fn from_layout(rect: &LayoutRect) -> Self {
        Self {
            x: round_px(rect.left),
            y: round_px(rect.top),
            width: round_px(rect.width),
            height: round_px(rect.height),
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the box meets the minimum 1×1 pixel emission size.
    pub fn is_renderable(&self) -> bool {
        self.width >= 1 && self.height >= 1
    }
}

/// Round a fractional pixel value to the nearest integer.
pub fn round_px(value: f64) -> i32 {
    value.round() as i32
}

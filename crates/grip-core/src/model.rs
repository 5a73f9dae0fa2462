//! Item geometry model.
//!
//! Every item on a canvas has a canvas-space top-left `Position` and
//! `Dimensions`. Either axis of the dimensions may be `auto` (content-sized)
//! until the first resize on that axis makes it concrete.

use crate::id::ItemId;
use kurbo::Point;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ─── Position ────────────────────────────────────────────────────────────

/// Canvas-space top-left corner of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl From<Point> for Position {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

// ─── Dimensions ──────────────────────────────────────────────────────────

/// One axis of an item's size: a concrete canvas-space length, or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Content decides the size. Serialized as the string `"auto"`.
    #[default]
    Auto,
    Px(f64),
}

impl Dimension {
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The concrete value, if any.
    pub fn px(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Px(v) => Some(v),
        }
    }

    /// A concrete, usable length: the stored value when it is finite and
    /// positive, otherwise `fallback`.
    pub fn or_measured(self, fallback: f64) -> f64 {
        match self {
            Self::Px(v) if v.is_finite() && v > 0.0 => v,
            _ => fallback,
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Px(v) => serializer.serialize_f64(*v),
        }
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Keyword(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(v) => Ok(Self::Px(v)),
            Raw::Keyword(s) if s == "auto" => Ok(Self::Auto),
            Raw::Keyword(s) => Err(D::Error::custom(format!(
                "expected a number or \"auto\", got {s:?}"
            ))),
        }
    }
}

/// Canvas-space size of an item.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: Dimension,
    pub height: Dimension,
}

impl Dimensions {
    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    /// Both axes concrete.
    pub const fn px(width: f64, height: f64) -> Self {
        Self {
            width: Dimension::Px(width),
            height: Dimension::Px(height),
        }
    }

    /// Both axes content-sized.
    pub const fn auto() -> Self {
        Self {
            width: Dimension::Auto,
            height: Dimension::Auto,
        }
    }
}

// ─── Size limits ─────────────────────────────────────────────────────────

/// Minimum concrete size of an item. Resizes below it are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeLimits {
    pub min_width: f64,
    pub min_height: f64,
}

impl SizeLimits {
    pub const DEFAULT: Self = Self {
        min_width: 100.0,
        min_height: 60.0,
    };

    pub const fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width,
            min_height,
        }
    }

    /// Minimums must be finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.min_width.is_finite()
            && self.min_height.is_finite()
            && self.min_width >= 0.0
            && self.min_height >= 0.0
    }

    pub fn clamp_width(&self, w: f64) -> f64 {
        w.max(self.min_width)
    }

    pub fn clamp_height(&self, h: f64) -> f64 {
        h.max(self.min_height)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─── Handles & cursors ───────────────────────────────────────────────────

/// Which resize handle was grabbed.
///
/// | Handle | Width | Height | X moves | Y moves |
/// |--------|-------|--------|---------|---------|
/// | `Right` | ✓ | — | — | — |
/// | `Bottom` | — | ✓ | — | — |
/// | `BottomRight` | ✓ | ✓ | — | — |
/// | `BottomLeft` | ✓ | ✓ | ✓ | — |
/// | `TopRight` | ✓ | ✓ | — | ✓ |
/// | `TopLeft` | ✓ | ✓ | ✓ | ✓ |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandlePosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Right,
    Bottom,
}

impl HandlePosition {
    pub const ALL: [Self; 6] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Right,
        Self::Bottom,
    ];

    /// Parse the kebab-case name used in `data-resize-handle` attributes.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "top-left" => Some(Self::TopLeft),
            "top-right" => Some(Self::TopRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-right" => Some(Self::BottomRight),
            "right" => Some(Self::Right),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Right => "right",
            Self::Bottom => "bottom",
        }
    }

    /// The pointer drives the width.
    pub fn drives_width(self) -> bool {
        !matches!(self, Self::Bottom)
    }

    /// The pointer drives the height.
    pub fn drives_height(self) -> bool {
        !matches!(self, Self::Right)
    }

    /// The left edge follows the pointer; the right edge is the anchor.
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// The top edge follows the pointer; the bottom edge is the anchor.
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    pub fn cursor(self) -> Cursor {
        match self {
            Self::TopLeft | Self::BottomRight => Cursor::NwseResize,
            Self::TopRight | Self::BottomLeft => Cursor::NeswResize,
            Self::Right => Cursor::EwResize,
            Self::Bottom => Cursor::NsResize,
        }
    }
}

/// Cursor forced on the page while a session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    Grabbing,
    EwResize,
    NsResize,
    NwseResize,
    NeswResize,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Grabbing => "grabbing",
            Self::EwResize => "ew-resize",
            Self::NsResize => "ns-resize",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }
}

// ─── Item ────────────────────────────────────────────────────────────────

/// The geometry record the item store keeps per item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    /// Item type (`"note"`, `"embed"`, ...). Selects per-kind size limits.
    #[serde(default)]
    pub kind: String,
    pub position: Position,
    #[serde(default)]
    pub dimensions: Dimensions,
}

impl Item {
    pub fn new(id: ItemId, kind: &str, position: Position, dimensions: Dimensions) -> Self {
        Self {
            id,
            kind: kind.to_string(),
            position,
            dimensions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dimension_serde_accepts_auto_and_numbers() {
        let dims: Dimensions = serde_json::from_str(r#"{"width":150,"height":"auto"}"#).unwrap();
        assert_eq!(dims.width, Dimension::Px(150.0));
        assert_eq!(dims.height, Dimension::Auto);
        assert_eq!(
            serde_json::to_string(&dims).unwrap(),
            r#"{"width":150.0,"height":"auto"}"#
        );
    }

    #[test]
    fn dimension_serde_rejects_other_keywords() {
        let err = serde_json::from_str::<Dimension>(r#""fit-content""#).unwrap_err();
        assert!(err.to_string().contains("fit-content"));
    }

    #[test]
    fn or_measured_ignores_auto_and_degenerate_values() {
        assert_eq!(Dimension::Auto.or_measured(80.0), 80.0);
        assert_eq!(Dimension::Px(0.0).or_measured(80.0), 80.0);
        assert_eq!(Dimension::Px(f64::NAN).or_measured(80.0), 80.0);
        assert_eq!(Dimension::Px(120.0).or_measured(80.0), 120.0);
    }

    #[test]
    fn handle_axes_match_the_anchor_table() {
        use HandlePosition::*;
        let table = [
            (Right, true, false, false, false),
            (Bottom, false, true, false, false),
            (BottomRight, true, true, false, false),
            (BottomLeft, true, true, true, false),
            (TopRight, true, true, false, true),
            (TopLeft, true, true, true, true),
        ];
        for (h, w, ht, mx, my) in table {
            assert_eq!(h.drives_width(), w, "{h:?} width");
            assert_eq!(h.drives_height(), ht, "{h:?} height");
            assert_eq!(h.moves_left_edge(), mx, "{h:?} x");
            assert_eq!(h.moves_top_edge(), my, "{h:?} y");
        }
    }

    #[test]
    fn handle_names_roundtrip() {
        for h in HandlePosition::ALL {
            assert_eq!(HandlePosition::from_name(h.as_str()), Some(h));
        }
        assert_eq!(HandlePosition::from_name("left"), None);
    }

    #[test]
    fn size_limits_validation() {
        assert!(SizeLimits::DEFAULT.is_valid());
        assert!(!SizeLimits::new(-1.0, 60.0).is_valid());
        assert!(!SizeLimits::new(100.0, f64::INFINITY).is_valid());
        assert_eq!(SizeLimits::DEFAULT.clamp_width(40.0), 100.0);
        assert_eq!(SizeLimits::DEFAULT.clamp_height(75.0), 75.0);
    }
}

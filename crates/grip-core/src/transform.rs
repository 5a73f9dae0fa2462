//! Canvas pan/zoom state and screen ↔ canvas conversion.
//!
//! The canvas applies `translate(tx, ty) scale(s)` to its content layer.
//! A point on screen maps into canvas space as
//! `(screen - origin - translate) / scale`, where `origin` is the screen
//! position of the (untransformed) canvas element itself.

use crate::error::TransformError;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Scales at or below this are treated as degenerate.
const MIN_SCALE: f64 = 1e-6;

/// The pan + zoom the canvas applies to its children.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl CanvasTransform {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub const fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Decompose a 2-D affine into uniform scale + translation.
    ///
    /// Scale is the length of the transformed x basis vector, so a stray
    /// skew or rotation still yields a usable magnitude.
    pub fn from_affine(affine: Affine) -> Result<Self, TransformError> {
        let [a, b, _c, _d, e, f] = affine.as_coeffs();
        let scale = a.hypot(b);
        if !scale.is_finite() || scale <= MIN_SCALE {
            return Err(TransformError::Degenerate { scale });
        }
        if !e.is_finite() || !f.is_finite() {
            return Err(TransformError::Degenerate { scale });
        }
        Ok(Self {
            scale,
            translate_x: e,
            translate_y: f,
        })
    }

    pub fn to_affine(self) -> Affine {
        Affine::translate(self.translation()) * Affine::scale(self.scale)
    }

    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.translate_x, self.translate_y)
    }

    pub fn is_valid(&self) -> bool {
        self.scale.is_finite()
            && self.scale > MIN_SCALE
            && self.translate_x.is_finite()
            && self.translate_y.is_finite()
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A resolved canvas: where it sits on screen and how it is transformed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Screen-space top-left of the canvas element.
    pub origin: Point,
    pub transform: CanvasTransform,
}

impl Viewport {
    pub const fn new(origin: Point, transform: CanvasTransform) -> Self {
        Self { origin, transform }
    }

    pub fn scale(&self) -> f64 {
        self.transform.scale
    }

    /// Convert a screen position to canvas space.
    #[inline]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        let t = &self.transform;
        Point::new(
            (screen.x - self.origin.x - t.translate_x) / t.scale,
            (screen.y - self.origin.y - t.translate_y) / t.scale,
        )
    }

    /// Convert a canvas position to screen space.
    #[inline]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        let t = &self.transform;
        Point::new(
            canvas.x * t.scale + t.translate_x + self.origin.x,
            canvas.y * t.scale + t.translate_y + self.origin.y,
        )
    }

    /// Convert a screen-space distance to canvas space.
    #[inline]
    pub fn delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.transform.scale
    }

    /// Convert a canvas-space rectangle to its on-screen footprint.
    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        let p0 = self.canvas_to_screen(Point::new(rect.x0, rect.y0));
        let p1 = self.canvas_to_screen(Point::new(rect.x1, rect.y1));
        Rect::from_points(p0, p1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "expected {b}, got {a}");
    }

    #[test]
    fn affine_roundtrip() {
        let t = CanvasTransform::new(2.5, -40.0, 12.0);
        let back = CanvasTransform::from_affine(t.to_affine()).unwrap();
        assert_close(back.scale, 2.5);
        assert_close(back.translate_x, -40.0);
        assert_close(back.translate_y, 12.0);
    }

    #[test]
    fn zero_scale_is_degenerate() {
        let err = CanvasTransform::from_affine(Affine::scale(0.0)).unwrap_err();
        assert!(matches!(err, TransformError::Degenerate { .. }));
    }

    #[test]
    fn screen_canvas_conversion_inverts() {
        let vp = Viewport::new(Point::new(100.0, 0.0), CanvasTransform::new(2.0, 100.0, 50.0));
        let canvas = vp.screen_to_canvas(Point::new(220.0, 70.0));
        assert_close(canvas.x, 10.0);
        assert_close(canvas.y, 10.0);
        let screen = vp.canvas_to_screen(canvas);
        assert_close(screen.x, 220.0);
        assert_close(screen.y, 70.0);
    }

    #[test]
    fn deltas_scale_only() {
        let vp = Viewport::new(Point::new(33.0, 44.0), CanvasTransform::new(4.0, 7.0, 9.0));
        let d = vp.delta_to_canvas(Vec2::new(20.0, -8.0));
        assert_close(d.x, 5.0);
        assert_close(d.y, -2.0);
    }
}

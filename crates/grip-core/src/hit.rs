//! Hit testing: pointer → drag region / resize handle.
//!
//! Hosts with a DOM can classify the pointer-down target from the element
//! tree instead; this is for hosts that only have geometry (immediate-mode
//! canvases, tests). All rectangles here are in screen space so hot-zones
//! keep a constant on-screen size regardless of zoom.

use crate::model::HandlePosition;
use crate::transform::Viewport;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// What a pointer-down landed on, relative to one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "handle")]
pub enum PointerTarget {
    /// The item's designated drag-handle region.
    DragHandle,
    /// One of the six resize hot-zones.
    ResizeHandle(HandlePosition),
    /// A nested interactive control (text input, button, ...).
    Control,
    /// Inside the item, outside its drag-handle region.
    Body,
}

/// The on-screen rectangle of an item at canvas `position` with canvas `size`.
pub fn item_screen_rect(viewport: &Viewport, position: Point, size: Size) -> Rect {
    viewport.rect_to_screen(Rect::from_origin_size(position, size))
}

/// The hot-zone of `handle` on an item whose screen rectangle is `rect`.
///
/// Corner zones are `zone`-sized squares centred on the corner; edge zones
/// are `zone`-thick strips along the edge, between the corner zones.
pub fn handle_zone(rect: Rect, handle: HandlePosition, zone: f64) -> Rect {
    let h = zone / 2.0;
    match handle {
        HandlePosition::TopLeft => Rect::new(rect.x0 - h, rect.y0 - h, rect.x0 + h, rect.y0 + h),
        HandlePosition::TopRight => Rect::new(rect.x1 - h, rect.y0 - h, rect.x1 + h, rect.y0 + h),
        HandlePosition::BottomLeft => {
            Rect::new(rect.x0 - h, rect.y1 - h, rect.x0 + h, rect.y1 + h)
        }
        HandlePosition::BottomRight => {
            Rect::new(rect.x1 - h, rect.y1 - h, rect.x1 + h, rect.y1 + h)
        }
        HandlePosition::Right => Rect::new(rect.x1 - h, rect.y0 + h, rect.x1 + h, rect.y1 - h),
        HandlePosition::Bottom => Rect::new(rect.x0 + h, rect.y1 - h, rect.x1 - h, rect.y1 + h),
    }
}

/// Find the resize handle under `point`. Corners win over edges.
pub fn hit_test_handle(rect: Rect, point: Point, zone: f64) -> Option<HandlePosition> {
    // `ALL` lists the corners first.
    HandlePosition::ALL
        .into_iter()
        .find(|&handle| handle_zone(rect, handle, zone).contains(point))
}

/// Classify a pointer-down at `point` against an item.
///
/// `drag_region` is the screen rectangle of the item's drag handle; `None`
/// means the whole item drags. Resize zones are only considered when the
/// item is `resizable`. Returns `None` when the item was missed entirely.
pub fn classify(
    item_rect: Rect,
    drag_region: Option<Rect>,
    point: Point,
    resizable: bool,
    zone: f64,
) -> Option<PointerTarget> {
    if resizable && let Some(handle) = hit_test_handle(item_rect, point, zone) {
        return Some(PointerTarget::ResizeHandle(handle));
    }
    if !item_rect.contains(point) {
        return None;
    }
    match drag_region {
        Some(region) if !region.contains(point) => Some(PointerTarget::Body),
        _ => Some(PointerTarget::DragHandle),
    }
}

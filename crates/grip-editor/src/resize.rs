//! Resize controller: handle pointer-down → resizing → commit.
//!
//! The edge(s) the grabbed handle drives follow the pointer; the opposite
//! edge(s) stay anchored. Sizes are clamped to the item's minimum and the
//! position is re-derived from the anchored edge after clamping, so a
//! clamped top-left resize never pushes the item past its bottom-right.

use crate::registry::SessionHandle;
use grip_core::{
    Dimension, Dimensions, HandlePosition, Item, ItemId, Point, Position, Size, SizeLimits, Vec2,
    Viewport,
};
use serde::Serialize;

/// A proposed position + size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResizeFrame {
    pub position: Position,
    pub dimensions: Dimensions,
}

/// Everything a resize needs, captured at pointer-down.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub handle: HandlePosition,
    /// Pointer minus the grabbed edge(s), in screen pixels. Zero on an
    /// axis the handle does not drive.
    pub grab_offset: Vec2,
    pub original_position: Position,
    pub original_dimensions: Dimensions,
    /// Starting size with `auto` axes replaced by a concrete length.
    pub start_size: Size,
    pub limits: SizeLimits,
}

impl ResizeSession {
    /// Capture a session for `item` grabbed by `handle` at screen `pointer`.
    ///
    /// `measured` is the rendered size; it stands in for `auto` axes. If
    /// that is unavailable too, the minimum size is used.
    pub fn start(
        item: &Item,
        handle: HandlePosition,
        pointer: Point,
        viewport: &Viewport,
        measured: Option<Size>,
        limits: SizeLimits,
    ) -> Self {
        let measured_w = measured
            .map(|s| s.width)
            .filter(|w| w.is_finite() && *w > 0.0)
            .unwrap_or(limits.min_width);
        let measured_h = measured
            .map(|s| s.height)
            .filter(|h| h.is_finite() && *h > 0.0)
            .unwrap_or(limits.min_height);
        let start_size = Size::new(
            item.dimensions.width.or_measured(measured_w),
            item.dimensions.height.or_measured(measured_h),
        );

        let left = item.position.x;
        let top = item.position.y;
        let edge = Point::new(
            if handle.moves_left_edge() {
                left
            } else {
                left + start_size.width
            },
            if handle.moves_top_edge() {
                top
            } else {
                top + start_size.height
            },
        );
        let edge_on_screen = viewport.canvas_to_screen(edge);
        let raw = pointer - edge_on_screen;
        let grab_offset = Vec2::new(
            if handle.drives_width() { raw.x } else { 0.0 },
            if handle.drives_height() { raw.y } else { 0.0 },
        );

        Self {
            handle,
            grab_offset,
            original_position: item.position,
            original_dimensions: item.dimensions,
            start_size,
            limits,
        }
    }

    /// The frame before any pointer movement.
    pub fn original_frame(&self) -> ResizeFrame {
        ResizeFrame {
            position: self.original_position,
            dimensions: self.original_dimensions,
        }
    }

    /// Canvas-space location of the grabbed edge(s) for the pointer at `screen`.
    pub fn edge_at(&self, screen: Point, viewport: &Viewport) -> Point {
        viewport.screen_to_canvas(screen - self.grab_offset)
    }
}

/// Compute the frame for the grabbed edge(s) at canvas point `edge`.
///
/// Only the axes the handle drives change. Returns `None` if any derived
/// value is not finite.
pub fn compute_resize(session: &ResizeSession, edge: Point) -> Option<ResizeFrame> {
    let handle = session.handle;
    let limits = &session.limits;
    let left = session.original_position.x;
    let top = session.original_position.y;
    let right = left + session.start_size.width;
    let bottom = top + session.start_size.height;

    let (x, width) = if !handle.drives_width() {
        (left, session.original_dimensions.width)
    } else if handle.moves_left_edge() {
        let w = finite(right - edge.x)?;
        let w = limits.clamp_width(w);
        (right - w, Dimension::Px(w))
    } else {
        let w = finite(edge.x - left)?;
        (left, Dimension::Px(limits.clamp_width(w)))
    };

    let (y, height) = if !handle.drives_height() {
        (top, session.original_dimensions.height)
    } else if handle.moves_top_edge() {
        let h = finite(bottom - edge.y)?;
        let h = limits.clamp_height(h);
        (bottom - h, Dimension::Px(h))
    } else {
        let h = finite(edge.y - top)?;
        (top, Dimension::Px(limits.clamp_height(h)))
    };

    let position = Position::new(x, y);
    position.is_finite().then_some(ResizeFrame {
        position,
        dimensions: Dimensions::new(width, height),
    })
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

#[derive(Debug)]
struct Live {
    handle: SessionHandle,
    session: ResizeSession,
    last: ResizeFrame,
}

/// Result of a pointer-up or abort.
#[derive(Debug)]
pub struct ResizeRelease {
    pub handle: SessionHandle,
    pub session: ResizeSession,
    /// Last frame written to the view.
    pub last: ResizeFrame,
}

#[derive(Debug, Default)]
pub struct ResizeController {
    live: Option<Live>,
}

impl ResizeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.live.is_some()
    }

    pub fn begin(&mut self, handle: SessionHandle, session: ResizeSession) {
        debug_assert!(self.live.is_none(), "begin while a resize is live");
        log::debug!("resize {:?} started on {:?}", session.handle, handle.item());
        let last = session.original_frame();
        self.live = Some(Live {
            handle,
            session,
            last,
        });
    }

    /// Apply a pointer-move. `None` when idle or when the tick is unusable.
    pub fn pointer_move(
        &mut self,
        screen: Point,
        viewport: &Viewport,
    ) -> Option<(ItemId, ResizeFrame)> {
        let live = self.live.as_mut()?;
        let edge = live.session.edge_at(screen, viewport);
        let Some(frame) = compute_resize(&live.session, edge) else {
            log::warn!("non-finite resize for {:?}, skipping tick", live.handle.item());
            return None;
        };
        live.last = frame;
        Some((live.handle.item(), frame))
    }

    /// End the session; the caller commits or discards `last`.
    pub fn release(&mut self) -> Option<ResizeRelease> {
        let live = self.live.take()?;
        Some(ResizeRelease {
            handle: live.handle,
            session: live.session,
            last: live.last,
        })
    }
}

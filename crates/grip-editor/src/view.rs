//! The view layer: what the user sees between commits.
//!
//! During a session the engine writes live positions and sizes straight to
//! the view, never to the store. The view also owns the transient session
//! styling (a marker class, disabled transitions, a forced cursor) that the
//! commit gateway clears when the session ends.

use grip_core::{
    CanvasSource, CanvasTransform, Cursor, Dimensions, ItemId, Point, Position, Size,
    TransformInput,
};
use smallvec::SmallVec;
use std::borrow::Cow;
use std::collections::HashMap;

/// Class set on an item while it is being dragged.
pub const DRAGGING_CLASS: &str = "dragging";
/// Class set on an item while it is being resized.
pub const RESIZING_CLASS: &str = "resizing";

pub trait ViewLayer: CanvasSource {
    /// The item's element is still on the page.
    fn is_mounted(&self, item: ItemId) -> bool;

    /// Rendered canvas-space size, used where a dimension is `auto`.
    fn measure(&self, item: ItemId) -> Option<Size>;

    fn set_position(&mut self, item: ItemId, position: Position);

    fn set_dimensions(&mut self, item: ItemId, dimensions: Dimensions);

    fn set_class(&mut self, item: ItemId, class: &str, on: bool);

    /// Enable or suppress CSS transitions on the item.
    fn set_transitions(&mut self, item: ItemId, enabled: bool);

    /// Force a page-wide cursor, or restore the default with `None`.
    fn set_cursor(&mut self, cursor: Option<Cursor>);
}

// ─── In-memory view ──────────────────────────────────────────────────────

/// How the in-memory canvas reports its transform.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasStyle {
    State(CanvasTransform),
    Css(String),
}

/// Rendered state of one mounted item.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Last position written by the engine.
    pub position: Option<Position>,
    /// Last dimensions written by the engine.
    pub dimensions: Option<Dimensions>,
    /// What `measure` reports.
    pub measured: Option<Size>,
    pub classes: SmallVec<[String; 2]>,
    pub transitions: bool,
    /// Number of `set_position` calls received.
    pub position_writes: usize,
}

impl Overlay {
    fn new(measured: Option<Size>) -> Self {
        Self {
            position: None,
            dimensions: None,
            measured,
            classes: SmallVec::new(),
            transitions: true,
            position_writes: 0,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// A headless view, for tests and non-DOM hosts.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    origin: Option<Point>,
    style: Option<CanvasStyle>,
    overlays: HashMap<ItemId, Overlay>,
    cursor: Option<Cursor>,
}

impl ViewState {
    pub fn new(origin: Point, transform: CanvasTransform) -> Self {
        Self {
            origin: Some(origin),
            style: Some(CanvasStyle::State(transform)),
            ..Self::default()
        }
    }

    pub fn set_transform(&mut self, transform: CanvasTransform) {
        self.style = Some(CanvasStyle::State(transform));
    }

    pub fn set_css_transform(&mut self, css: &str) {
        self.style = Some(CanvasStyle::Css(css.to_string()));
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = Some(origin);
    }

    /// Remove the canvas element. Resolution yields nothing afterwards.
    pub fn unmount_canvas(&mut self) {
        self.origin = None;
    }

    pub fn mount(&mut self, item: ItemId, measured: Option<Size>) {
        self.overlays.insert(item, Overlay::new(measured));
    }

    pub fn unmount(&mut self, item: ItemId) {
        self.overlays.remove(&item);
    }

    pub fn overlay(&self, item: ItemId) -> Option<&Overlay> {
        self.overlays.get(&item)
    }

    pub fn has_class(&self, item: ItemId, class: &str) -> bool {
        self.overlay(item).is_some_and(|o| o.has_class(class))
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.cursor
    }
}

impl CanvasSource for ViewState {
    fn canvas_origin(&self) -> Option<Point> {
        self.origin
    }

    fn canvas_transform(&self) -> Option<TransformInput<'_>> {
        match self.style.as_ref()? {
            CanvasStyle::State(t) => Some(TransformInput::State(*t)),
            CanvasStyle::Css(css) => Some(TransformInput::Css(Cow::Borrowed(css.as_str()))),
        }
    }
}

impl ViewLayer for ViewState {
    fn is_mounted(&self, item: ItemId) -> bool {
        self.overlays.contains_key(&item)
    }

    fn measure(&self, item: ItemId) -> Option<Size> {
        self.overlays.get(&item)?.measured
    }

    fn set_position(&mut self, item: ItemId, position: Position) {
        if let Some(overlay) = self.overlays.get_mut(&item) {
            overlay.position = Some(position);
            overlay.position_writes += 1;
        }
    }

    fn set_dimensions(&mut self, item: ItemId, dimensions: Dimensions) {
        if let Some(overlay) = self.overlays.get_mut(&item) {
            overlay.dimensions = Some(dimensions);
        }
    }

    fn set_class(&mut self, item: ItemId, class: &str, on: bool) {
        let Some(overlay) = self.overlays.get_mut(&item) else {
            return;
        };
        let present = overlay.has_class(class);
        if on && !present {
            overlay.classes.push(class.to_string());
        } else if !on && present {
            overlay.classes.retain(|c| c != class);
        }
    }

    fn set_transitions(&mut self, item: ItemId, enabled: bool) {
        if let Some(overlay) = self.overlays.get_mut(&item) {
            overlay.transitions = enabled;
        }
    }

    fn set_cursor(&mut self, cursor: Option<Cursor>) {
        self.cursor = cursor;
    }
}

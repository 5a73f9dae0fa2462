//! `ViewLayer` over the live DOM.
//!
//! Markup contract:
//! - the canvas `container` is untransformed; its bounding rect is the origin
//! - the `layer` inside it carries the pan/zoom `transform` with
//!   `transform-origin: 0 0`
//! - each item is an absolutely positioned element with `data-item-id`
//! - resize hot-zones carry `data-resize-handle="bottom-right"` etc.
//! - an optional `data-drag-handle` element restricts where drags start

use grip_core::{
    CanvasSource, Cursor, Dimension, Dimensions, HandlePosition, ItemId, Point, PointerTarget,
    Position, Size, TransformInput,
};
use grip_editor::ViewLayer;
use std::borrow::Cow;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, Node};

const ITEM_ATTR: &str = "data-item-id";
const RESIZE_ATTR: &str = "data-resize-handle";
const DRAG_SELECTOR: &str = "[data-drag-handle]";
const CONTROL_SELECTOR: &str =
    "input, textarea, select, button, a[href], [contenteditable=\"true\"], [data-no-drag]";

pub struct DomView {
    container: HtmlElement,
    layer: HtmlElement,
}

impl DomView {
    pub fn new(container: HtmlElement, layer: HtmlElement) -> Self {
        Self { container, layer }
    }

    fn element(&self, item: ItemId) -> Option<HtmlElement> {
        let selector = item_selector(item.as_str());
        self.container
            .query_selector(&selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }

    fn set_style(&self, item: ItemId, property: &str, value: Option<&str>) {
        let Some(el) = self.element(item) else {
            return;
        };
        let style = el.style();
        let result = match value {
            Some(v) => style.set_property(property, v),
            None => style.remove_property(property).map(|_| ()),
        };
        if result.is_err() {
            log::debug!("could not set {property} on {item:?}");
        }
    }
}

impl CanvasSource for DomView {
    fn canvas_origin(&self) -> Option<Point> {
        if !self.container.is_connected() {
            return None;
        }
        let rect = self.container.get_bounding_client_rect();
        Some(Point::new(rect.left(), rect.top()))
    }

    fn canvas_transform(&self) -> Option<TransformInput<'_>> {
        let window = web_sys::window()?;
        let style = window.get_computed_style(&self.layer).ok().flatten()?;
        let value = style.get_property_value("transform").ok()?;
        Some(TransformInput::Css(Cow::Owned(value)))
    }
}

impl ViewLayer for DomView {
    fn is_mounted(&self, item: ItemId) -> bool {
        self.element(item).is_some_and(|el| el.is_connected())
    }

    /// Layout size ignores transforms, so it is already in canvas units.
    fn measure(&self, item: ItemId) -> Option<Size> {
        let el = self.element(item)?;
        Some(Size::new(
            f64::from(el.offset_width()),
            f64::from(el.offset_height()),
        ))
    }

    fn set_position(&mut self, item: ItemId, position: Position) {
        self.set_style(item, "left", Some(&px(position.x)));
        self.set_style(item, "top", Some(&px(position.y)));
    }

    fn set_dimensions(&mut self, item: ItemId, dimensions: Dimensions) {
        self.set_style(item, "width", Some(&dimension_css(dimensions.width)));
        self.set_style(item, "height", Some(&dimension_css(dimensions.height)));
    }

    fn set_class(&mut self, item: ItemId, class: &str, on: bool) {
        let Some(el) = self.element(item) else {
            return;
        };
        let list = el.class_list();
        let result = if on {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if result.is_err() {
            log::debug!("could not toggle class {class} on {item:?}");
        }
    }

    fn set_transitions(&mut self, item: ItemId, enabled: bool) {
        self.set_style(item, "transition", (!enabled).then_some("none"));
    }

    fn set_cursor(&mut self, cursor: Option<Cursor>) {
        let Some(body) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.body())
        else {
            return;
        };
        let style = body.style();
        let result = match cursor {
            Some(c) => style
                .set_property("cursor", c.as_css())
                .and_then(|_| style.set_property("user-select", "none")),
            None => style
                .remove_property("cursor")
                .and_then(|_| style.remove_property("user-select"))
                .map(|_| ()),
        };
        if result.is_err() {
            log::debug!("could not set page cursor");
        }
    }
}

// ─── Pointer target classification ───────────────────────────────────────

/// Find the item under `target` and what part of it was hit.
pub fn classify_target(target: &Element) -> Option<(ItemId, PointerTarget)> {
    let item_el = target.closest(&format!("[{ITEM_ATTR}]")).ok()??;
    let id = ItemId::intern(&item_el.get_attribute(ITEM_ATTR)?);

    let inside = |el: &Element| {
        let node: &Node = el;
        item_el.contains(Some(node))
    };

    if let Some(handle_el) = target.closest(&format!("[{RESIZE_ATTR}]")).ok().flatten()
        && inside(&handle_el)
    {
        let name = handle_el.get_attribute(RESIZE_ATTR).unwrap_or_default();
        return match HandlePosition::from_name(&name) {
            Some(handle) => Some((id, PointerTarget::ResizeHandle(handle))),
            None => {
                log::warn!("unknown resize handle {name:?} on {id:?}");
                Some((id, PointerTarget::Body))
            }
        };
    }

    if let Some(control) = target.closest(CONTROL_SELECTOR).ok().flatten()
        && inside(&control)
    {
        return Some((id, PointerTarget::Control));
    }

    let has_drag_region = item_el.query_selector(DRAG_SELECTOR).ok().flatten().is_some();
    if !has_drag_region {
        return Some((id, PointerTarget::DragHandle));
    }
    let on_region = target
        .closest(DRAG_SELECTOR)
        .ok()
        .flatten()
        .is_some_and(|el| inside(&el));
    Some((
        id,
        if on_region {
            PointerTarget::DragHandle
        } else {
            PointerTarget::Body
        },
    ))
}

// ─── Formatting helpers ──────────────────────────────────────────────────

pub fn px(v: f64) -> String {
    format!("{v}px")
}

pub fn dimension_css(d: Dimension) -> String {
    match d {
        Dimension::Auto => "auto".to_string(),
        Dimension::Px(v) => px(v),
    }
}

/// Attribute selector for an item id, with quotes and backslashes escaped.
pub fn item_selector(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{ITEM_ATTR}=\"{escaped}\"]")
}

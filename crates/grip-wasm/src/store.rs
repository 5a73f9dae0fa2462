//! `ItemStore` backed by host callbacks.
//!
//! The page owns item state. It hands the canvas an object with:
//! - `getItem(id)` → `{ id, kind, position: {x, y}, dimensions: {width, height} }`
//! - `updatePosition(id, x, y)`
//! - `updateDimensions(id, width, height)` (`"auto"` or a number per axis)
//! - optional `updateGeometry(id, x, y, width, height)` for a single write
//! - optional `bringToFront(id)`

use grip_core::{Dimension, Dimensions, Item, ItemId, Position};
use grip_editor::ItemStore;
use js_sys::{Array, Function, JSON, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

pub struct JsStore {
    callbacks: Object,
}

impl JsStore {
    /// Fails if a required callback is missing.
    pub fn new(callbacks: Object) -> Result<Self, String> {
        let store = Self { callbacks };
        for name in ["getItem", "updatePosition", "updateDimensions"] {
            if store.method(name).is_none() {
                return Err(format!("store is missing `{name}`"));
            }
        }
        Ok(store)
    }

    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.callbacks, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }

    fn call(&self, name: &str, args: &[JsValue]) -> Option<JsValue> {
        let f = self.method(name)?;
        let array: Array = args.iter().collect();
        match f.apply(&self.callbacks, &array) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("store.{name} threw: {err:?}");
                None
            }
        }
    }
}

fn dimension_value(d: Dimension) -> JsValue {
    match d {
        Dimension::Auto => JsValue::from_str("auto"),
        Dimension::Px(v) => JsValue::from_f64(v),
    }
}

/// Parse the JSON form of an item record as `getItem` returns it.
pub fn parse_item(json: &str) -> Result<Item, serde_json::Error> {
    serde_json::from_str(json)
}

impl ItemStore for JsStore {
    fn item(&self, id: ItemId) -> Option<Item> {
        let value = self.call("getItem", &[JsValue::from_str(id.as_str())])?;
        if value.is_undefined() || value.is_null() {
            return None;
        }
        let json: String = JSON::stringify(&value).ok()?.into();
        match parse_item(&json) {
            Ok(item) => Some(item),
            Err(err) => {
                log::warn!("store.getItem({id}) returned an unusable record: {err}");
                None
            }
        }
    }

    fn update_position(&mut self, id: ItemId, position: Position) {
        self.call(
            "updatePosition",
            &[
                JsValue::from_str(id.as_str()),
                JsValue::from_f64(position.x),
                JsValue::from_f64(position.y),
            ],
        );
    }

    fn update_dimensions(&mut self, id: ItemId, dimensions: Dimensions) {
        self.call(
            "updateDimensions",
            &[
                JsValue::from_str(id.as_str()),
                dimension_value(dimensions.width),
                dimension_value(dimensions.height),
            ],
        );
    }

    fn update_geometry(&mut self, id: ItemId, position: Position, dimensions: Dimensions) {
        if self.method("updateGeometry").is_none() {
            self.update_position(id, position);
            self.update_dimensions(id, dimensions);
            return;
        }
        self.call(
            "updateGeometry",
            &[
                JsValue::from_str(id.as_str()),
                JsValue::from_f64(position.x),
                JsValue::from_f64(position.y),
                dimension_value(dimensions.width),
                dimension_value(dimensions.height),
            ],
        );
    }

    fn bring_to_front(&mut self, id: ItemId) {
        self.call("bringToFront", &[JsValue::from_str(id.as_str())]);
    }
}

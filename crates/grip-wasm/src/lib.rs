//! WASM bridge for Grip: drag and resize for items on a pan/zoom canvas.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards pointer
//! events to a `GripCanvas`; every handler returns a JSON string
//! `{"listen": bool, "events": [...]}`. `listen` says whether window-level
//! `pointermove`/`pointerup` listeners should be attached right now, and
//! `events` are the callbacks to fire (`dragStart`, `click`, ...).

mod dom;
mod store;

use dom::{DomView, classify_target};
use grip_core::ItemId;
use grip_editor::{EngineEvent, GripConfig, InputEvent, InteractionEngine, ItemProps, Modifiers};
use store::JsStore;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

/// One canvas worth of drag/resize state.
#[wasm_bindgen]
pub struct GripCanvas {
    engine: InteractionEngine,
    view: DomView,
    store: JsStore,
}

#[wasm_bindgen]
impl GripCanvas {
    /// `config` is a JSON `GripConfig`; pass `"{}"` for the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        layer: HtmlElement,
        store: js_sys::Object,
        config: &str,
    ) -> Result<GripCanvas, JsValue> {
        console_hooks_setup();

        let config = GripConfig::from_json(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let store = JsStore::new(store).map_err(|e| JsValue::from_str(&e))?;
        Ok(Self {
            engine: InteractionEngine::new(config),
            view: DomView::new(container, layer),
            store,
        })
    }

    /// Attach per-item options (`{"resizable": false}` ...). Returns `false`
    /// on malformed JSON or invalid limits.
    pub fn set_item_props(&mut self, id: &str, props: &str) -> bool {
        let props: ItemProps = match serde_json::from_str(props) {
            Ok(p) => p,
            Err(err) => {
                log::warn!("item props for {id}: {err}");
                return false;
            }
        };
        match self.engine.set_item_props(ItemId::intern(id), props) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    pub fn remove_item_props(&mut self, id: &str) {
        self.engine.remove_item_props(ItemId::intern(id));
    }

    /// Primary-button pointer-down on `target` (the event's target element).
    #[allow(clippy::too_many_arguments)]
    pub fn handle_pointer_down(
        &mut self,
        target: &Element,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let Some((item, hit)) = classify_target(target) else {
            return self.respond(Vec::new());
        };
        let modifiers = Modifiers {
            shift,
            ctrl,
            alt,
            meta,
        };
        self.dispatch(InputEvent::PointerDown {
            item,
            target: hit,
            x,
            y,
            modifiers,
        })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> String {
        self.dispatch(InputEvent::pointer_move(x, y))
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> String {
        self.dispatch(InputEvent::pointer_up(x, y))
    }

    #[allow(clippy::too_many_arguments)]
    pub fn handle_double_click(
        &mut self,
        target: &Element,
        x: f64,
        y: f64,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> String {
        let Some((item, _)) = classify_target(target) else {
            return self.respond(Vec::new());
        };
        self.dispatch(InputEvent::DoubleClick {
            item,
            x,
            y,
            modifiers: Modifiers {
                shift,
                ctrl,
                alt,
                meta,
            },
        })
    }

    /// Escape key.
    pub fn cancel(&mut self) -> String {
        self.dispatch(InputEvent::Cancel)
    }

    /// An item element is about to be removed.
    pub fn unmount_item(&mut self, id: &str) -> String {
        self.dispatch(InputEvent::Unmount {
            item: ItemId::intern(id),
        })
    }

    /// The canvas is going away; abandon any session.
    pub fn teardown(&mut self) -> String {
        self.dispatch(InputEvent::Teardown)
    }

    pub fn wants_window_events(&self) -> bool {
        self.engine.wants_window_events()
    }
}

impl GripCanvas {
    fn dispatch(&mut self, event: InputEvent) -> String {
        let events = self
            .engine
            .handle(&event, &mut self.store, &mut self.view)
            .into_vec();
        self.respond(events)
    }

    fn respond(&self, events: Vec<EngineEvent>) -> String {
        response_json(self.engine.wants_window_events(), &events)
    }
}

fn response_json(listen: bool, events: &[EngineEvent]) -> String {
    serde_json::json!({ "listen": listen, "events": events }).to_string()
}

fn console_hooks_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            // Ignored if the page already installed a logger.
            let _ = console_log::init_with_level(log::Level::Info);
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Grip WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

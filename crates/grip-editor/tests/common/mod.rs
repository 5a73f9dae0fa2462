#![allow(dead_code)]

use grip_core::{CanvasTransform, ItemId, Point, PointerTarget, Position, Size};
use grip_editor::{EngineEvent, GripConfig, InputEvent, InteractionEngine, MemoryStore, ViewState};

/// A canvas with the fixture board mounted on it.
pub struct Board {
    pub engine: InteractionEngine,
    pub store: MemoryStore,
    pub view: ViewState,
}

impl Board {
    pub fn new(origin: Point, transform: CanvasTransform) -> Self {
        let config = GripConfig::from_json(include_str!("../fixtures/config.json")).unwrap();
        let store = MemoryStore::from_json(include_str!("../fixtures/board.json")).unwrap();
        let mut view = ViewState::new(origin, transform);
        for id in store.z_order() {
            let item = store.get(id).unwrap();
            // Auto-sized items render at 180 x 90.
            let measured = Size::new(
                item.dimensions.width.px().unwrap_or(180.0),
                item.dimensions.height.px().unwrap_or(90.0),
            );
            view.mount(id, Some(measured));
        }
        Self {
            engine: InteractionEngine::new(config),
            store,
            view,
        }
    }

    /// Identity transform, canvas at the screen origin.
    pub fn flat() -> Self {
        Self::new(Point::ZERO, CanvasTransform::IDENTITY)
    }

    pub fn send(&mut self, event: InputEvent) -> Vec<EngineEvent> {
        self.engine
            .handle(&event, &mut self.store, &mut self.view)
            .into_vec()
    }

    pub fn down(&mut self, item: &str, target: PointerTarget, x: f64, y: f64) -> Vec<EngineEvent> {
        self.send(InputEvent::pointer_down(id(item), target, x, y))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> Vec<EngineEvent> {
        self.send(InputEvent::pointer_move(x, y))
    }

    pub fn up(&mut self, x: f64, y: f64) -> Vec<EngineEvent> {
        self.send(InputEvent::pointer_up(x, y))
    }

    pub fn stored_position(&self, item: &str) -> Position {
        self.store.get(id(item)).unwrap().position
    }

    pub fn view_position(&self, item: &str) -> Option<Position> {
        self.view.overlay(id(item)).and_then(|o| o.position)
    }
}

pub fn id(name: &str) -> ItemId {
    ItemId::intern(name)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

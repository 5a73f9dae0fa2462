//! Replay a scripted drag and resize against a board and print what the
//! host would see. `RUST_LOG=debug` shows the session lifecycle.
//!
//!     cargo run -p grip-editor --example replay [board.json]

use grip_core::{CanvasTransform, HandlePosition, Point, PointerTarget, Size, Viewport};
use grip_editor::{GripConfig, InputEvent, InteractionEngine, MemoryStore, ViewState};
use std::env;
use std::fs;

fn main() {
    env_logger::init();

    let board = match env::args().nth(1) {
        Some(path) => match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("{path}: {err}");
                std::process::exit(1);
            }
        },
        None => include_str!("../tests/fixtures/board.json").to_string(),
    };
    let mut store = match MemoryStore::from_json(&board) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("bad board: {err}");
            std::process::exit(1);
        }
    };
    let Some(first) = store.z_order().first().copied() else {
        eprintln!("board is empty");
        return;
    };

    // Canvas at (100, 0), panned (100, 50), zoomed 2x.
    let viewport = Viewport::new(Point::new(100.0, 0.0), CanvasTransform::new(2.0, 100.0, 50.0));
    let mut view = ViewState::new(viewport.origin, viewport.transform);
    for id in store.z_order() {
        view.mount(id, Some(Size::new(180.0, 90.0)));
    }
    let mut engine = InteractionEngine::new(GripConfig::default());

    let Some(item) = store.get(first).cloned() else {
        return;
    };
    let top_left = viewport.canvas_to_screen(item.position.to_point());
    let corner = viewport.canvas_to_screen(Point::new(
        item.position.x + item.dimensions.width.or_measured(180.0),
        item.position.y + item.dimensions.height.or_measured(90.0),
    ));

    let script = [
        // Drag by (20, 20) screen px.
        InputEvent::pointer_down(first, PointerTarget::DragHandle, top_left.x, top_left.y),
        InputEvent::pointer_move(top_left.x + 10.0, top_left.y + 10.0),
        InputEvent::pointer_move(top_left.x + 20.0, top_left.y + 20.0),
        InputEvent::pointer_up(top_left.x + 20.0, top_left.y + 20.0),
        // Grow from the bottom-right corner, which moved with the drag.
        InputEvent::pointer_down(
            first,
            PointerTarget::ResizeHandle(HandlePosition::BottomRight),
            corner.x + 20.0,
            corner.y + 20.0,
        ),
        InputEvent::pointer_move(corner.x + 80.0, corner.y + 60.0),
        InputEvent::pointer_up(corner.x + 80.0, corner.y + 60.0),
    ];

    for event in &script {
        for out in engine.handle(event, &mut store, &mut view) {
            match serde_json::to_string(&out) {
                Ok(json) => println!("{json}"),
                Err(err) => eprintln!("unserializable event: {err}"),
            }
        }
    }

    if let Some(item) = store.get(first) {
        match serde_json::to_string_pretty(item) {
            Ok(json) => println!("{json}"),
            Err(err) => eprintln!("unserializable item: {err}"),
        }
    }
}

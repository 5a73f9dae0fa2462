//! Integration tests: drag sessions end to end (grip-editor).
//!
//! Drives the engine with raw pointer input against the fixture board and
//! checks what reaches the view, the store, and the host callbacks.

mod common;

use common::{Board, assert_close, id};
use grip_core::{CanvasTransform, Cursor, Point, PointerTarget, Position};
use grip_editor::view::DRAGGING_CLASS;
use grip_editor::{EngineEvent, GripConfig, InputEvent, Modifiers, SessionKind};
use pretty_assertions::assert_eq;

const DRAG: PointerTarget = PointerTarget::DragHandle;

// ─── Click vs drag ───────────────────────────────────────────────────────

#[test]
fn release_without_movement_is_a_click() {
    let mut board = Board::flat();
    board.down("note", DRAG, 30.0, 25.0);
    let events = board.up(30.0, 25.0);

    assert_eq!(
        events,
        vec![EngineEvent::Click {
            item: id("note"),
            x: 30.0,
            y: 25.0,
            modifiers: Modifiers::NONE,
        }]
    );
    assert_eq!(board.store.writes(), 0);
    assert_eq!(board.view_position("note"), None);
    assert!(!board.engine.wants_window_events());
}

#[test]
fn three_pixels_is_still_a_click() {
    let mut board = Board::flat();
    board.down("note", DRAG, 30.0, 25.0);
    assert!(board.move_to(33.0, 22.0).is_empty());
    assert!(board.move_to(27.0, 28.0).is_empty());
    let events = board.up(27.0, 28.0);

    // Click reports where the pointer went down, not where it came up.
    assert!(matches!(
        events.as_slice(),
        [EngineEvent::Click { x, y, .. }] if *x == 30.0 && *y == 25.0
    ));
    assert_eq!(board.store.writes(), 0);
}

#[test]
fn crossing_the_threshold_on_one_axis_starts_a_drag() {
    let mut board = Board::flat();
    board.down("note", DRAG, 30.0, 25.0);
    let events = board.move_to(30.0, 28.5);
    assert_eq!(events, vec![EngineEvent::DragStart { item: id("note") }]);
    assert!(board.engine.is_dragging());

    // Only one DragStart per session.
    assert!(board.move_to(60.0, 60.0).is_empty());
}

#[test]
fn release_far_from_the_last_move_lands_at_the_release_point() {
    // No move events at all: the release alone crosses the threshold.
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    let events = board.up(200.0, 200.0);
    assert_eq!(
        events,
        vec![
            EngineEvent::DragStart { item: id("note") },
            EngineEvent::DragEnd {
                item: id("note"),
                position: Position::new(190.0, 190.0),
            },
        ]
    );
    assert!(events.iter().all(|e| e.item() == id("note")));
    assert_eq!(board.store.writes(), 1);

    // A release that overshoots the last move commits where it lands.
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(40.0, 40.0);
    board.up(70.0, 50.0);
    assert_eq!(board.stored_position("note"), Position::new(60.0, 40.0));
    assert_eq!(board.store.writes(), 1);
}

// ─── Position math ───────────────────────────────────────────────────────

#[test]
fn zoomed_and_panned_scenario() {
    // Canvas at (100, 0), translate (100, 50), scale 2: the note at (10, 10)
    // renders with its top-left at (220, 70).
    let mut board =
        Board::new(Point::new(100.0, 0.0), CanvasTransform::new(2.0, 100.0, 50.0));
    board.down("note", DRAG, 220.0, 70.0);
    board.move_to(240.0, 90.0);
    assert_eq!(board.view_position("note"), Some(Position::new(20.0, 20.0)));

    let events = board.up(240.0, 90.0);
    assert_eq!(
        events,
        vec![EngineEvent::DragEnd {
            item: id("note"),
            position: Position::new(20.0, 20.0),
        }]
    );
    assert_eq!(board.stored_position("note"), Position::new(20.0, 20.0));
}

#[test]
fn pointer_delta_is_divided_by_scale_at_every_zoom() {
    for scale in [0.25, 0.5, 1.0, 2.0, 4.0] {
        let mut board = Board::new(Point::new(5.0, 7.0), CanvasTransform::new(scale, 30.0, -20.0));
        // Grab 4 screen px inside the note's top-left corner.
        let top_left = Point::new(10.0 * scale + 30.0 + 5.0, 10.0 * scale - 20.0 + 7.0);
        let down = Point::new(top_left.x + 4.0, top_left.y + 4.0);
        board.down("note", DRAG, down.x, down.y);
        board.move_to(down.x + 30.0, down.y - 18.0);
        board.move_to(down.x + 60.0, down.y - 36.0);
        board.up(down.x + 60.0, down.y - 36.0);

        let stored = board.stored_position("note");
        assert_close(stored.x, 10.0 + 60.0 / scale);
        assert_close(stored.y, 10.0 - 36.0 / scale);
    }
}

#[test]
fn zoom_change_mid_drag_is_tracked() {
    let mut board = Board::flat();
    // Grab 10 px inside the top-left corner.
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(50.0, 50.0);
    assert_eq!(board.view_position("note"), Some(Position::new(40.0, 40.0)));

    board.view.set_css_transform("matrix(2, 0, 0, 2, 0, 0)");
    board.move_to(50.0, 50.0);
    // (50 / 2) - (10 / 2)
    assert_eq!(board.view_position("note"), Some(Position::new(20.0, 20.0)));

    board.up(50.0, 50.0);
    assert_eq!(board.stored_position("note"), Position::new(20.0, 20.0));
}

#[test]
fn unparsable_transform_mid_drag_falls_back_to_identity() {
    let mut board = Board::new(Point::ZERO, CanvasTransform::new(2.0, 0.0, 0.0));
    board.down("note", DRAG, 20.0, 20.0);
    board.view.set_css_transform("matrix(2, 0, 0");
    board.move_to(40.0, 40.0);
    // Identity: 40 - 0 offset.
    assert_eq!(board.view_position("note"), Some(Position::new(40.0, 40.0)));
    board.up(40.0, 40.0);
    assert_eq!(board.store.writes(), 1);
}

#[test]
fn page_scroll_mid_drag_moves_the_canvas_origin() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    // The page scrolls down 50 px, so the canvas now starts above the viewport.
    board.view.set_origin(Point::new(0.0, -50.0));
    board.move_to(40.0, 40.0);
    assert_eq!(board.view_position("note"), Some(Position::new(30.0, 80.0)));
    board.up(40.0, 40.0);
    assert_eq!(board.stored_position("note"), Position::new(30.0, 80.0));
}

// ─── One commit per session ──────────────────────────────────────────────

#[test]
fn exactly_one_commit_regardless_of_move_count() {
    for moves in [1usize, 500] {
        let mut board = Board::flat();
        board.down("note", DRAG, 20.0, 20.0);
        let mut last = Point::new(20.0, 20.0);
        for i in 1..=moves {
            last = Point::new(30.0 + i as f64 * 0.1, 30.0);
            board.move_to(last.x, last.y);
        }
        board.up(last.x, last.y);
        assert_eq!(board.store.writes(), 1, "{moves} moves");
        assert_eq!(
            board.view.overlay(id("note")).unwrap().position_writes,
            moves
        );
    }
}

#[test]
fn duplicate_pointer_up_does_not_commit_twice() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(80.0, 80.0);
    assert_eq!(board.up(80.0, 80.0).len(), 1);
    assert!(board.up(80.0, 80.0).is_empty());
    assert_eq!(board.store.writes(), 1);
}

// ─── Session styling & z-order ───────────────────────────────────────────

#[test]
fn styling_applies_while_dragging_and_clears_on_commit() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    assert!(!board.view.has_class(id("note"), DRAGGING_CLASS));
    assert_eq!(board.view.cursor(), None);

    board.move_to(40.0, 40.0);
    let overlay = board.view.overlay(id("note")).unwrap();
    assert!(overlay.has_class(DRAGGING_CLASS));
    assert!(!overlay.transitions);
    assert_eq!(board.view.cursor(), Some(Cursor::Grabbing));

    board.up(40.0, 40.0);
    let overlay = board.view.overlay(id("note")).unwrap();
    assert!(!overlay.has_class(DRAGGING_CLASS));
    assert!(overlay.transitions);
    assert_eq!(board.view.cursor(), None);
}

#[test]
fn brought_to_front_when_the_drag_starts() {
    let mut board = Board::flat();
    assert_eq!(board.store.z_order().first(), Some(&id("note")));

    board.down("note", DRAG, 20.0, 20.0);
    assert_eq!(board.store.z_order().first(), Some(&id("note")));

    board.move_to(40.0, 40.0);
    assert_eq!(board.store.z_order().last(), Some(&id("note")));
}

// ─── Exclusivity ─────────────────────────────────────────────────────────

#[test]
fn second_item_is_ignored_while_a_drag_is_live() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    assert!(board.down("video", DRAG, 410.0, 60.0).is_empty());
    assert_eq!(board.engine.active_item(), Some(id("note")));

    board.move_to(60.0, 60.0);
    board.up(60.0, 60.0);
    assert_eq!(board.stored_position("note"), Position::new(50.0, 50.0));
    assert_eq!(board.stored_position("video"), Position::new(400.0, 50.0));
    assert_eq!(board.view_position("video"), None);
}

#[test]
fn double_click_is_swallowed_during_a_session() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    let events = board.send(InputEvent::DoubleClick {
        item: id("note"),
        x: 20.0,
        y: 20.0,
        modifiers: Modifiers::NONE,
    });
    assert!(events.is_empty());
}

// ─── Cancel & abort ──────────────────────────────────────────────────────

#[test]
fn escape_reverts_the_drag() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(90.0, 90.0);
    let events = board.send(InputEvent::Cancel);

    assert_eq!(
        events,
        vec![EngineEvent::Cancelled {
            item: id("note"),
            kind: SessionKind::Drag,
        }]
    );
    assert_eq!(board.view_position("note"), Some(Position::new(10.0, 10.0)));
    assert!(!board.view.has_class(id("note"), DRAGGING_CLASS));
    assert!(!board.engine.wants_window_events());

    assert!(board.up(90.0, 90.0).is_empty());
    assert_eq!(board.store.writes(), 0);
}

#[test]
fn escape_can_be_disabled() {
    let mut board = Board::flat();
    board.engine = grip_editor::InteractionEngine::new(GripConfig {
        cancel_on_escape: false,
        ..GripConfig::default()
    });
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(90.0, 90.0);
    assert!(board.send(InputEvent::Cancel).is_empty());
    assert!(board.engine.is_dragging());
    board.up(90.0, 90.0);
    assert_eq!(board.store.writes(), 1);
}

#[test]
fn unmount_mid_drag_aborts_without_writing() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(90.0, 90.0);

    board.view.unmount(id("note"));
    assert!(board.send(InputEvent::Unmount { item: id("note") }).is_empty());
    assert!(!board.engine.wants_window_events());
    assert!(board.up(90.0, 90.0).is_empty());
    assert_eq!(board.store.writes(), 0);
}

#[test]
fn vanished_item_at_pointer_up_is_discarded() {
    // The host never reported the unmount; pointer-up finds the element gone.
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(90.0, 90.0);
    board.view.unmount(id("note"));

    assert!(board.up(90.0, 90.0).is_empty());
    assert_eq!(board.store.writes(), 0);
    assert!(!board.engine.wants_window_events());
    assert_eq!(board.view.cursor(), None);
}

#[test]
fn vanished_canvas_at_pointer_up_is_discarded() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(90.0, 90.0);
    board.view.unmount_canvas();

    // Moves without a canvas are skipped.
    assert!(board.move_to(120.0, 120.0).is_empty());
    assert_eq!(board.view_position("note"), Some(Position::new(80.0, 80.0)));
    assert!(board.up(120.0, 120.0).is_empty());
    assert_eq!(board.store.writes(), 0);
}

#[test]
fn teardown_aborts_any_session() {
    let mut board = Board::flat();
    board.down("note", DRAG, 20.0, 20.0);
    board.move_to(90.0, 90.0);
    assert!(board.send(InputEvent::Teardown).is_empty());
    assert!(!board.engine.wants_window_events());
    assert_eq!(board.store.writes(), 0);
}

#[test]
fn pointer_down_on_an_unknown_item_is_ignored() {
    let mut board = Board::flat();
    assert!(board.down("ghost", DRAG, 0.0, 0.0).is_empty());
    assert!(!board.engine.wants_window_events());
}

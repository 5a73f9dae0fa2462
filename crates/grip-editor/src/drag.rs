//! Drag controller: pointer-down → armed → dragging → commit.
//!
//! A pointer-down on a drag handle only arms the controller. The session
//! becomes a drag once the pointer travels more than the threshold on
//! either axis; releasing before that is a click. While dragging, the
//! item follows the pointer with the grab offset preserved, re-resolving
//! the canvas transform every tick.

use crate::input::Modifiers;
use crate::registry::SessionHandle;
use grip_core::{ItemId, Point, Position, Vec2, Viewport};

/// Per-session bookkeeping, created at pointer-down.
#[derive(Debug)]
pub struct DragSession {
    handle: SessionHandle,
    /// Screen point of the pointer-down.
    down: Point,
    modifiers: Modifiers,
    /// Pointer-down minus the item's on-screen top-left, in screen pixels.
    offset: Vec2,
    original: Position,
    /// Last position written to the view.
    last: Position,
}

impl DragSession {
    pub fn new(
        handle: SessionHandle,
        down: Point,
        modifiers: Modifiers,
        offset: Vec2,
        original: Position,
    ) -> Self {
        Self {
            handle,
            down,
            modifiers,
            offset,
            original,
            last: original,
        }
    }

    pub fn item(&self) -> ItemId {
        self.handle.item()
    }

    /// Canvas position for the pointer at `screen`: the pointer in canvas
    /// space, minus the grab offset at the current zoom.
    pub fn position_at(&self, screen: Point, viewport: &Viewport) -> Position {
        let canvas = viewport.screen_to_canvas(screen) - viewport.delta_to_canvas(self.offset);
        Position::from(canvas)
    }

    fn exceeds(&self, screen: Point, threshold: f64) -> bool {
        let d = screen - self.down;
        d.x.abs() > threshold || d.y.abs() > threshold
    }
}

#[derive(Debug, Default)]
enum DragState {
    #[default]
    Idle,
    Armed(DragSession),
    Dragging(DragSession),
}

/// Result of a pointer-move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragStep {
    /// Not dragging, still under threshold, or the tick was unusable.
    Ignored,
    /// The threshold was crossed on this move.
    Started { item: ItemId, position: Position },
    Moved { item: ItemId, position: Position },
}

/// Result of a pointer-up.
#[derive(Debug)]
pub enum DragRelease {
    /// Never crossed the threshold.
    Click {
        handle: SessionHandle,
        down: Point,
        modifiers: Modifiers,
    },
    /// A real drag ended; `position` is the last live position.
    Drop {
        handle: SessionHandle,
        position: Position,
        original: Position,
    },
}

/// Result of an abort.
#[derive(Debug)]
pub struct DragAbort {
    pub handle: SessionHandle,
    pub original: Position,
    /// The drag had started, so the view has moved and carries session styling.
    pub was_dragging: bool,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Arm on pointer-down. The session carries the registry slot.
    pub fn arm(&mut self, session: DragSession) {
        debug_assert!(!self.is_active(), "arm while a drag is live");
        log::trace!("drag armed on {:?}", session.item());
        self.state = DragState::Armed(session);
    }

    pub fn pointer_move(&mut self, screen: Point, viewport: &Viewport, threshold: f64) -> DragStep {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragStep::Ignored,
            DragState::Armed(session) if !session.exceeds(screen, threshold) => {
                self.state = DragState::Armed(session);
                DragStep::Ignored
            }
            DragState::Armed(mut session) => {
                let position = session.position_at(screen, viewport);
                let item = session.item();
                let step = if position.is_finite() {
                    session.last = position;
                    DragStep::Started { item, position }
                } else {
                    log::warn!("non-finite drag position for {item:?}, holding");
                    DragStep::Started {
                        item,
                        position: session.last,
                    }
                };
                log::debug!("drag started on {item:?}");
                self.state = DragState::Dragging(session);
                step
            }
            DragState::Dragging(mut session) => {
                let position = session.position_at(screen, viewport);
                let item = session.item();
                let step = if position.is_finite() {
                    session.last = position;
                    DragStep::Moved { item, position }
                } else {
                    log::warn!("non-finite drag position for {item:?}, skipping tick");
                    DragStep::Ignored
                };
                self.state = DragState::Dragging(session);
                step
            }
        }
    }

    /// End the session on pointer-up. `None` when idle.
    pub fn release(&mut self) -> Option<DragRelease> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            DragState::Armed(session) => Some(DragRelease::Click {
                handle: session.handle,
                down: session.down,
                modifiers: session.modifiers,
            }),
            DragState::Dragging(session) => Some(DragRelease::Drop {
                handle: session.handle,
                position: session.last,
                original: session.original,
            }),
        }
    }

    /// Drop the session without producing a click or a drop.
    pub fn abort(&mut self) -> Option<DragAbort> {
        let (session, was_dragging) = match std::mem::take(&mut self.state) {
            DragState::Idle => return None,
            DragState::Armed(s) => (s, false),
            DragState::Dragging(s) => (s, true),
        };
        Some(DragAbort {
            handle: session.handle,
            original: session.original,
            was_dragging,
        })
    }
}

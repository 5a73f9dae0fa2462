//! Commit gateway: the only path from a session to the item store.
//!
//! Each session commits at most once. The gateway tracks the highest
//! session id it has written and drops anything at or below it, so a
//! duplicated pointer-up can never produce a second write. Non-finite
//! values are replaced by the session's originals before they reach the
//! store.

use crate::registry::SessionId;
use crate::store::ItemStore;
use crate::view::{DRAGGING_CLASS, RESIZING_CLASS, ViewLayer};
use grip_core::{Dimension, Dimensions, ItemId, Position};

/// Values a session wants to write, with the originals to fall back to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Commit {
    Move {
        position: Position,
        original: Position,
    },
    Resize {
        position: Position,
        dimensions: Dimensions,
        original_position: Position,
        original_dimensions: Dimensions,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommitRequest {
    pub session: SessionId,
    pub item: ItemId,
    pub commit: Commit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommitOutcome {
    /// The store received these values.
    Written {
        position: Position,
        dimensions: Option<Dimensions>,
    },
    /// This session already committed.
    Duplicate,
}

#[derive(Debug, Default)]
pub struct CommitGateway {
    high_water: Option<SessionId>,
}

impl CommitGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit<S, V>(
        &mut self,
        store: &mut S,
        view: &mut V,
        request: &CommitRequest,
    ) -> CommitOutcome
    where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        if self.high_water.is_some_and(|hw| request.session <= hw) {
            log::debug!("{:?} already committed, dropping", request.session);
            return CommitOutcome::Duplicate;
        }
        self.high_water = Some(request.session);

        let outcome = match request.commit {
            Commit::Move { position, original } => {
                let position = sanitize_position(request.item, position, original);
                store.update_position(request.item, position);
                CommitOutcome::Written {
                    position,
                    dimensions: None,
                }
            }
            Commit::Resize {
                position,
                dimensions,
                original_position,
                original_dimensions,
            } => {
                let position = sanitize_position(request.item, position, original_position);
                let dimensions = Dimensions::new(
                    sanitize_dimension(dimensions.width, original_dimensions.width),
                    sanitize_dimension(dimensions.height, original_dimensions.height),
                );
                store.update_geometry(request.item, position, dimensions);
                CommitOutcome::Written {
                    position,
                    dimensions: Some(dimensions),
                }
            }
        };
        log::debug!("{:?} committed {:?}: {outcome:?}", request.session, request.item);

        clear_session_styling(view, request.item);
        outcome
    }
}

/// Undo the transient styling a session put on the page.
pub fn clear_session_styling<V: ViewLayer + ?Sized>(view: &mut V, item: ItemId) {
    view.set_class(item, DRAGGING_CLASS, false);
    view.set_class(item, RESIZING_CLASS, false);
    view.set_transitions(item, true);
    view.set_cursor(None);
}

fn sanitize_position(item: ItemId, position: Position, original: Position) -> Position {
    if position.is_finite() {
        position
    } else {
        log::warn!("refusing non-finite position {position:?} for {item:?}");
        original
    }
}

fn sanitize_dimension(value: Dimension, original: Dimension) -> Dimension {
    match value {
        Dimension::Px(v) if !v.is_finite() || v < 0.0 => original,
        other => other,
    }
}

//! Callbacks surfaced to the host, as values.
//!
//! Every `InteractionEngine::handle` call returns the events it produced,
//! in order. Hosts map them onto their own callbacks (`onDragStart`, ...).

use crate::input::Modifiers;
use grip_core::{Dimensions, HandlePosition, ItemId, Position};
use serde::Serialize;
use smallvec::SmallVec;

/// The two kinds of pointer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionKind {
    Drag,
    Resize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EngineEvent {
    /// The pointer crossed the drag threshold.
    DragStart { item: ItemId },
    /// Drag committed; `position` is what the store received.
    DragEnd { item: ItemId, position: Position },
    ResizeStart {
        item: ItemId,
        handle: HandlePosition,
    },
    /// Fired on every resize tick for live previews.
    Resize {
        item: ItemId,
        dimensions: Dimensions,
    },
    /// Resize committed; `dimensions` is what the store received.
    ResizeEnd {
        item: ItemId,
        dimensions: Dimensions,
    },
    /// Pointer went down and up without crossing the drag threshold.
    /// Carries the pointer-down coordinates.
    Click {
        item: ItemId,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    DoubleClick {
        item: ItemId,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },
    /// Session reverted by `InputEvent::Cancel`; nothing was written.
    Cancelled { item: ItemId, kind: SessionKind },
}

impl EngineEvent {
    pub fn item(&self) -> ItemId {
        match self {
            Self::DragStart { item }
            | Self::DragEnd { item, .. }
            | Self::ResizeStart { item, .. }
            | Self::Resize { item, .. }
            | Self::ResizeEnd { item, .. }
            | Self::Click { item, .. }
            | Self::DoubleClick { item, .. }
            | Self::Cancelled { item, .. } => *item,
        }
    }
}

/// Events from a single input event. Almost always zero to two.
pub type Events = SmallVec<[EngineEvent; 2]>;

//! Input abstraction layer.
//!
//! Normalizes pointer events from any host (DOM listeners, native windows,
//! test scripts) into a unified `InputEvent` consumed by the engine. All
//! coordinates are screen-space pixels.

use grip_core::{ItemId, PointerTarget};
use serde::{Deserialize, Serialize};

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed on an item.
    PointerDown {
        item: ItemId,
        /// What part of the item was hit (see `grip_core::hit::classify`).
        target: PointerTarget,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    /// Pointer moved anywhere in the window.
    PointerMove { x: f64, y: f64, modifiers: Modifiers },

    /// Primary button released anywhere in the window.
    PointerUp { x: f64, y: f64, modifiers: Modifiers },

    /// Double click on an item.
    DoubleClick {
        item: ItemId,
        x: f64,
        y: f64,
        modifiers: Modifiers,
    },

    /// Escape pressed: revert and end the active session.
    Cancel,

    /// An item's element was removed from the page.
    Unmount { item: ItemId },

    /// The canvas itself is being torn down.
    Teardown,
}

impl InputEvent {
    pub fn pointer_down(item: ItemId, target: PointerTarget, x: f64, y: f64) -> Self {
        Self::PointerDown {
            item,
            target,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::PointerUp {
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }
}

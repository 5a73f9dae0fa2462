//! Canvas-wide "one session at a time" registry.
//!
//! Only one drag or resize may be live on a canvas. A pointer-down on
//! another item while a session is active is ignored until the button is
//! released. Ownership is explicit: `try_acquire` hands out a
//! `SessionHandle`, and only that handle can release the slot.

use crate::events::SessionKind;
use grip_core::ItemId;
use serde::Serialize;
use std::fmt;

/// Monotonic per-canvas session identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SessionId(u64);

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// Proof of owning the active session. Not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionHandle {
    id: SessionId,
    item: ItemId,
    kind: SessionKind,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }
}

#[derive(Debug, Default)]
pub struct ActiveSessionRegistry {
    active: Option<(SessionId, ItemId, SessionKind)>,
    next_id: u64,
}

impl ActiveSessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the canvas for `item`. `None` while another session is live.
    pub fn try_acquire(&mut self, item: ItemId, kind: SessionKind) -> Option<SessionHandle> {
        if let Some((id, owner, _)) = self.active {
            log::debug!("{id:?} still owned by {owner:?}, ignoring {kind:?} on {item:?}");
            return None;
        }
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.active = Some((id, item, kind));
        log::debug!("{id:?} acquired: {kind:?} on {item:?}");
        Some(SessionHandle { id, item, kind })
    }

    /// Give the slot back. Returns `false` if `handle` was not the owner.
    pub fn release(&mut self, handle: SessionHandle) -> bool {
        match self.active {
            Some((id, _, _)) if id == handle.id => {
                self.active = None;
                log::debug!("{id:?} released");
                true
            }
            _ => {
                log::warn!("stale handle {:?} released", handle.id);
                false
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_item(&self) -> Option<ItemId> {
        self.active.map(|(_, item, _)| item)
    }

    pub fn active_kind(&self) -> Option<SessionKind> {
        self.active.map(|(_, _, kind)| kind)
    }
}

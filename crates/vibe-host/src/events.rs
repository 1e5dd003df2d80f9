//! Host input event values
//!
//! Plain data describing what happened on the host page. The engine never
//! registers callbacks with the host; the host (or a test) feeds these
//! values into `VibeModeManager::handle_event`.

use vibe_core::{Point, Viewport};

use crate::node::NodeId;

/// Pointer crossing events, already resolved to a dispatch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: NodeId,
    pub position: Point,
}

/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn chord(key: Key, ctrl: bool, shift: bool) -> Self {
        Self { key, ctrl, shift }
    }
}

/// Everything the host surfaces to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
    /// A click at a viewport position, dispatched to a target node.
    Click { target: NodeId, position: Point },
    Resize(Viewport),
    Scroll { x: f64, y: f64 },
    /// Periodic tick; drives debounce/grace timers.
    Tick,
}

impl HostEvent {
    pub fn pointer_enter(target: NodeId, position: Point) -> Self {
        Self::Pointer(PointerEvent {
            kind: PointerKind::Enter,
            target,
            position,
        })
    }

    pub fn pointer_leave(target: NodeId, position: Point) -> Self {
        Self::Pointer(PointerEvent {
            kind: PointerKind::Leave,
            target,
            position,
        })
    }
}

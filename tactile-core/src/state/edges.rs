//! One-shot edge flags
//!
//! Navigation consumers (menus, dialogs, text fields) poll these flags. Each
//! flag is latched by the dispatcher and cleared by the first reader, so a
//! transition is observed exactly once.
//!
//! The flags are atomics so consumer tasks can take them without a lock
//! while the dispatcher task keeps writing.

use portable_atomic::{AtomicBool, Ordering};

/// Edge flag identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Edge {
    Up = 0,
    Down,
    Left,
    Right,
    /// `Up` or `Left`
    Previous,
    /// `Down` or `Right`
    Next,
    Select,
    Escape,
    /// Any key or button activity
    AnyKey,
}

impl Edge {
    /// All edges, in declaration order
    pub const ALL: [Edge; EDGE_COUNT] = [
        Edge::Up,
        Edge::Down,
        Edge::Left,
        Edge::Right,
        Edge::Previous,
        Edge::Next,
        Edge::Select,
        Edge::Escape,
        Edge::AnyKey,
    ];
}

/// Number of edge flags
pub const EDGE_COUNT: usize = 9;

#[allow(clippy::declare_interior_mutable_const)]
const CLEAR: AtomicBool = AtomicBool::new(false);

/// Latched navigation edges
pub struct EdgeFlags {
    flags: [AtomicBool; EDGE_COUNT],
}

impl Default for EdgeFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeFlags {
    /// All flags clear; usable in a `static`
    pub const fn new() -> Self {
        Self {
            flags: [CLEAR; EDGE_COUNT],
        }
    }

    fn flag(&self, edge: Edge) -> &AtomicBool {
        &self.flags[edge as usize]
    }

    /// Read and clear a flag
    pub fn take(&self, edge: Edge) -> bool {
        self.flag(edge).swap(false, Ordering::AcqRel)
    }

    /// Take a specific edge; on success also consume `AnyKey`
    ///
    /// A consumer that handled a specific key has handled "any key" too.
    pub fn check(&self, edge: Edge) -> bool {
        if !self.take(edge) {
            return false;
        }
        self.flag(Edge::AnyKey).store(false, Ordering::Release);
        true
    }

    /// Read a flag without clearing it
    pub fn peek(&self, edge: Edge) -> bool {
        self.flag(edge).load(Ordering::Acquire)
    }

    /// Overwrite a flag with the current level
    pub fn publish(&self, edge: Edge, value: bool) {
        self.flag(edge).store(value, Ordering::Release);
    }

    /// Latch a flag
    pub fn raise(&self, edge: Edge) {
        self.publish(edge, true);
    }

    /// Clear every flag
    pub fn clear_all(&self) {
        for flag in &self.flags {
            flag.store(false, Ordering::Release);
        }
    }
}

/// Long-press handshake between consumers and the dispatcher
///
/// Consumers that implement key repeat set `active` while a key is being
/// held so the dispatcher bypasses its rate limiter. `pending` marks a
/// long press in the making; the dispatcher disarms it on key release.
pub struct LongPress {
    active: AtomicBool,
    pending: AtomicBool,
}

impl Default for LongPress {
    fn default() -> Self {
        Self::new()
    }
}

impl LongPress {
    /// Inactive and disarmed; usable in a `static`
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            pending: AtomicBool::new(false),
        }
    }

    /// Enable or disable the rate-limiter bypass
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Rate-limiter bypass in effect
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Mark a long press as pending
    pub fn arm(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Long press pending
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Drop a pending long press
    pub fn disarm(&self) {
        self.pending.store(false, Ordering::Release);
    }
}

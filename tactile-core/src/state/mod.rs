//! Input state
//!
//! The canonical key event, the one-shot edge flags read by consumers, and
//! the modifier/lock state that persists across dispatch cycles.

pub mod edges;
pub mod event;
pub mod modifiers;

pub use edges::{Edge, EdgeFlags, LongPress};
pub use event::KeyEvent;
pub use modifiers::{ModifierState, ModifierUpdate};

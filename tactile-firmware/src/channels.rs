//! Inter-task communication
//!
//! Static state shared between the interrupt, input and UI tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use tactile_core::{EdgeFlags, KeyEvent, KeyInterrupt, LongPress};

/// Channel capacity for pressed key events
const KEY_CHANNEL_SIZE: usize = 4;

/// Pressed key events published by the input task
pub static KEY_EVENTS: Channel<CriticalSectionRawMutex, KeyEvent, KEY_CHANNEL_SIZE> =
    Channel::new();

/// One-shot navigation edges, consumed by the UI
pub static EDGES: EdgeFlags = EdgeFlags::new();

/// Long-press state, driven by the UI and cleared on key release
pub static LONG_PRESS: LongPress = LongPress::new();

/// Set by the controller INT line, cleared by the dispatcher
pub static KEY_IRQ: KeyInterrupt = KeyInterrupt::new();

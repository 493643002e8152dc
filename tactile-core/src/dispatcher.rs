//! Event dispatcher
//!
//! The periodic entry point of the input layer. Each call to
//! [`Dispatcher::poll`] is one short, non-blocking cycle:
//!
//! 1. Rate limit (bypassed while a long press is active)
//! 2. Shoulder button (always available, doubles as wake/select)
//! 3. Backend specific processing:
//!    - interrupt backend: one queued press/release event per cycle,
//!      edges derived from tracked press/release levels
//!    - polled backend: aggregated snapshot, edges raised from
//!      "is this key held" queries
//!
//! Any input arriving while the screen sleeps is spent on waking it.

use tactile_hal::InputPin;

use crate::backend::{Backend, InterruptSource, PolledSource};
use crate::config::InputConfig;
use crate::keymap::{decode, hid, Key, SymbolTable};
use crate::state::{Edge, EdgeFlags, KeyEvent, LongPress, ModifierState};
use crate::traits::{KeyEventSource, MatrixScanner, RawKeyEvent, ScreenWake};

/// What a dispatch cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cycle {
    /// Too soon since the last processed cycle
    RateLimited,
    /// Input was spent waking the screen
    WokeScreen,
    /// Nothing to do (no queued event, nothing held)
    Idle,
    /// No hardware activity; tracked levels were republished
    Republished,
    /// Malformed hardware data was dropped
    Discarded,
    /// Fn/Shift transition absorbed by the modifier state
    Modifier,
    /// A key event was published
    Processed,
}

/// Press/release levels tracked by the interrupt backend between cycles
#[derive(Debug, Clone, Copy, Default)]
struct Tracked {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    select: bool,
    escape: bool,
    delete: bool,
}

/// Normalizes backend activity into the canonical key event and edges
pub struct Dispatcher<'a> {
    table: &'a SymbolTable,
    edges: &'a EdgeFlags,
    long_press: &'a LongPress,
    config: InputConfig,
    modifiers: ModifierState,
    tracked: Tracked,
    event: KeyEvent,
    last_cycle_ms: Option<u32>,
}

impl<'a> Dispatcher<'a> {
    /// Create a dispatcher publishing into `edges`
    pub fn new(
        table: &'a SymbolTable,
        edges: &'a EdgeFlags,
        long_press: &'a LongPress,
        config: InputConfig,
    ) -> Self {
        Self {
            table,
            edges,
            long_press,
            config,
            modifiers: ModifierState::new(),
            tracked: Tracked::default(),
            event: KeyEvent::new(),
            last_cycle_ms: None,
        }
    }

    /// Latest canonical key event
    pub fn event(&self) -> &KeyEvent {
        &self.event
    }

    /// Current modifier / caps-lock state
    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// Edge flags this dispatcher publishes into
    pub fn edges(&self) -> &'a EdgeFlags {
        self.edges
    }

    /// Timestamp of the last processed cycle
    pub fn last_cycle_ms(&self) -> Option<u32> {
        self.last_cycle_ms
    }

    /// Drop every latched edge and the current event
    pub fn reset(&mut self) {
        self.edges.clear_all();
        self.event.clear();
    }

    /// Run one dispatch cycle
    ///
    /// `now_ms` is a monotonic millisecond clock; wrap-around is handled.
    pub fn poll<D, S, P, W>(
        &mut self,
        now_ms: u32,
        backend: &mut Backend<'_, D, S>,
        shoulder: &mut P,
        screen: &mut W,
    ) -> Cycle
    where
        D: KeyEventSource,
        S: MatrixScanner,
        P: InputPin,
        W: ScreenWake,
    {
        if self.rate_limited(now_ms) {
            return Cycle::RateLimited;
        }

        if shoulder.is_low() {
            self.last_cycle_ms = Some(now_ms);
            self.edges.raise(Edge::AnyKey);
            if screen.wake_screen() {
                trace!("shoulder button woke screen");
                return Cycle::WokeScreen;
            }
            self.edges.raise(Edge::Select);
        }

        match backend {
            Backend::Interrupt(source) => self.poll_interrupt(now_ms, source, screen),
            Backend::Polled(source) => self.poll_matrix(now_ms, source, screen),
        }
    }

    fn rate_limited(&self, now_ms: u32) -> bool {
        match self.last_cycle_ms {
            Some(last) => {
                now_ms.wrapping_sub(last) < self.config.rate_limit_ms
                    && !self.long_press.is_active()
            }
            None => false,
        }
    }

    fn poll_interrupt<D: KeyEventSource, W: ScreenWake>(
        &mut self,
        now_ms: u32,
        source: &mut InterruptSource<'_, D>,
        screen: &mut W,
    ) -> Cycle {
        if !source.is_pending() {
            self.republish(now_ms);
            return Cycle::Republished;
        }

        let raw = match source.next_event() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cycle::Idle,
            Err(_) => {
                debug!("keyboard: controller read failed");
                return Cycle::Discarded;
            }
        };

        self.apply(now_ms, raw, screen)
    }

    /// No hardware activity: keep held directions alive for key repeat
    fn republish(&mut self, now_ms: u32) {
        if !self.long_press.is_active() {
            // Avoid re-firing a stale select/escape
            self.tracked.select = false;
            self.tracked.escape = false;
        }

        self.publish_directions();
        if self.tracked.select {
            self.edges.raise(Edge::Select);
        }
        self.edges.publish(Edge::Escape, self.tracked.escape);

        if self.tracked.delete {
            self.event.delete_requested = true;
            self.event.pressed = true;
        }
        self.last_cycle_ms = Some(now_ms);
    }

    fn apply<W: ScreenWake>(&mut self, now_ms: u32, raw: RawKeyEvent, screen: &mut W) -> Cycle {
        let Some(pos) = decode(raw.code) else {
            debug!("keyboard: invalid scancode {}", raw.code);
            return Cycle::Discarded;
        };

        if screen.wake_screen() {
            trace!("key {} woke screen", raw.code);
            return Cycle::WokeScreen;
        }
        self.edges.raise(Edge::AnyKey);

        let pressed = raw.pressed;
        if self
            .modifiers
            .update(self.table.primary(pos), pressed)
            .is_consumed()
        {
            return Cycle::Modifier;
        }

        if !pressed {
            self.long_press.disarm();
        }
        self.event.clear();

        let key = self.table.resolve(pos, self.modifiers.effective_shift());
        let tracked = &mut self.tracked;
        let event = &mut self.event;

        match key {
            Key::Backspace if pos.is_last_col() => {
                tracked.delete = pressed;
                tracked.escape = pressed;
            }
            Key::Enter if pos.is_last_col() => {
                event.enter = pressed;
                tracked.select = pressed;
                if pressed {
                    event.push_char('\n');
                }
            }
            Key::Char(ch @ ('`' | ',' | ';' | '/' | '.')) => {
                let level = match ch {
                    '`' => &mut tracked.escape,
                    ',' => &mut tracked.left,
                    ';' => &mut tracked.up,
                    '/' => &mut tracked.right,
                    _ => &mut tracked.down,
                };
                *level = pressed;
                if pressed {
                    event.push_char(ch);
                }
            }
            Key::Shift | Key::Ctrl | Key::Alt | Key::Opt => {
                if pressed {
                    event.modifier_mask |= hid::modifier_bit(key);
                    if let Some(code) = hid::modifier_code(key) {
                        event.push_modifier(code);
                    }
                }
            }
            _ => {
                if let (true, Some(ch)) = (pressed, key.to_char()) {
                    event.push_char(ch);
                }
            }
        }

        if let (true, Some(usage)) = (pressed, hid::usage(key)) {
            event.push_raw(usage);
        }
        event.pressed = pressed;
        event.fn_key = pressed && self.modifiers.fn_held();
        if tracked.delete {
            event.delete_requested = true;
            event.pressed = true;
        }

        self.publish_directions();
        self.edges.publish(Edge::Select, self.tracked.select);
        self.edges.publish(Edge::Escape, self.tracked.escape);
        self.last_cycle_ms = Some(now_ms);
        Cycle::Processed
    }

    fn publish_directions(&self) {
        let t = &self.tracked;
        self.edges.publish(Edge::Up, t.up);
        self.edges.publish(Edge::Down, t.down);
        self.edges.publish(Edge::Left, t.left);
        self.edges.publish(Edge::Right, t.right);
        self.edges.publish(Edge::Previous, t.up || t.left);
        self.edges.publish(Edge::Next, t.down || t.right);
    }

    fn poll_matrix<S: MatrixScanner, W: ScreenWake>(
        &mut self,
        now_ms: u32,
        source: &mut PolledSource<S>,
        screen: &mut W,
    ) -> Cycle {
        if source.update().is_err() {
            debug!("keyboard: matrix scan failed");
        }

        if !source.is_pressed() {
            self.event.clear();
            self.long_press.disarm();
            return Cycle::Idle;
        }

        self.last_cycle_ms = Some(now_ms);
        if screen.wake_screen() {
            trace!("matrix key woke screen");
            return Cycle::WokeScreen;
        }
        self.edges.raise(Edge::AnyKey);

        let state = source.keys_state(self.table);
        let event = &mut self.event;
        event.clear();
        event.pressed = true;
        event.exit_requested = state.word.contains(&'`');
        event.fn_key = state.fn_key;
        event.delete_requested = state.del;
        event.enter = state.enter;
        event.modifier_mask = state.modifiers;
        event.characters = state.word;
        event.raw_codes = state.hid_keys;
        event.modifier_codes = state.modifier_keys;

        let table = self.table;
        let held = |key: Key| source.is_key_pressed(table, key);

        for (ch, edge) in [
            (',', Edge::Left),
            (';', Edge::Up),
            ('/', Edge::Right),
            ('.', Edge::Down),
        ] {
            if held(Key::Char(ch)) {
                self.edges.raise(edge);
            }
        }
        if held(Key::Char('`')) || held(Key::Backspace) {
            self.edges.raise(Edge::Escape);
        }
        if self.edges.peek(Edge::Left) || self.edges.peek(Edge::Up) {
            self.edges.raise(Edge::Previous);
        }
        if self.edges.peek(Edge::Right) || self.edges.peek(Edge::Down) {
            self.edges.raise(Edge::Next);
        }
        if held(Key::Enter) {
            self.edges.raise(Edge::Select);
        }

        Cycle::Processed
    }
}

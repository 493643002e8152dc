//! Modifier and lock state
//!
//! Fn and Shift are tracked as held/released. Pressing Shift while Fn is
//! held toggles caps-lock and drops both, so the combo must be pressed
//! afresh to toggle again.

use crate::keymap::Key;

/// Outcome of feeding a key transition to the modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModifierUpdate {
    /// Not a tracked modifier; continue with literal handling
    Passthrough,
    /// Fn or Shift state updated; the event is consumed
    Consumed,
    /// Fn+Shift combo toggled caps-lock; the event is consumed
    CapsToggled(bool),
}

impl ModifierUpdate {
    /// Whether the caller must stop processing this event
    pub fn is_consumed(&self) -> bool {
        !matches!(self, ModifierUpdate::Passthrough)
    }
}

/// Fn / Shift / caps-lock state, persistent across dispatch cycles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModifierState {
    fn_held: bool,
    shift_held: bool,
    caps_lock: bool,
}

impl ModifierState {
    /// All modifiers released, caps-lock off
    pub const fn new() -> Self {
        Self {
            fn_held: false,
            shift_held: false,
            caps_lock: false,
        }
    }

    /// Apply a press or release of the key whose primary symbol is `primary`
    pub fn update(&mut self, primary: Key, pressed: bool) -> ModifierUpdate {
        match primary {
            Key::Fn => {
                self.fn_held = pressed;
                debug!("fn {}", pressed);
                ModifierUpdate::Consumed
            }
            Key::Shift => {
                self.shift_held = pressed;
                debug!("shift {}", pressed);

                if self.shift_held && self.fn_held {
                    self.caps_lock = !self.caps_lock;
                    self.shift_held = false;
                    self.fn_held = false;
                    info!("caps lock {}", self.caps_lock);
                    return ModifierUpdate::CapsToggled(self.caps_lock);
                }
                ModifierUpdate::Consumed
            }
            _ => ModifierUpdate::Passthrough,
        }
    }

    /// Shift as seen by symbol lookup (`shift XOR caps-lock`)
    pub fn effective_shift(&self) -> bool {
        self.shift_held ^ self.caps_lock
    }

    /// Fn currently held
    pub fn fn_held(&self) -> bool {
        self.fn_held
    }

    /// Shift currently held
    pub fn shift_held(&self) -> bool {
        self.shift_held
    }

    /// Caps-lock engaged
    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fn_then_shift_toggles_caps() {
        let mut mods = ModifierState::new();

        assert_eq!(mods.update(Key::Fn, true), ModifierUpdate::Consumed);
        assert_eq!(mods.update(Key::Shift, true), ModifierUpdate::CapsToggled(true));
        assert!(mods.caps_lock());
        assert!(!mods.fn_held());
        assert!(!mods.shift_held());

        // Releasing both does not toggle again
        assert_eq!(mods.update(Key::Shift, false), ModifierUpdate::Consumed);
        assert_eq!(mods.update(Key::Fn, false), ModifierUpdate::Consumed);
        assert!(mods.caps_lock());

        // Press the combo again to toggle back
        mods.update(Key::Fn, true);
        assert_eq!(mods.update(Key::Shift, true), ModifierUpdate::CapsToggled(false));
        assert!(!mods.caps_lock());
    }

    #[test]
    fn test_shift_then_fn_does_not_toggle() {
        let mut mods = ModifierState::new();
        mods.update(Key::Shift, true);
        mods.update(Key::Fn, true);
        assert!(!mods.caps_lock());
        assert!(mods.shift_held());
        assert!(mods.fn_held());
    }

    #[test]
    fn test_effective_shift() {
        let mut mods = ModifierState::new();
        assert!(!mods.effective_shift());

        mods.update(Key::Shift, true);
        assert!(mods.effective_shift());
        mods.update(Key::Shift, false);

        mods.update(Key::Fn, true);
        mods.update(Key::Shift, true); // caps on, shift cleared
        assert!(mods.effective_shift());

        mods.update(Key::Shift, true); // shift held with caps
        assert!(!mods.effective_shift());
    }

    #[test]
    fn test_other_keys_pass_through() {
        let mut mods = ModifierState::new();
        for key in [Key::Char('a'), Key::Ctrl, Key::Alt, Key::Enter] {
            let update = mods.update(key, true);
            assert_eq!(update, ModifierUpdate::Passthrough);
            assert!(!update.is_consumed());
        }
        assert_eq!(mods, ModifierState::new());
    }
}

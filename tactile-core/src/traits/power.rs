//! Screen power trait

/// Display power control owned by the display subsystem
pub trait ScreenWake {
    /// Wake the screen if it is sleeping
    ///
    /// Returns `true` when the screen was asleep; the input that triggered
    /// the call is then spent on waking and must not be processed further.
    fn wake_screen(&mut self) -> bool;
}

impl<T: ScreenWake + ?Sized> ScreenWake for &mut T {
    fn wake_screen(&mut self) -> bool {
        (**self).wake_screen()
    }
}

/// Screen that never sleeps (headless boards, tests)
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysAwake;

impl ScreenWake for AlwaysAwake {
    fn wake_screen(&mut self) -> bool {
        false
    }
}

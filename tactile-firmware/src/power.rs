//! Display backlight and idle sleep
//!
//! The backlight turns off after a period without input. The next input
//! only turns it back on; the dispatcher drops that input.

use defmt::*;
use embassy_rp::gpio::Output;
use embassy_time::{Duration, Instant};

use tactile_core::traits::ScreenWake;

/// Idle time before the backlight turns off
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Backlight enable pin with idle tracking
pub struct Backlight {
    pin: Output<'static>,
    timeout: Duration,
    last_activity: Instant,
    asleep: bool,
}

impl Backlight {
    /// Take the backlight pin and switch it on
    pub fn new(mut pin: Output<'static>, timeout: Duration) -> Self {
        pin.set_high();
        Self {
            pin,
            timeout,
            last_activity: Instant::now(),
            asleep: false,
        }
    }

    /// Turn the backlight off once the idle timeout has passed
    pub fn tick(&mut self) {
        if !self.asleep && self.last_activity.elapsed() >= self.timeout {
            info!("Idle, backlight off");
            self.pin.set_low();
            self.asleep = true;
        }
    }
}

impl ScreenWake for Backlight {
    fn wake_screen(&mut self) -> bool {
        self.last_activity = Instant::now();
        if !self.asleep {
            return false;
        }

        info!("Input, backlight on");
        self.pin.set_high();
        self.asleep = false;
        true
    }
}

//! Input task
//!
//! Runs the dispatcher on a fixed tick. The dispatcher applies its own
//! rate limit, so most ticks return without touching hardware.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::{Duration, Instant, Ticker};

use tactile_core::{Backend, Cycle, Dispatcher, InputConfig, CARDPUTER};
use tactile_drivers::keypad::Tca8418;
use tactile_drivers::matrix::DemuxMatrix;
use tactile_hal::eh::{EhI2c, EhInput, EhOutput};

use crate::channels::{EDGES, KEY_EVENTS, LONG_PRESS};
use crate::power::Backlight;

/// Dispatcher tick in milliseconds
pub const POLL_INTERVAL_MS: u64 = 10;

/// Controller bus
pub type KeyBus = EhI2c<I2c<'static, I2C0, Blocking>>;

/// Fallback matrix wiring
pub type Matrix = DemuxMatrix<EhOutput<Output<'static>>, EhInput<Input<'static>>>;

/// Whichever backend the probe selected
pub type KeyBackend = Backend<'static, Tca8418<KeyBus>, Matrix>;

/// Input task - dispatches keyboard activity and publishes pressed events
#[embassy_executor::task]
pub async fn input_task(
    mut backend: KeyBackend,
    mut shoulder: EhInput<Input<'static>>,
    mut backlight: Backlight,
    config: InputConfig,
) {
    info!("Input task started ({} backend)", backend.kind());

    let mut dispatcher = Dispatcher::new(&CARDPUTER, &EDGES, &LONG_PRESS, config);
    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;
        backlight.tick();

        let now_ms = Instant::now().as_millis() as u32;
        let cycle = dispatcher.poll(now_ms, &mut backend, &mut shoulder, &mut backlight);

        if cycle != Cycle::Processed || !dispatcher.event().pressed {
            continue;
        }
        if KEY_EVENTS.try_send(dispatcher.event().clone()).is_err() {
            debug!("Key event channel full, dropping event");
        }
    }
}

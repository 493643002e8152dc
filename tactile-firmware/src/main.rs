//! Tactile - Handheld Keyboard Firmware
//!
//! Firmware binary for RP2040-based handhelds with a 56-key keyboard.
//! The keyboard is read through a TCA8418 key-scan controller when one
//! answers on I2C, otherwise by scanning the matrix directly.
//!
//! Pin assignment:
//!
//! | Function                 | Pins             |
//! |--------------------------|------------------|
//! | Controller I2C (SDA/SCL) | GP4 / GP5        |
//! | Controller INT           | GP6              |
//! | Shoulder button          | GP7 (active low) |
//! | Backlight enable         | GP8              |
//! | Matrix decoder A0-A2     | GP9-GP11         |
//! | Matrix sense inputs      | GP12-GP18        |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use {defmt_rtt as _, panic_probe as _};

use tactile_core::{Backend, BackendKind, InputConfig};
use tactile_drivers::keypad::{Tca8418, Tca8418Config};
use tactile_drivers::matrix::DemuxMatrix;
use tactile_hal::eh::{EhI2c, EhInput, EhOutput};
use tactile_hal::I2cConfig;

use crate::channels::KEY_IRQ;
use crate::power::{Backlight, IDLE_TIMEOUT};
use crate::tasks::KeyBackend;

mod channels;
mod power;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Tactile firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Key-scan controller bus (blocking, transfers are a few bytes)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let probe = Tca8418::probe(EhI2c(i2c), Tca8418Config::default());
    if let Err(e) = &probe {
        debug!("TCA8418 probe failed: {:?}", Debug2Format(e));
    }

    let (a0, a1, a2) = (p.PIN_9, p.PIN_10, p.PIN_11);
    let (s0, s1, s2, s3, s4, s5, s6) = (
        p.PIN_12, p.PIN_13, p.PIN_14, p.PIN_15, p.PIN_16, p.PIN_17, p.PIN_18,
    );
    let backend: KeyBackend = Backend::select(probe, &KEY_IRQ, move || {
        let address = [
            EhOutput(Output::new(a0, Level::Low)),
            EhOutput(Output::new(a1, Level::Low)),
            EhOutput(Output::new(a2, Level::Low)),
        ];
        let sense = [
            EhInput(Input::new(s0, Pull::Up)),
            EhInput(Input::new(s1, Pull::Up)),
            EhInput(Input::new(s2, Pull::Up)),
            EhInput(Input::new(s3, Pull::Up)),
            EhInput(Input::new(s4, Pull::Up)),
            EhInput(Input::new(s5, Pull::Up)),
            EhInput(Input::new(s6, Pull::Up)),
        ];
        DemuxMatrix::new(address, sense)
    });

    let shoulder = EhInput(Input::new(p.PIN_7, Pull::Up));
    let backlight = Backlight::new(Output::new(p.PIN_8, Level::High), IDLE_TIMEOUT);

    if backend.kind() == BackendKind::Interrupt {
        let key_int = Input::new(p.PIN_6, Pull::Up);
        spawner.spawn(tasks::key_irq_task(key_int)).unwrap();
    }
    spawner
        .spawn(tasks::input_task(
            backend,
            shoulder,
            backlight,
            InputConfig::default(),
        ))
        .unwrap();
    spawner.spawn(tasks::ui_task()).unwrap();

    info!("All tasks spawned");
}

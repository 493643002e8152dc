//! Adapters from `embedded-hal` 1.0
//!
//! Chip HALs (embassy-rp, esp-hal, ...) implement the `embedded-hal`
//! traits. These thin wrappers expose them through the Tactile traits so
//! drivers stay independent of any particular chip crate.

use embedded_hal::digital;
use embedded_hal::i2c;

use crate::gpio::{InputPin, OutputPin};
use crate::i2c::I2cBus;

/// `embedded-hal` input pin wrapper
///
/// A failed read reports the idle (pulled-up) level, so a faulty line
/// reads as "not pressed".
pub struct EhInput<P>(pub P);

impl<P: digital::InputPin> InputPin for EhInput<P> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or(true)
    }
}

/// `embedded-hal` output pin wrapper
///
/// Output writes on the supported chips are infallible; errors are ignored.
pub struct EhOutput<P>(pub P);

impl<P: digital::OutputPin> OutputPin for EhOutput<P> {
    fn set_high(&mut self) {
        let _ = self.0.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.0.set_low();
    }
}

/// `embedded-hal` blocking I2C wrapper
pub struct EhI2c<B>(pub B);

impl<B> EhI2c<B> {
    /// Release the wrapped bus
    pub fn into_inner(self) -> B {
        self.0
    }
}

impl<B: i2c::I2c> I2cBus for EhI2c<B> {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, write_data, read_buf)
    }
}

//! GPIO pin abstractions
//!
//! Digital pins used by the input layer: the shoulder button, the
//! controller interrupt line, and the address/sense lines of a scanned
//! key matrix.

/// Digital output pin
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }
}

/// Digital input pin
///
/// Reads take `&mut self` because some chip HALs need mutable access
/// to sample a pin.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    ///
    /// Keys and buttons are wired active-low against a pull-up, so this
    /// is the "pressed" reading.
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        (**self).is_high()
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high()
    }

    fn set_low(&mut self) {
        (**self).set_low()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch {
        high: bool,
    }

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }
    }

    impl InputPin for Latch {
        fn is_high(&mut self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_set_state() {
        let mut pin = Latch { high: false };
        pin.set_state(true);
        assert!(pin.is_high());
        pin.set_state(false);
        assert!(pin.is_low());
    }

    #[test]
    fn test_forwarding_through_reference() {
        fn pull_down<P: InputPin + OutputPin>(mut pin: P) -> bool {
            pin.set_low();
            pin.is_low()
        }

        let mut pin = Latch { high: true };
        assert!(pull_down(&mut pin));
        assert!(!pin.high);
    }
}

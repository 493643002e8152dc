//! TCA8418 key-scan controller (I2C)
//!
//! The TCA8418 scans up to an 8 × 10 key matrix on its own and queues
//! press/release events in a 10-deep FIFO, asserting its open-drain INT
//! line while events are pending.
//!
//! # FIFO entries
//!
//! Each `KEY_EVENT_A` read pops one entry:
//! - bit 7: 1 = press, 0 = release
//! - bits 6..0: key number (`row * 10 + column + 1`)
//!
//! A read of 0 means the FIFO is empty.
//!
//! # Bring-up
//!
//! 1. All pins as inputs, GPI events routed to the FIFO, falling-edge
//!    interrupts enabled on every pin
//! 2. Rows/columns claimed for the keypad matrix
//! 3. Stale FIFO entries and interrupt status flushed
//! 4. Key-event and GPI interrupts enabled

use tactile_core::traits::{KeyEventSource, RawKeyEvent};
use tactile_hal::I2cBus;

/// TCA8418 register addresses
pub mod reg {
    /// Configuration
    pub const CFG: u8 = 0x01;
    /// Interrupt status (write 1 to clear)
    pub const INT_STAT: u8 = 0x02;
    /// Key lock and event counter
    pub const KEY_LCK_EC: u8 = 0x03;
    /// Key event FIFO head
    pub const KEY_EVENT_A: u8 = 0x04;
    /// GPIO interrupt status, rows
    pub const GPIO_INT_STAT1: u8 = 0x11;
    /// GPIO interrupt status, columns 0-7
    pub const GPIO_INT_STAT2: u8 = 0x12;
    /// GPIO interrupt status, columns 8-9
    pub const GPIO_INT_STAT3: u8 = 0x13;
    /// GPIO interrupt enable, rows
    pub const GPIO_INT_EN1: u8 = 0x1A;
    pub const GPIO_INT_EN2: u8 = 0x1B;
    pub const GPIO_INT_EN3: u8 = 0x1C;
    /// Keypad / GPIO selection, rows
    pub const KP_GPIO1: u8 = 0x1D;
    /// Keypad / GPIO selection, columns 0-7
    pub const KP_GPIO2: u8 = 0x1E;
    /// Keypad / GPIO selection, columns 8-9
    pub const KP_GPIO3: u8 = 0x1F;
    /// GPI event mode
    pub const GPI_EM1: u8 = 0x20;
    pub const GPI_EM2: u8 = 0x21;
    pub const GPI_EM3: u8 = 0x22;
    /// GPIO direction
    pub const GPIO_DIR1: u8 = 0x23;
    pub const GPIO_DIR2: u8 = 0x24;
    pub const GPIO_DIR3: u8 = 0x25;
    /// GPIO interrupt level
    pub const GPIO_INT_LVL1: u8 = 0x26;
    pub const GPIO_INT_LVL2: u8 = 0x27;
    pub const GPIO_INT_LVL3: u8 = 0x28;
}

/// `CFG` register bits
pub mod cfg {
    /// Key event interrupt enable
    pub const KE_IEN: u8 = 0x01;
    /// GPI interrupt enable
    pub const GPI_IEN: u8 = 0x02;
}

/// `INT_STAT` register bits
pub mod int_stat {
    /// Key event interrupt
    pub const K_INT: u8 = 0x01;
    /// GPI interrupt
    pub const GPI_INT: u8 = 0x02;
}

/// Factory I2C address
pub const DEFAULT_ADDRESS: u8 = 0x34;

/// Hardware FIFO depth
pub const FIFO_DEPTH: u8 = 10;

/// Largest matrix the controller can scan
pub const MAX_ROWS: u8 = 8;
pub const MAX_COLUMNS: u8 = 10;

/// TCA8418 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tca8418Config {
    /// 7-bit I2C address
    pub address: u8,
    /// Matrix rows (1-8)
    pub rows: u8,
    /// Matrix columns (1-10)
    pub columns: u8,
}

impl Default for Tca8418Config {
    fn default() -> Self {
        // 56-key handheld wiring: 7 scan rows × 8 columns
        Self {
            address: DEFAULT_ADDRESS,
            rows: 7,
            columns: 8,
        }
    }
}

impl Tca8418Config {
    /// Check the matrix fits the controller
    pub fn validate(&self) -> bool {
        (1..=MAX_ROWS).contains(&self.rows) && (1..=MAX_COLUMNS).contains(&self.columns)
    }

    /// `KP_GPIO1..3` values claiming the configured rows/columns
    pub fn keypad_masks(&self) -> [u8; 3] {
        let rows = low_bits(self.rows);
        let cols = low_bits(self.columns.min(8));
        let cols_hi = low_bits(self.columns.saturating_sub(8));
        [rows, cols, cols_hi]
    }
}

/// Mask with the lowest `n` bits set (n <= 8)
fn low_bits(n: u8) -> u8 {
    if n >= 8 {
        0xFF
    } else {
        (1u8 << n) - 1
    }
}

/// TCA8418 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tca8418Error<E> {
    /// I2C transfer failed (no ACK during probe means no controller)
    Bus(E),
    /// Matrix dimensions exceed the controller
    InvalidMatrix,
}

impl<E> From<E> for Tca8418Error<E> {
    fn from(e: E) -> Self {
        Tca8418Error::Bus(e)
    }
}

/// TCA8418 driver
pub struct Tca8418<B> {
    bus: B,
    config: Tca8418Config,
}

impl<B: I2cBus> Tca8418<B> {
    /// Wrap a bus without touching the device
    pub fn new(bus: B, config: Tca8418Config) -> Self {
        Self { bus, config }
    }

    /// Detect and fully bring up the controller
    ///
    /// Fails if the device does not acknowledge, which is how boards
    /// without a controller are recognized.
    pub fn probe(bus: B, config: Tca8418Config) -> Result<Self, Tca8418Error<B::Error>> {
        if !config.validate() {
            return Err(Tca8418Error::InvalidMatrix);
        }

        let mut dev = Self::new(bus, config);
        dev.read(reg::CFG)?;
        dev.init()?;
        dev.configure_matrix()?;
        dev.flush()?;
        dev.enable_interrupts()?;
        Ok(dev)
    }

    /// Get the configuration
    pub fn config(&self) -> &Tca8418Config {
        &self.config
    }

    /// Give the bus back
    pub fn release(self) -> B {
        self.bus
    }

    /// Put every pin in input mode with FIFO events and falling-edge interrupts
    pub fn init(&mut self) -> Result<(), B::Error> {
        for bank in 0..3 {
            self.write(reg::GPIO_DIR1 + bank, 0x00)?;
            self.write(reg::GPI_EM1 + bank, 0xFF)?;
            self.write(reg::GPIO_INT_LVL1 + bank, 0x00)?;
            self.write(reg::GPIO_INT_EN1 + bank, 0xFF)?;
        }
        Ok(())
    }

    /// Claim the configured rows/columns for keypad scanning
    pub fn configure_matrix(&mut self) -> Result<(), Tca8418Error<B::Error>> {
        if !self.config.validate() {
            return Err(Tca8418Error::InvalidMatrix);
        }

        let [rows, cols, cols_hi] = self.config.keypad_masks();
        self.write(reg::KP_GPIO1, rows)?;
        self.write(reg::KP_GPIO2, cols)?;
        self.write(reg::KP_GPIO3, cols_hi)?;
        Ok(())
    }

    /// Drain stale FIFO entries and clear pending interrupt status
    ///
    /// Returns the number of entries discarded.
    pub fn flush(&mut self) -> Result<u8, B::Error> {
        let mut drained = 0;
        while drained < FIFO_DEPTH && self.read(reg::KEY_EVENT_A)? != 0 {
            drained += 1;
        }

        // Reading the GPIO status registers clears them
        self.read(reg::GPIO_INT_STAT1)?;
        self.read(reg::GPIO_INT_STAT2)?;
        self.read(reg::GPIO_INT_STAT3)?;
        self.write(reg::INT_STAT, int_stat::K_INT | int_stat::GPI_INT)?;
        Ok(drained)
    }

    /// Enable key-event and GPI interrupts on the INT line
    pub fn enable_interrupts(&mut self) -> Result<(), B::Error> {
        let value = self.read(reg::CFG)?;
        self.write(reg::CFG, value | cfg::GPI_IEN | cfg::KE_IEN)
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), B::Error> {
        self.bus.write_register(self.config.address, reg, value)
    }

    fn read(&mut self, reg: u8) -> Result<u8, B::Error> {
        self.bus.read_register(self.config.address, reg)
    }
}

impl<B: I2cBus> KeyEventSource for Tca8418<B> {
    type Error = B::Error;

    fn acknowledge_interrupt(&mut self) -> Result<bool, B::Error> {
        self.write(reg::INT_STAT, int_stat::K_INT)?;
        Ok(self.read(reg::INT_STAT)? & int_stat::K_INT != 0)
    }

    fn queued(&mut self) -> Result<u8, B::Error> {
        Ok(self.read(reg::KEY_LCK_EC)? & 0x0F)
    }

    fn dequeue(&mut self) -> Result<Option<RawKeyEvent>, B::Error> {
        match self.read(reg::KEY_EVENT_A)? {
            0 => Ok(None),
            byte => Ok(Some(RawKeyEvent::from_fifo(byte))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::{Deque, Vec};

    /// Register-level TCA8418 model
    struct MockBus {
        regs: [u8; 0x30],
        fifo: Deque<u8, 10>,
        writes: Vec<(u8, u8), 64>,
        present: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                regs: [0; 0x30],
                fifo: Deque::new(),
                writes: Vec::new(),
                present: true,
            }
        }

        fn key(&mut self, code: u8, pressed: bool) {
            let byte = code | if pressed { 0x80 } else { 0 };
            self.fifo.push_back(byte).unwrap();
            self.regs[reg::INT_STAT as usize] |= int_stat::K_INT;
        }

        fn written(&self, reg: u8) -> Option<u8> {
            self.writes.iter().rev().find(|(r, _)| *r == reg).map(|&(_, v)| v)
        }
    }

    #[derive(Debug, PartialEq)]
    struct Nack;

    impl I2cBus for MockBus {
        type Error = Nack;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
            if !self.present || address != DEFAULT_ADDRESS {
                return Err(Nack);
            }
            let (reg, value) = (data[0], data[1]);
            self.writes.push((reg, value)).unwrap();
            if reg == reg::INT_STAT {
                self.regs[reg as usize] &= !value;
                if !self.fifo.is_empty() {
                    self.regs[reg as usize] |= int_stat::K_INT;
                }
            } else {
                self.regs[reg as usize] = value;
            }
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), Nack> {
            unimplemented!()
        }

        fn write_read(&mut self, address: u8, write: &[u8], buf: &mut [u8]) -> Result<(), Nack> {
            if !self.present || address != DEFAULT_ADDRESS {
                return Err(Nack);
            }
            buf[0] = match write[0] {
                reg::KEY_EVENT_A => self.fifo.pop_front().unwrap_or(0),
                reg::KEY_LCK_EC => self.fifo.len() as u8,
                reg => self.regs[reg as usize],
            };
            Ok(())
        }
    }

    #[test]
    fn test_default_config() {
        let config = Tca8418Config::default();
        assert_eq!(config.address, 0x34);
        assert!(config.validate());
        assert_eq!(config.keypad_masks(), [0x7F, 0xFF, 0x00]);
    }

    #[test]
    fn test_keypad_masks_wide_matrix() {
        let config = Tca8418Config {
            rows: 8,
            columns: 10,
            ..Default::default()
        };
        assert_eq!(config.keypad_masks(), [0xFF, 0xFF, 0x03]);

        let small = Tca8418Config {
            rows: 3,
            columns: 4,
            ..Default::default()
        };
        assert_eq!(small.keypad_masks(), [0x07, 0x0F, 0x00]);
    }

    #[test]
    fn test_invalid_matrix_rejected() {
        for (rows, columns) in [(0, 8), (9, 8), (7, 0), (7, 11)] {
            let config = Tca8418Config {
                rows,
                columns,
                ..Default::default()
            };
            assert!(!config.validate());
            assert!(matches!(
                Tca8418::probe(MockBus::new(), config),
                Err(Tca8418Error::InvalidMatrix)
            ));
        }
    }

    #[test]
    fn test_probe_absent_controller() {
        let mut bus = MockBus::new();
        bus.present = false;
        assert!(matches!(
            Tca8418::probe(bus, Tca8418Config::default()),
            Err(Tca8418Error::Bus(Nack))
        ));
    }

    #[test]
    fn test_probe_brings_up_controller() {
        let mut bus = MockBus::new();
        bus.key(12, true); // stale entry from before reset
        bus.regs[reg::CFG as usize] = 0x80;

        let dev = Tca8418::probe(bus, Tca8418Config::default()).unwrap();
        let bus = dev.release();

        for bank in 0..3 {
            assert_eq!(bus.written(reg::GPIO_DIR1 + bank), Some(0x00));
            assert_eq!(bus.written(reg::GPI_EM1 + bank), Some(0xFF));
            assert_eq!(bus.written(reg::GPIO_INT_LVL1 + bank), Some(0x00));
            assert_eq!(bus.written(reg::GPIO_INT_EN1 + bank), Some(0xFF));
        }
        assert_eq!(bus.written(reg::KP_GPIO1), Some(0x7F));
        assert_eq!(bus.written(reg::KP_GPIO2), Some(0xFF));
        assert_eq!(bus.written(reg::KP_GPIO3), Some(0x00));
        assert_eq!(bus.written(reg::INT_STAT), Some(0x03));
        assert_eq!(bus.written(reg::CFG), Some(0x80 | cfg::GPI_IEN | cfg::KE_IEN));
        assert!(bus.fifo.is_empty());
        assert_eq!(bus.regs[reg::INT_STAT as usize] & int_stat::K_INT, 0);
    }

    #[test]
    fn test_flush_counts_entries() {
        let mut bus = MockBus::new();
        bus.key(11, true);
        bus.key(11, false);
        let mut dev = Tca8418::new(bus, Tca8418Config::default());
        assert_eq!(dev.flush(), Ok(2));
        assert_eq!(dev.flush(), Ok(0));
    }

    #[test]
    fn test_event_source() {
        let mut dev = Tca8418::new(MockBus::new(), Tca8418Config::default());
        assert_eq!(dev.acknowledge_interrupt(), Ok(false));
        assert_eq!(dev.queued(), Ok(0));
        assert_eq!(dev.dequeue(), Ok(None));

        let mut bus = dev.release();
        bus.key(67, true);
        bus.key(67, false);
        let mut dev = Tca8418::new(bus, Tca8418Config::default());

        // Still asserted: two events remain after the acknowledge
        assert_eq!(dev.acknowledge_interrupt(), Ok(true));
        assert_eq!(dev.queued(), Ok(2));
        assert_eq!(
            dev.dequeue(),
            Ok(Some(RawKeyEvent { code: 67, pressed: true }))
        );
        assert_eq!(
            dev.dequeue(),
            Ok(Some(RawKeyEvent { code: 67, pressed: false }))
        );
        assert_eq!(dev.acknowledge_interrupt(), Ok(false));
    }

    #[test]
    fn test_drives_interrupt_backend() {
        use tactile_core::backend::{InterruptSource, KeyInterrupt};

        let mut bus = MockBus::new();
        bus.key(54, true);
        let irq = KeyInterrupt::new();
        let mut source = InterruptSource::new(Tca8418::new(bus, Tca8418Config::default()), &irq);

        irq.notify();
        let event = source.next_event().unwrap().unwrap();
        assert_eq!(event, RawKeyEvent { code: 54, pressed: true });
        assert_eq!(
            tactile_core::keymap::decode(event.code),
            tactile_core::KeyPos::new(3, 10)
        );
    }
}

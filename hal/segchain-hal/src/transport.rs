//! Chip-select framed bus access
//!
//! A MAX7219 chain latches whatever sits in its shift registers when the
//! chip-select line rises, so every burst of commands has to be framed by
//! one low pulse of that line. [`Transport::transaction`] is the only way
//! the driver opens such a frame: it always closes it again, including when
//! the work inside the frame fails.

use crate::gpio::OutputPin;
use crate::spi::{SpiBus, SpiConfig};

/// Exclusive, chip-select framed serial bus
pub trait Transport {
    /// Error type for bus operations
    type Error;

    /// Configure the bus and assert chip-select
    fn begin(&mut self, config: &SpiConfig) -> Result<(), Self::Error>;

    /// Shift bytes out while the frame is open
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Drain the bus and deassert chip-select
    ///
    /// Must release chip-select even when draining fails.
    fn end(&mut self) -> Result<(), Self::Error>;

    /// Run `f` inside one chip-select frame
    ///
    /// The frame is closed on every exit path. If both `f` and closing the
    /// frame fail, the error from `f` wins.
    fn transaction<R, E, F>(&mut self, config: &SpiConfig, f: F) -> Result<R, E>
    where
        Self: Sized,
        E: From<Self::Error>,
        F: FnOnce(&mut Self) -> Result<R, E>,
    {
        self.begin(config)?;
        let result = f(self);
        let closed = self.end();
        let value = result?;
        closed?;
        Ok(value)
    }
}

/// [`Transport`] built from a HAL SPI bus and an active-low chip-select pin
pub struct SpiTransport<B, P> {
    bus: B,
    cs: P,
}

impl<B: SpiBus, P: OutputPin> SpiTransport<B, P> {
    /// Create a new transport
    ///
    /// Chip-select is driven high (idle) immediately.
    pub fn new(bus: B, mut cs: P) -> Self {
        cs.set_high();
        Self { bus, cs }
    }

    /// Release the bus and pin
    pub fn release(self) -> (B, P) {
        (self.bus, self.cs)
    }
}

impl<B: SpiBus, P: OutputPin> Transport for SpiTransport<B, P> {
    type Error = B::Error;

    fn begin(&mut self, config: &SpiConfig) -> Result<(), Self::Error> {
        self.bus.configure(config)?;
        self.cs.set_low();
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data)
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        let flushed = self.bus.flush();
        self.cs.set_high();
        flushed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    #[derive(Debug, PartialEq, Eq)]
    struct BusFault;

    struct MockBus {
        written: Vec<u8, 32>,
        config: Option<SpiConfig>,
        fail_writes: bool,
    }

    impl MockBus {
        fn new() -> Self {
            Self {
                written: Vec::new(),
                config: None,
                fail_writes: false,
            }
        }
    }

    impl SpiBus for MockBus {
        type Error = BusFault;

        fn configure(&mut self, config: &SpiConfig) -> Result<(), BusFault> {
            self.config = Some(*config);
            Ok(())
        }

        fn write(&mut self, data: &[u8]) -> Result<(), BusFault> {
            if self.fail_writes {
                return Err(BusFault);
            }
            self.written.extend_from_slice(data).map_err(|_| BusFault)
        }

        fn flush(&mut self) -> Result<(), BusFault> {
            Ok(())
        }
    }

    struct MockPin {
        high: bool,
        low_pulses: u8,
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.low_pulses += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn transport() -> SpiTransport<MockBus, MockPin> {
        SpiTransport::new(
            MockBus::new(),
            MockPin {
                high: false,
                low_pulses: 0,
            },
        )
    }

    #[test]
    fn test_new_idles_chip_select_high() {
        let t = transport();
        assert!(t.cs.is_set_high());
    }

    #[test]
    fn test_transaction_frames_writes() {
        let mut t = transport();

        let result: Result<(), BusFault> = t.transaction(&SpiConfig::MAX7219, |t| {
            assert!(t.cs.is_set_low());
            t.write(&[0x0A, 0x03])?;
            t.write(&[0x0A, 0x03])
        });

        assert_eq!(result, Ok(()));
        assert!(t.cs.is_set_high());
        assert_eq!(t.cs.low_pulses, 1);
        assert_eq!(t.bus.written.as_slice(), &[0x0A, 0x03, 0x0A, 0x03]);
        assert_eq!(t.bus.config, Some(SpiConfig::MAX7219));
    }

    #[test]
    fn test_transaction_releases_on_error() {
        let mut t = transport();
        t.bus.fail_writes = true;

        let result: Result<(), BusFault> =
            t.transaction(&SpiConfig::MAX7219, |t| t.write(&[0x01, 0xFF]));

        assert_eq!(result, Err(BusFault));
        assert!(t.cs.is_set_high());
    }

    #[test]
    fn test_transaction_returns_value() {
        let mut t = transport();

        let result: Result<usize, BusFault> = t.transaction(&SpiConfig::default(), |t| {
            t.write(&[0x0C, 0x01])?;
            Ok(2)
        });

        assert_eq!(result, Ok(2));
    }
}

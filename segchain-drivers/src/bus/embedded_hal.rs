//! embedded-hal 1.0 transports
//!
//! Two ways to put a chain on an embedded-hal bus:
//!
//! - [`EmbeddedHalTransport`]: exclusive `SpiBus` plus a chip-select pin
//!   driven by this crate. Bytes are streamed as they are written.
//! - [`SpiDeviceTransport`]: a shared-bus `SpiDevice`, which asserts
//!   chip-select itself. Each frame is buffered and sent as one device
//!   transaction when it closes.
//!
//! embedded-hal buses are clocked when they are constructed, so the
//! [`SpiConfig`] passed to `begin` is not reapplied. Build the bus with the
//! chain's settings (MAX7219: mode 0, at most 10 MHz).

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{SpiBus, SpiDevice};
use heapless::Vec;
use segchain_core::config::MAX_MODULES;
use segchain_hal::spi::SpiConfig;
use segchain_hal::transport::Transport;

/// Bytes in the largest frame: one command per module
pub const MAX_FRAME_LEN: usize = MAX_MODULES * 2;

/// Errors from [`EmbeddedHalTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError<S, P> {
    /// SPI bus error
    Spi(S),
    /// Chip-select pin error
    Pin(P),
}

/// Chain on an exclusive SPI bus with a GPIO chip-select
pub struct EmbeddedHalTransport<SPI, CS> {
    spi: SPI,
    cs: CS,
}

impl<SPI, CS> EmbeddedHalTransport<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a transport, driving chip-select high (idle)
    pub fn new(spi: SPI, mut cs: CS) -> Result<Self, CS::Error> {
        cs.set_high()?;
        Ok(Self { spi, cs })
    }

    /// Release the bus and pin
    pub fn release(self) -> (SPI, CS) {
        (self.spi, self.cs)
    }
}

impl<SPI, CS> Transport for EmbeddedHalTransport<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    type Error = BusError<SPI::Error, CS::Error>;

    fn begin(&mut self, _config: &SpiConfig) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(BusError::Pin)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.spi.write(data).map_err(BusError::Spi)
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        let flushed = self.spi.flush().map_err(BusError::Spi);
        let released = self.cs.set_high().map_err(BusError::Pin);
        flushed.and(released)
    }
}

/// Errors from [`SpiDeviceTransport`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError<E> {
    /// SPI device error
    Spi(E),
    /// Frame longer than [`MAX_FRAME_LEN`]
    FrameTooLong,
}

/// Chain behind an embedded-hal `SpiDevice`
pub struct SpiDeviceTransport<D> {
    device: D,
    frame: Vec<u8, MAX_FRAME_LEN>,
    overflowed: bool,
}

impl<D: SpiDevice> SpiDeviceTransport<D> {
    /// Wrap a device
    pub fn new(device: D) -> Self {
        Self {
            device,
            frame: Vec::new(),
            overflowed: false,
        }
    }

    /// Release the device
    pub fn release(self) -> D {
        self.device
    }
}

impl<D: SpiDevice> Transport for SpiDeviceTransport<D> {
    type Error = DeviceError<D::Error>;

    fn begin(&mut self, _config: &SpiConfig) -> Result<(), Self::Error> {
        self.frame.clear();
        self.overflowed = false;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.frame.extend_from_slice(data).map_err(|_| {
            self.overflowed = true;
            DeviceError::FrameTooLong
        })
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        // A truncated frame would latch garbage into the chain
        if self.overflowed {
            self.frame.clear();
            return Err(DeviceError::FrameTooLong);
        }
        let result = self.device.write(&self.frame).map_err(DeviceError::Spi);
        self.frame.clear();
        result
    }
}

//! SPI bus abstractions
//!
//! Provides a write-only SPI master trait and the bus settings a
//! transaction is opened with.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// SPI bus master
///
/// The display chain never reads back, so only the transmit half of a
/// full-duplex bus is required.
pub trait SpiBus {
    /// Error type for SPI operations
    type Error;

    /// Apply clock rate, mode and bit order before a transaction
    ///
    /// Buses that are configured once at construction may treat this as a
    /// no-op.
    fn configure(&mut self, config: &SpiConfig) -> Result<(), Self::Error>;

    /// Write data without reading
    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Block until every queued byte has left the shift register
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// SPI configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpiConfig {
    /// Clock frequency in Hz
    pub frequency: u32,
    /// Clock polarity and phase
    pub mode: Mode,
    /// Order in which the bits of each byte are shifted out
    pub bit_order: BitOrder,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self {
            frequency: 1_000_000, // 1 MHz
            mode: Mode::Mode0,
            bit_order: BitOrder::MsbFirst,
        }
    }
}

impl SpiConfig {
    /// MAX7219 chain settings: 6 MHz, mode 0, MSB first
    ///
    /// The chip accepts up to 10 MHz; 6 MHz leaves margin for long
    /// daisy-chain wiring.
    pub const MAX7219: Self = Self {
        frequency: 6_000_000,
        mode: Mode::Mode0,
        bit_order: BitOrder::MsbFirst,
    };

    /// Same settings with a different clock frequency
    pub const fn with_frequency(self, frequency: u32) -> Self {
        Self { frequency, ..self }
    }

    /// Clock polarity implied by the mode
    pub fn polarity(&self) -> Polarity {
        let (polarity, _): (Polarity, Phase) = self.mode.into();
        polarity
    }

    /// Clock phase implied by the mode
    pub fn phase(&self) -> Phase {
        let (_, phase): (Polarity, Phase) = self.mode.into();
        phase
    }
}

/// SPI clock polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Clock idles low (CPOL=0)
    IdleLow,
    /// Clock idles high (CPOL=1)
    IdleHigh,
}

/// SPI clock phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Data captured on first clock transition (CPHA=0)
    CaptureOnFirstTransition,
    /// Data captured on second clock transition (CPHA=1)
    CaptureOnSecondTransition,
}

/// SPI mode (combined polarity and phase)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Mode 0: CPOL=0, CPHA=0
    #[default]
    Mode0,
    /// Mode 1: CPOL=0, CPHA=1
    Mode1,
    /// Mode 2: CPOL=1, CPHA=0
    Mode2,
    /// Mode 3: CPOL=1, CPHA=1
    Mode3,
}

impl From<Mode> for (Polarity, Phase) {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Mode0 => (Polarity::IdleLow, Phase::CaptureOnFirstTransition),
            Mode::Mode1 => (Polarity::IdleLow, Phase::CaptureOnSecondTransition),
            Mode::Mode2 => (Polarity::IdleHigh, Phase::CaptureOnFirstTransition),
            Mode::Mode3 => (Polarity::IdleHigh, Phase::CaptureOnSecondTransition),
        }
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BitOrder {
    /// Most significant bit first
    #[default]
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

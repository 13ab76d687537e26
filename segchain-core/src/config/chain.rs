//! Chain configuration
//!
//! Describes one daisy chain of display modules: how many there are, how
//! they are arranged, which pin frames their bus transactions, and how the
//! bus is clocked.

use segchain_hal::spi::{BitOrder, SpiConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::protocol::order::ChainLayout;

/// Digit registers per module
pub const DIGITS_PER_MODULE: usize = 8;

/// Maximum modules in one chain
pub const MAX_MODULES: usize = 64;

/// Maximum framebuffer size in bytes
pub const MAX_BUFFER_LEN: usize = MAX_MODULES * DIGITS_PER_MODULE;

/// Logical digit columns one module contributes to the digit grid
pub const DIGIT_COLS_PER_MODULE: usize = 4;

/// Logical digit rows one module contributes to the digit grid
pub const DIGIT_ROWS_PER_MODULE: usize = 2;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Zero columns or zero rows
    EmptyChain,
    /// More than [`MAX_MODULES`] modules
    TooManyModules,
    /// Serpentine layout with a group size of zero
    InvalidGroupSize,
    /// The chips only accept MSB-first data
    UnsupportedBitOrder,
    /// Chain order is not a permutation of the module slots
    InvalidOrder,
    /// Persisted configuration could not be encoded or decoded
    Serialization,
}

/// Chain configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainConfig {
    /// GPIO pin number of the chip-select (LOAD) line
    pub chip_select: u8,
    /// Modules per row of the chain
    pub columns: u8,
    /// Rows of modules
    pub rows: u8,
    /// Bus settings applied to every transaction
    pub spi: SpiConfig,
    /// Physical wiring order of the modules
    pub layout: ChainLayout,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::new(17, 1, 1)
    }
}

impl ChainConfig {
    /// Create a config with MAX7219 bus settings and the reference layout
    pub const fn new(chip_select: u8, columns: u8, rows: u8) -> Self {
        Self {
            chip_select,
            columns,
            rows,
            spi: SpiConfig::MAX7219,
            layout: ChainLayout::REFERENCE,
        }
    }

    /// Replace the wiring layout
    pub const fn with_layout(self, layout: ChainLayout) -> Self {
        Self { layout, ..self }
    }

    /// Replace the bus settings
    pub const fn with_spi(self, spi: SpiConfig) -> Self {
        Self { spi, ..self }
    }

    /// Total number of modules in the chain
    pub const fn module_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Framebuffer length in bytes
    pub const fn buffer_len(&self) -> usize {
        self.module_count() * DIGITS_PER_MODULE
    }

    /// Width of the digit grid
    pub const fn digit_columns(&self) -> usize {
        self.columns as usize * DIGIT_COLS_PER_MODULE
    }

    /// Height of the digit grid
    pub const fn digit_rows(&self) -> usize {
        self.rows as usize * DIGIT_ROWS_PER_MODULE
    }

    /// Check the configuration can drive a real chain
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimensions(self.columns, self.rows)?;

        if let ChainLayout::Serpentine { group_size: 0 } = self.layout {
            return Err(ConfigError::InvalidGroupSize);
        }

        if self.spi.bit_order != BitOrder::MsbFirst {
            return Err(ConfigError::UnsupportedBitOrder);
        }

        Ok(())
    }

    /// Encode as postcard into `buf`, returning the used part
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Serialization)
    }

    /// Decode from postcard and validate
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Serialization)?;
        config.validate()?;
        Ok(config)
    }
}

/// Check chain dimensions against [`MAX_MODULES`]
pub(crate) fn check_dimensions(columns: u8, rows: u8) -> Result<(), ConfigError> {
    if columns == 0 || rows == 0 {
        return Err(ConfigError::EmptyChain);
    }
    if columns as usize * rows as usize > MAX_MODULES {
        return Err(ConfigError::TooManyModules);
    }
    Ok(())
}

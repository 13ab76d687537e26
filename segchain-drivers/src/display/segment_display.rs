//! Seven-segment chain as a pixel display
//!
//! `SegmentDisplay` owns the framebuffer, the command channel and the frame
//! serializer for one chain. Drawing only touches the framebuffer; nothing
//! reaches the chips until `update()`.
//!
//! # Usage
//!
//! ```ignore
//! let config = ChainConfig::new(17, 5, 4);
//! let mut display = SegmentDisplay::new(transport, config)?;
//! display.init()?;
//!
//! display.clear();
//! display.set_dot(10, 4, true);
//! display.update()?;
//! ```

use segchain_core::buffer::{AddressError, PixelBuffer, SegmentGeometry, SegmentMapper};
use segchain_core::config::{ChainConfig, ConfigError};
use segchain_core::protocol::{is_permutation, ChainLayout, ChainOrder, Register};
use segchain_core::traits::PixelSurface;
use segchain_hal::transport::Transport;

use super::channel::{ChannelState, CommandChannel};
use super::serializer::FrameSerializer;
use super::Error;

/// Driver for one chain of seven-segment modules
pub struct SegmentDisplay<T, O = ChainLayout> {
    config: ChainConfig,
    buffer: PixelBuffer,
    mapper: SegmentMapper,
    channel: CommandChannel<T>,
    serializer: FrameSerializer<O>,
}

impl<T: Transport> SegmentDisplay<T, ChainLayout> {
    /// Create a driver using the layout from `config`
    pub fn new(transport: T, config: ChainConfig) -> Result<Self, ConfigError> {
        Self::with_order(transport, config, config.layout)
    }
}

impl<T: Transport, O: ChainOrder> SegmentDisplay<T, O> {
    /// Create a driver with a custom wiring order
    ///
    /// `config.layout` is ignored in favour of `order`, which must be a
    /// permutation of the chain's modules.
    pub fn with_order(transport: T, config: ChainConfig, order: O) -> Result<Self, ConfigError> {
        config.validate()?;
        if !is_permutation(&order, config.module_count()) {
            return Err(ConfigError::InvalidOrder);
        }

        let buffer = PixelBuffer::from_config(&config)?;
        let channel = CommandChannel::new(transport, config.spi, config.module_count());

        Ok(Self {
            config,
            buffer,
            mapper: SegmentMapper::default(),
            channel,
            serializer: FrameSerializer::new(order),
        })
    }

    /// Use a different digit shape for dot mapping
    pub fn with_geometry(mut self, geometry: SegmentGeometry) -> Self {
        self.mapper = SegmentMapper::new(geometry);
        self
    }

    /// The configuration the driver was built from
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Channel lifecycle state
    pub fn state(&self) -> ChannelState {
        self.channel.state()
    }

    /// Check if `init()` has completed
    pub fn is_ready(&self) -> bool {
        self.channel.is_ready()
    }

    /// Read-only framebuffer
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Mutable framebuffer
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    /// Command channel, for registers the driver has no shortcut for
    pub fn channel_mut(&mut self) -> &mut CommandChannel<T> {
        &mut self.channel
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.channel.release()
    }

    /// Configure every chip; see [`CommandChannel::init`]
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        self.channel.init()
    }

    /// Set the brightness of every chip (0-15)
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Error<T::Error>> {
        self.channel.set_brightness(level)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("brightness {}", level);

        Ok(())
    }

    /// Power every chip up or down
    pub fn set_power(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.channel.set_power(on)
    }

    /// Send one digit command in a frame of its own; see
    /// [`CommandChannel::send_byte`]
    pub fn send_byte(&mut self, digit: u8, value: u8) -> Result<(), Error<T::Error>> {
        self.channel.send_byte(digit, value)
    }

    /// Write one register of a single module, by buffer module index
    pub fn send_to_module(
        &mut self,
        module: usize,
        register: Register,
        value: u8,
    ) -> Result<(), Error<T::Error>> {
        let modules = self.config.module_count();
        let order = self.serializer.order();
        let slot = (0..modules)
            .find(|&slot| order.display_index(slot, modules) == module)
            .ok_or(Error::InvalidModule(module))?;
        self.channel.send_to_slot(slot, register, value)
    }

    /// Push the framebuffer to the chips
    pub fn update(&mut self) -> Result<(), Error<T::Error>> {
        self.serializer.update(&mut self.channel, &self.buffer)
    }

    /// Blank every digit (framebuffer only)
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Set every digit to `value` (framebuffer only)
    pub fn fill(&mut self, value: u8) {
        self.buffer.fill(value);
    }

    /// Light or blank the segment under a dot
    pub fn set_dot(&mut self, x: i32, y: i32, fill: bool) {
        self.mapper.set_dot(&mut self.buffer, x, y, fill);
    }

    /// Whether the segment under a dot is lit
    pub fn get_dot(&self, x: i32, y: i32) -> bool {
        self.mapper.get_dot(&self.buffer, x, y)
    }

    /// Overwrite a digit byte
    pub fn set_byte(&mut self, col: usize, row: usize, value: u8) -> Result<(), AddressError> {
        self.buffer.set_byte(col, row, value)
    }

    /// Mutable reference to a digit byte
    pub fn get_byte(&mut self, col: usize, row: usize) -> Result<&mut u8, AddressError> {
        self.buffer.get_byte(col, row)
    }

    /// Dot-matrix size as (width, height)
    pub fn extent(&self) -> (u16, u16) {
        let (width, height) = self.mapper.extent(&self.buffer);
        (width as u16, height as u16)
    }

    /// OR of every segment the digit shape can light
    pub(crate) fn segment_mask(&self) -> u8 {
        self.mapper
            .geometry()
            .cells()
            .iter()
            .fold(0, |mask, cell| mask | cell.segment.mask())
    }
}

impl<T: Transport, O: ChainOrder> PixelSurface for SegmentDisplay<T, O> {
    fn extent(&self) -> (u16, u16) {
        SegmentDisplay::extent(self)
    }

    fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        self.set_dot(x, y, on);
    }

    fn get_pixel(&self, x: i32, y: i32) -> bool {
        self.get_dot(x, y)
    }
}

//! Command channel
//!
//! Every transmission to the chain is one chip-select frame holding some
//! number of 2-byte commands. A frame with one command per module reaches
//! every chip; a frame with fewer commands leaves the rest of the chain
//! holding whatever was shifted through it, so single-chip writes pad the
//! frame with no-ops.
//!
//! # Usage
//!
//! ```ignore
//! let mut channel = CommandChannel::new(transport, SpiConfig::MAX7219, 20);
//! channel.init()?;
//! channel.set_brightness(8)?;
//! ```

use segchain_core::protocol::{Command, DecodeMode, Register, INIT_SEQUENCE, MAX_INTENSITY};
use segchain_hal::spi::SpiConfig;
use segchain_hal::transport::Transport;

use super::Error;

/// Channel lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelState {
    /// Chips not yet configured
    Uninitialized,
    /// `init()` completed
    Ready,
}

/// Issues commands to a chain of modules over one transport
pub struct CommandChannel<T> {
    transport: T,
    spi: SpiConfig,
    modules: usize,
    state: ChannelState,
}

/// Command sink handed out inside an open frame
pub struct CommandWriter<'a, T> {
    transport: &'a mut T,
}

impl<T: Transport> CommandWriter<'_, T> {
    /// Shift one command into the chain
    pub fn send(&mut self, command: Command) -> Result<(), Error<T::Error>> {
        self.transport.write(&command.to_bytes())?;
        Ok(())
    }
}

impl<T: Transport> CommandChannel<T> {
    /// Create a channel for `modules` chips
    pub fn new(transport: T, spi: SpiConfig, modules: usize) -> Self {
        Self {
            transport,
            spi,
            modules,
            state: ChannelState::Uninitialized,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ChannelState {
        self.state
    }

    /// Check if `init()` has completed
    pub fn is_ready(&self) -> bool {
        self.state == ChannelState::Ready
    }

    /// Number of chips in the chain
    pub fn modules(&self) -> usize {
        self.modules
    }

    /// Bus settings used for every frame
    pub fn spi_config(&self) -> &SpiConfig {
        &self.spi
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }

    /// Configure every chip for raw segment output
    ///
    /// Sends, each as its own broadcast: test mode off, decode off,
    /// minimum brightness, all eight digits scanned, power on. May be
    /// repeated; the channel only becomes ready once all five succeed.
    pub fn init(&mut self) -> Result<(), Error<T::Error>> {
        for command in INIT_SEQUENCE {
            self.broadcast_command(command)?;
        }
        self.state = ChannelState::Ready;

        #[cfg(feature = "defmt")]
        defmt::debug!("chain of {} modules initialized", self.modules);

        Ok(())
    }

    /// Set the brightness of every chip (0-15)
    pub fn set_brightness(&mut self, level: u8) -> Result<(), Error<T::Error>> {
        if level > MAX_INTENSITY {
            return Err(Error::InvalidBrightness(level));
        }
        self.broadcast(Register::Intensity, level)
    }

    /// Power every chip up or down; digit data is kept while shut down
    pub fn set_power(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.broadcast(Register::Shutdown, u8::from(on))
    }

    /// Light every segment of every chip, overriding digit data
    pub fn set_test_mode(&mut self, on: bool) -> Result<(), Error<T::Error>> {
        self.broadcast(Register::DisplayTest, u8::from(on))
    }

    /// Scan only the first `digits` digit registers (1-8)
    pub fn set_scan_limit(&mut self, digits: u8) -> Result<(), Error<T::Error>> {
        if !(1..=8).contains(&digits) {
            return Err(Error::InvalidScanLimit(digits));
        }
        self.broadcast(Register::ScanLimit, digits - 1)
    }

    /// Select BCD decoding per digit
    pub fn set_decode_mode(&mut self, mode: DecodeMode) -> Result<(), Error<T::Error>> {
        self.broadcast(Register::DecodeMode, mode as u8)
    }

    /// Send the same command to every chip in one frame
    pub fn broadcast(&mut self, register: Register, value: u8) -> Result<(), Error<T::Error>> {
        self.ensure_ready()?;
        self.broadcast_command(Command::new(register, value))
    }

    /// Send one command to digit register `digit + 1` in a frame of its own
    ///
    /// The frame carries a single command, so only the first chip on the
    /// wire latches it; the rest of the chain latches whatever it held in
    /// its shift registers.
    pub fn send_byte(&mut self, digit: u8, value: u8) -> Result<(), Error<T::Error>> {
        self.ensure_ready()?;
        let command = Command::raw(digit.wrapping_add(1), value);
        self.frame(|writer| writer.send(command))
    }

    /// Send a command to the chip in one transmission slot
    ///
    /// Slot 0 is the first command shifted out, which travels farthest down
    /// the chain. Every other slot carries a no-op.
    pub fn send_to_slot(
        &mut self,
        slot: usize,
        register: Register,
        value: u8,
    ) -> Result<(), Error<T::Error>> {
        if slot >= self.modules {
            return Err(Error::InvalidModule(slot));
        }
        self.ensure_ready()?;

        let modules = self.modules;
        let command = Command::new(register, value);
        self.frame(|writer| {
            for i in 0..modules {
                writer.send(if i == slot { command } else { Command::NOOP })?;
            }
            Ok(())
        })
    }

    /// Open one chip-select frame and write commands into it
    ///
    /// The frame is closed on every exit path.
    pub fn frame<R, F>(&mut self, f: F) -> Result<R, Error<T::Error>>
    where
        F: FnOnce(&mut CommandWriter<'_, T>) -> Result<R, Error<T::Error>>,
    {
        let spi = self.spi;
        self.transport.transaction(&spi, |transport| {
            let mut writer = CommandWriter { transport };
            f(&mut writer)
        })
    }

    /// Fail with [`Error::NotInitialized`] before `init()`
    pub fn ensure_ready(&self) -> Result<(), Error<T::Error>> {
        match self.state {
            ChannelState::Ready => Ok(()),
            ChannelState::Uninitialized => Err(Error::NotInitialized),
        }
    }

    fn broadcast_command(&mut self, command: Command) -> Result<(), Error<T::Error>> {
        let modules = self.modules;
        self.frame(|writer| {
            for _ in 0..modules {
                writer.send(command)?;
            }
            Ok(())
        })
    }
}

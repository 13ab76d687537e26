//! Recording transport for host-side tests
//!
//! [`MockTransport`] keeps every chip-select frame it sees, with the bus
//! settings it was opened with and the bytes written inside it.

use heapless::Vec;

use crate::spi::SpiConfig;
use crate::transport::Transport;

/// Maximum bytes recorded per frame (64 modules x 2 bytes, with headroom)
pub const MAX_FRAME_BYTES: usize = 256;

/// Maximum frames recorded
pub const MAX_FRAMES: usize = 32;

/// Mock transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MockError {
    /// Failure injected with [`MockTransport::fail_after`]
    Injected,
    /// Recording capacity exceeded
    Overflow,
    /// Write or end without an open frame
    NotSelected,
}

/// One recorded chip-select frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Bus settings the frame was opened with
    pub config: SpiConfig,
    /// Bytes shifted out while chip-select was low
    pub bytes: Vec<u8, MAX_FRAME_BYTES>,
}

impl Frame {
    /// The frame split into (register, value) commands
    pub fn commands(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.bytes.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of 2-byte commands in the frame
    pub fn command_count(&self) -> usize {
        self.bytes.len() / 2
    }
}

/// Transport that records instead of driving hardware
#[derive(Debug, Default)]
pub struct MockTransport {
    frames: Vec<Frame, MAX_FRAMES>,
    selected: bool,
    writes: usize,
    fail_after: Option<usize>,
}

impl MockTransport {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write after the first `writes` successful ones fail
    pub fn fail_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Frames recorded so far
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Whether chip-select is currently asserted
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Forget all recorded frames
    pub fn reset(&mut self) {
        self.frames.clear();
        self.selected = false;
        self.writes = 0;
    }
}

impl Transport for MockTransport {
    type Error = MockError;

    fn begin(&mut self, config: &SpiConfig) -> Result<(), MockError> {
        self.frames
            .push(Frame {
                config: *config,
                bytes: Vec::new(),
            })
            .map_err(|_| MockError::Overflow)?;
        self.selected = true;
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), MockError> {
        if !self.selected {
            return Err(MockError::NotSelected);
        }
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(MockError::Injected);
        }
        self.writes += 1;

        let frame = self.frames.last_mut().ok_or(MockError::NotSelected)?;
        frame
            .bytes
            .extend_from_slice(data)
            .map_err(|_| MockError::Overflow)
    }

    fn end(&mut self) -> Result<(), MockError> {
        if !self.selected {
            return Err(MockError::NotSelected);
        }
        self.selected = false;
        Ok(())
    }
}

//! MAX7219 seven-segment chain driver

pub mod channel;
pub mod graphics;
pub mod segment_display;
pub mod serializer;

pub use channel::{ChannelState, CommandChannel, CommandWriter};
pub use segment_display::SegmentDisplay;
pub use serializer::FrameSerializer;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Transport failure; the bus has already been released
    Bus(E),
    /// Bus command issued before `init()`
    NotInitialized,
    /// Brightness above 15
    InvalidBrightness(u8),
    /// Scan limit outside 1-8 digits
    InvalidScanLimit(u8),
    /// Module or slot index past the end of the chain
    InvalidModule(usize),
    /// Buffer and channel disagree on the chain length
    ChainMismatch,
    /// Chain order is not a permutation of the modules
    InvalidOrder,
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

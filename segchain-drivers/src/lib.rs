//! Hardware driver implementations
//!
//! This crate drives a chain of cascaded MAX7219 seven-segment modules
//! through the traits in segchain-hal and the logic in segchain-core:
//!
//! - Command channel (init, brightness, broadcast and single-chip commands)
//! - Frame serializer (plane-by-plane refresh in chain wiring order)
//! - `SegmentDisplay`, the device combining both with a framebuffer
//! - embedded-graphics `DrawTarget` support
//! - Transport adapters for embedded-hal 1.0 buses and devices

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod bus;
pub mod display;

pub use bus::{EmbeddedHalTransport, SpiDeviceTransport};
pub use display::{CommandChannel, Error, FrameSerializer, SegmentDisplay};

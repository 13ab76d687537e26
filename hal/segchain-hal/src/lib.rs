//! Segchain Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the segchain driver talks to.
//! Chip-specific HALs (or the embedded-hal adapter in `segchain-drivers`)
//! implement them, so the display logic never touches a peripheral directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  segchain-drivers (CommandChannel, ...) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Transport (scoped, chip-select framed) │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │    SpiBus     │       │   OutputPin   │
//! │ (clock, MOSI) │       │ (chip select) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Chip-select line
//! - [`spi::SpiBus`] - Write-only SPI master
//! - [`transport::Transport`] - Exclusive, chip-select framed bus access

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod gpio;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod spi;
pub mod transport;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{BitOrder, Mode, SpiBus, SpiConfig};
pub use transport::{SpiTransport, Transport};

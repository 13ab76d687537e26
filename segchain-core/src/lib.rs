//! Board-agnostic core logic for cascaded 7-segment display chains
//!
//! This crate contains everything that does not touch a bus:
//!
//! - Chain configuration (geometry, bus settings, wiring layout)
//! - The chip register map and 2-byte command frames
//! - Framebuffer addressing (digit grid to buffer offset)
//! - Segment mapping (dot-matrix pixel to segment bit)
//! - Chain ordering policies and the per-plane transmission plan
//! - The pixel-surface trait a graphics engine draws through

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod protocol;
pub mod traits;

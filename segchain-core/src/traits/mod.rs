//! Capability traits
//!
//! These traits define the interface between the display driver and the
//! code that draws on it.

pub mod surface;

pub use surface::PixelSurface;

//! Configuration types
//!
//! Chain geometry and bus settings, optionally stored as postcard binary data.

pub mod chain;

pub use chain::*;

//! Transport adapters for embedded-hal buses

pub mod embedded_hal;

pub use self::embedded_hal::{
    BusError, DeviceError, EmbeddedHalTransport, SpiDeviceTransport, MAX_FRAME_LEN,
};

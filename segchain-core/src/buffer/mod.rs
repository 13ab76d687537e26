//! Framebuffer and dot mapping
//!
//! [`PixelBuffer`] owns the digit bytes and the digit-grid addressing;
//! [`SegmentMapper`] layers a dot-matrix view on top of it.

pub mod addressing;
pub mod segment;

pub use addressing::{AddressError, PixelBuffer};
pub use segment::{
    DotLocation, Segment, SegmentCell, SegmentGeometry, SegmentMapper, DOTS_PER_DIGIT_X,
    DOTS_PER_DIGIT_Y,
};

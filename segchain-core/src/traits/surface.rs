//! Pixel surface trait
//!
//! The narrow contract a graphics engine needs from a display: set a pixel,
//! read a pixel back, and know how large the surface is. Line, shape and
//! text drawing live on the engine's side and only go through this trait.

/// A monochrome, pixel-addressable drawing surface
pub trait PixelSurface {
    /// Surface size as (width, height) in pixels
    fn extent(&self) -> (u16, u16);

    /// Light or blank a pixel
    ///
    /// Pixels outside the surface, or that the hardware cannot show, are
    /// ignored.
    fn set_pixel(&mut self, x: i32, y: i32, on: bool);

    /// Whether a pixel is lit
    fn get_pixel(&self, x: i32, y: i32) -> bool;

    /// Check if a pixel lies on the surface
    fn contains(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.extent();
        x >= 0 && y >= 0 && x < i32::from(width) && y < i32::from(height)
    }
}

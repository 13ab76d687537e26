//! embedded-graphics support
//!
//! Lets embedded-graphics primitives, fonts and images render onto the dot
//! matrix. Dots that fall between segments are dropped, so thin diagonal
//! strokes come out sparse; text looks best with fonts sized to the 4x6
//! digit cell.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::Pixel;
use segchain_core::protocol::ChainOrder;
use segchain_hal::transport::Transport;

use super::segment_display::SegmentDisplay;

impl<T: Transport, O: ChainOrder> OriginDimensions for SegmentDisplay<T, O> {
    fn size(&self) -> Size {
        let (width, height) = self.extent();
        Size::new(u32::from(width), u32::from(height))
    }
}

impl<T: Transport, O: ChainOrder> DrawTarget for SegmentDisplay<T, O> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_dot(point.x, point.y, color.is_on());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let value = if color.is_on() {
            self.segment_mask()
        } else {
            0
        };
        self.fill(value);
        Ok(())
    }
}

//! Demo scene: a two-line marquee
//!
//! FONT_4X6 glyphs are exactly one digit cell, so each character lands on a
//! single seven-segment digit.

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

const TOP_LINE: &str = "SEGCHAIN";
const BOTTOM_LINE: &str = "MAX7219 WALL";

/// Glyph advance in dots
const GLYPH_WIDTH: i32 = 4;

/// Digit cell height in dots
const LINE_HEIGHT: i32 = 6;

/// Text scrolling right to left across the wall
pub struct Marquee {
    offset: i32,
}

impl Marquee {
    pub const fn new() -> Self {
        Self { offset: 0 }
    }

    /// Draw the current frame and advance by one dot
    pub fn draw<D>(&mut self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor> + OriginDimensions,
    {
        let width = target.size().width as i32;
        let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);

        target.clear(BinaryColor::Off)?;
        Text::with_baseline(
            TOP_LINE,
            Point::new(width - self.offset, 0),
            style,
            Baseline::Top,
        )
        .draw(target)?;
        // Bottom line moves one glyph per step to stay on digit boundaries
        let snapped = (self.offset / GLYPH_WIDTH) * GLYPH_WIDTH;
        Text::with_baseline(
            BOTTOM_LINE,
            Point::new(width - snapped, LINE_HEIGHT),
            style,
            Baseline::Top,
        )
        .draw(target)?;

        let longest = TOP_LINE.len().max(BOTTOM_LINE.len()) as i32 * GLYPH_WIDTH;
        self.offset += 1;
        if self.offset > width + longest {
            self.offset = 0;
        }
        Ok(())
    }
}

//! Dot-matrix emulation on seven-segment digits
//!
//! Each digit stands in for a 4x6 block of dots. Only seven of those 24
//! positions correspond to a segment, laid out like this (x across, y down):
//!
//! ```text
//!       x: 0 1 2 3
//!   y: 0   . A . .
//!      1   F . B .
//!      2   . G . .
//!      3   E . C .
//!      4   . D . .
//!      5   . . . .
//! ```
//!
//! Writing any other position is a no-op. A position is identified by the
//! code `x | (y << 2)`, which is unique within the block.

use crate::buffer::addressing::PixelBuffer;

/// Dot columns per digit
pub const DOTS_PER_DIGIT_X: usize = 4;

/// Dot rows per digit
pub const DOTS_PER_DIGIT_Y: usize = 6;

/// Segment of a digit, by its bit in a no-decode digit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Segment {
    G = 0,
    F = 1,
    E = 2,
    D = 3,
    C = 4,
    B = 5,
    A = 6,
    /// Decimal point; not placed by [`SegmentGeometry::STANDARD`]
    Dp = 7,
}

impl Segment {
    /// Bit position within the digit byte
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }
}

/// Position of one segment inside the 4x6 dot block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentCell {
    /// Dot column (0-3)
    pub x: u8,
    /// Dot row (0-5)
    pub y: u8,
    /// Segment lit by that dot
    pub segment: Segment,
}

impl SegmentCell {
    /// Create a cell
    pub const fn new(x: u8, y: u8, segment: Segment) -> Self {
        Self { x, y, segment }
    }

    /// Position code `x | (y << 2)`
    pub const fn code(&self) -> u8 {
        cell_code(self.x, self.y)
    }
}

/// Position code of a dot inside the block
pub const fn cell_code(x: u8, y: u8) -> u8 {
    x | (y << 2)
}

/// Which dot positions light which segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentGeometry {
    cells: [SegmentCell; 7],
}

impl SegmentGeometry {
    /// Standard digit shape
    pub const STANDARD: Self = Self::new([
        SegmentCell::new(1, 2, Segment::G), // 0x09
        SegmentCell::new(0, 1, Segment::F), // 0x04
        SegmentCell::new(0, 3, Segment::E), // 0x0C
        SegmentCell::new(1, 4, Segment::D), // 0x11
        SegmentCell::new(2, 3, Segment::C), // 0x0E
        SegmentCell::new(2, 1, Segment::B), // 0x06
        SegmentCell::new(1, 0, Segment::A), // 0x01
    ]);

    /// Geometry from an explicit table
    pub const fn new(cells: [SegmentCell; 7]) -> Self {
        Self { cells }
    }

    /// The table
    pub fn cells(&self) -> &[SegmentCell; 7] {
        &self.cells
    }

    /// Segment at a dot inside the block, if any
    ///
    /// Cells are matched by coordinates, so a cell placed outside the 4x6
    /// block never shadows one inside it.
    pub fn segment_at(&self, x: u8, y: u8) -> Option<Segment> {
        self.cells
            .iter()
            .find(|cell| cell.x == x && cell.y == y)
            .map(|cell| cell.segment)
    }
}

impl Default for SegmentGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A dot resolved to a digit and a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DotLocation {
    /// Digit column in the digit grid
    pub col: usize,
    /// Digit row in the digit grid
    pub row: usize,
    /// Segment within the digit
    pub segment: Segment,
}

/// Maps dot-matrix pixels onto segment bits of a [`PixelBuffer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentMapper {
    geometry: SegmentGeometry,
}

impl SegmentMapper {
    /// Mapper for a digit shape
    pub const fn new(geometry: SegmentGeometry) -> Self {
        Self { geometry }
    }

    /// The digit shape in use
    pub fn geometry(&self) -> &SegmentGeometry {
        &self.geometry
    }

    /// Dot-matrix size of a buffer as (width, height)
    pub fn extent(&self, buffer: &PixelBuffer) -> (usize, usize) {
        (
            buffer.digit_columns() * DOTS_PER_DIGIT_X,
            buffer.digit_rows() * DOTS_PER_DIGIT_Y,
        )
    }

    /// Resolve a dot to its digit and segment
    ///
    /// Returns `None` for dots outside the buffer and for positions no
    /// segment covers.
    pub fn locate(&self, buffer: &PixelBuffer, x: i32, y: i32) -> Option<DotLocation> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;

        let col = x / DOTS_PER_DIGIT_X;
        let row = y / DOTS_PER_DIGIT_Y;
        if col >= buffer.digit_columns() || row >= buffer.digit_rows() {
            return None;
        }

        let local_x = (x % DOTS_PER_DIGIT_X) as u8;
        let local_y = (y % DOTS_PER_DIGIT_Y) as u8;
        let segment = self.geometry.segment_at(local_x, local_y)?;

        Some(DotLocation { col, row, segment })
    }

    /// Light or blank the segment under a dot
    ///
    /// Dots that map to no segment, or fall outside the buffer, are ignored.
    pub fn set_dot(&self, buffer: &mut PixelBuffer, x: i32, y: i32, fill: bool) {
        if let Some(location) = self.locate(buffer, x, y) {
            let byte = buffer.get_byte_unchecked(location.col, location.row);
            if fill {
                *byte |= location.segment.mask();
            } else {
                *byte &= !location.segment.mask();
            }
        }
    }

    /// Whether the segment under a dot is lit
    ///
    /// Unmapped and out-of-range dots read as unlit.
    pub fn get_dot(&self, buffer: &PixelBuffer, x: i32, y: i32) -> bool {
        match self.locate(buffer, x, y) {
            Some(location) => buffer
                .byte(location.col, location.row)
                .is_ok_and(|byte| byte & location.segment.mask() != 0),
            None => false,
        }
    }
}

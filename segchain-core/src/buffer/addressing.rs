//! Framebuffer and digit-grid addressing
//!
//! The chain is presented as a grid of digits, four columns by two rows per
//! module. Each module keeps its eight digit bytes contiguously: the upper
//! logical row in bytes 0-3 and the lower one in bytes 4-7. Module rows are
//! laid out one after another, so for a digit at (`col`, `row`):
//!
//! ```text
//! offset = (row / 2) * columns * 8   // module row
//!        + (col / 4) * 8             // module within the row
//!        + (col % 4)                 // digit within the logical row
//!        + (row % 2) * 4             // upper or lower logical row
//! ```

use heapless::Vec;

use crate::config::{
    check_dimensions, ChainConfig, ConfigError, DIGITS_PER_MODULE, DIGIT_COLS_PER_MODULE,
    DIGIT_ROWS_PER_MODULE, MAX_BUFFER_LEN,
};

/// Addressing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressError {
    /// Digit coordinate outside the grid
    OutOfRange { col: usize, row: usize },
}

/// Framebuffer holding one byte per digit register of the chain
///
/// The length is fixed at construction to `columns * rows * 8` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: Vec<u8, MAX_BUFFER_LEN>,
    columns: u8,
    rows: u8,
}

impl PixelBuffer {
    /// Create a zeroed buffer for a `columns` x `rows` chain
    pub fn new(columns: u8, rows: u8) -> Result<Self, ConfigError> {
        check_dimensions(columns, rows)?;

        let len = columns as usize * rows as usize * DIGITS_PER_MODULE;
        let mut bytes = Vec::new();
        bytes
            .resize(len, 0)
            .map_err(|_| ConfigError::TooManyModules)?;

        Ok(Self {
            bytes,
            columns,
            rows,
        })
    }

    /// Create a zeroed buffer sized for `config`
    pub fn from_config(config: &ChainConfig) -> Result<Self, ConfigError> {
        Self::new(config.columns, config.rows)
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: a chain has at least one module
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Modules per row
    pub fn columns(&self) -> u8 {
        self.columns
    }

    /// Rows of modules
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Total number of modules
    pub fn module_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Width of the digit grid
    pub fn digit_columns(&self) -> usize {
        self.columns as usize * DIGIT_COLS_PER_MODULE
    }

    /// Height of the digit grid
    pub fn digit_rows(&self) -> usize {
        self.rows as usize * DIGIT_ROWS_PER_MODULE
    }

    /// Buffer offset of a digit, or `None` outside the grid
    pub fn offset(&self, col: usize, row: usize) -> Option<usize> {
        if col >= self.digit_columns() || row >= self.digit_rows() {
            return None;
        }
        Some(raw_offset(self.columns as usize, col, row))
    }

    /// Mutable reference to a digit byte
    pub fn get_byte(&mut self, col: usize, row: usize) -> Result<&mut u8, AddressError> {
        let offset = self
            .offset(col, row)
            .ok_or(AddressError::OutOfRange { col, row })?;
        Ok(&mut self.bytes[offset])
    }

    /// Read a digit byte
    pub fn byte(&self, col: usize, row: usize) -> Result<u8, AddressError> {
        let offset = self
            .offset(col, row)
            .ok_or(AddressError::OutOfRange { col, row })?;
        Ok(self.bytes[offset])
    }

    /// Overwrite a digit byte
    pub fn set_byte(&mut self, col: usize, row: usize, value: u8) -> Result<(), AddressError> {
        *self.get_byte(col, row)? = value;
        Ok(())
    }

    /// Mutable reference to a digit byte without the range check
    ///
    /// The caller must keep `col < digit_columns()` and `row < digit_rows()`.
    /// Debug builds assert this; release builds may hand back a byte of a
    /// different digit or panic if the offset falls past the buffer.
    pub fn get_byte_unchecked(&mut self, col: usize, row: usize) -> &mut u8 {
        debug_assert!(
            col < self.digit_columns() && row < self.digit_rows(),
            "digit ({}, {}) outside the grid",
            col,
            row
        );
        let offset = raw_offset(self.columns as usize, col, row);
        &mut self.bytes[offset]
    }

    /// Zero every digit
    pub fn clear(&mut self) {
        self.fill(0);
    }

    /// Set every digit to `value`
    pub fn fill(&mut self, value: u8) {
        self.bytes.iter_mut().for_each(|b| *b = value);
    }

    /// The raw buffer, module by module
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The raw buffer, mutable
    ///
    /// The slice cannot change length, so the buffer size stays fixed.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// The eight digit bytes of one module
    pub fn module(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(DIGITS_PER_MODULE)?;
        let end = start.checked_add(DIGITS_PER_MODULE)?;
        self.bytes.get(start..end)
    }
}

fn raw_offset(columns: usize, col: usize, row: usize) -> usize {
    (row >> 1) * (columns * DIGITS_PER_MODULE)
        + (col >> 2) * DIGITS_PER_MODULE
        + (col & 3)
        + ((row & 1) << 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_buffer_len() {
        let buffer = PixelBuffer::new(5, 2).unwrap();
        assert_eq!(buffer.len(), 80);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(PixelBuffer::new(0, 1), Err(ConfigError::EmptyChain));
        assert_eq!(PixelBuffer::new(65, 1), Err(ConfigError::TooManyModules));
    }

    #[test]
    fn test_offsets_single_module() {
        let buffer = PixelBuffer::new(1, 1).unwrap();
        // Upper row in bytes 0-3, lower row in bytes 4-7
        assert_eq!(buffer.offset(0, 0), Some(0));
        assert_eq!(buffer.offset(3, 0), Some(3));
        assert_eq!(buffer.offset(0, 1), Some(4));
        assert_eq!(buffer.offset(3, 1), Some(7));
        assert_eq!(buffer.offset(4, 0), None);
        assert_eq!(buffer.offset(0, 2), None);
    }

    #[test]
    fn test_offsets_multi_module() {
        let buffer = PixelBuffer::new(3, 2).unwrap();
        // Second module of the first row
        assert_eq!(buffer.offset(4, 0), Some(8));
        assert_eq!(buffer.offset(5, 1), Some(13));
        // First module of the second row
        assert_eq!(buffer.offset(0, 2), Some(24));
        assert_eq!(buffer.offset(11, 3), Some(47));
    }

    #[test]
    fn test_set_and_get_byte() {
        let mut buffer = PixelBuffer::new(2, 1).unwrap();
        buffer.set_byte(6, 1, 0x5A).unwrap();

        assert_eq!(buffer.byte(6, 1), Ok(0x5A));
        assert_eq!(buffer.as_bytes()[14], 0x5A);

        *buffer.get_byte(6, 1).unwrap() |= 0x80;
        assert_eq!(buffer.byte(6, 1), Ok(0xDA));
    }

    #[test]
    fn test_out_of_range_is_error() {
        let mut buffer = PixelBuffer::new(2, 1).unwrap();
        assert_eq!(
            buffer.set_byte(8, 0, 1),
            Err(AddressError::OutOfRange { col: 8, row: 0 })
        );
        assert_eq!(
            buffer.byte(0, 2),
            Err(AddressError::OutOfRange { col: 0, row: 2 })
        );
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic]
    fn test_unchecked_asserts_in_debug() {
        let mut buffer = PixelBuffer::new(1, 1).unwrap();
        let _ = buffer.get_byte_unchecked(4, 0);
    }

    #[test]
    fn test_clear_and_fill() {
        let mut buffer = PixelBuffer::new(3, 3).unwrap();

        buffer.fill(0xA5);
        for row in 0..buffer.digit_rows() {
            for col in 0..buffer.digit_columns() {
                assert_eq!(buffer.byte(col, row), Ok(0xA5));
            }
        }

        buffer.clear();
        for row in 0..buffer.digit_rows() {
            for col in 0..buffer.digit_columns() {
                assert_eq!(buffer.byte(col, row), Ok(0));
            }
        }
    }

    #[test]
    fn test_module_slice() {
        let mut buffer = PixelBuffer::new(2, 1).unwrap();
        buffer.set_byte(4, 1, 9).unwrap();
        assert_eq!(buffer.module(1), Some(&[0, 0, 0, 0, 9, 0, 0, 0][..]));
        assert_eq!(buffer.module(2), None);
        assert_eq!(buffer.module(usize::MAX / DIGITS_PER_MODULE), None);
        assert_eq!(buffer.module(usize::MAX), None);
    }

    proptest! {
        #[test]
        fn prop_addressing_is_bijection(columns in 1u8..=8, rows in 1u8..=8) {
            let buffer = PixelBuffer::new(columns, rows).unwrap();
            let mut seen = vec![false; buffer.len()];

            for row in 0..buffer.digit_rows() {
                for col in 0..buffer.digit_columns() {
                    let offset = buffer.offset(col, row).unwrap();
                    prop_assert!(offset < buffer.len());
                    prop_assert!(!seen[offset]);
                    seen[offset] = true;
                }
            }

            prop_assert!(seen.iter().all(|&s| s));
        }
    }
}

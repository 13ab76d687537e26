//! Per-plane transmission plan
//!
//! A full refresh is eight frames, one per digit plane. Frame `i` carries
//! one digit-register command per module: address `i + 1`, value taken from
//! byte `i` of the module the chain order assigns to that slot.

use crate::buffer::PixelBuffer;
use crate::config::{ConfigError, DIGITS_PER_MODULE};
use crate::protocol::order::{is_permutation, ChainOrder};
use crate::protocol::register::Command;

/// Digit planes per refresh
pub const PLANES: u8 = DIGITS_PER_MODULE as u8;

/// Commands for a full refresh of a buffer
pub struct FramePlan<'a, O: ?Sized> {
    bytes: &'a [u8],
    modules: usize,
    order: &'a O,
}

impl<O: ?Sized> Clone for FramePlan<'_, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<O: ?Sized> Copy for FramePlan<'_, O> {}

impl<'a, O: ChainOrder + ?Sized + 'a> FramePlan<'a, O> {
    /// Plan a refresh of `buffer` using `order`
    ///
    /// Fails with [`ConfigError::InvalidOrder`] unless `order` is a
    /// permutation of the buffer's modules.
    pub fn new(buffer: &'a PixelBuffer, order: &'a O) -> Result<Self, ConfigError> {
        let modules = buffer.module_count();
        if !is_permutation(order, modules) {
            return Err(ConfigError::InvalidOrder);
        }

        Ok(Self {
            bytes: buffer.as_bytes(),
            modules,
            order,
        })
    }

    /// Commands per plane
    pub fn modules(&self) -> usize {
        self.modules
    }

    /// Commands for one plane, in transmission order
    pub fn plane(&self, plane: u8) -> PlaneCommands<'a, O> {
        debug_assert!(plane < PLANES);
        PlaneCommands {
            bytes: self.bytes,
            modules: self.modules,
            order: self.order,
            plane,
            slot: 0,
        }
    }

    /// All planes, in increasing order
    pub fn planes(self) -> impl Iterator<Item = PlaneCommands<'a, O>> + 'a {
        (0..PLANES).map(move |plane| self.plane(plane))
    }
}

/// Iterator over the commands of one plane
pub struct PlaneCommands<'a, O: ?Sized> {
    bytes: &'a [u8],
    modules: usize,
    order: &'a O,
    plane: u8,
    slot: usize,
}

impl<O: ?Sized> PlaneCommands<'_, O> {
    /// Plane index (0-7)
    pub fn plane(&self) -> u8 {
        self.plane
    }
}

impl<O: ChainOrder + ?Sized> Iterator for PlaneCommands<'_, O> {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        if self.slot >= self.modules {
            return None;
        }

        let module = self.order.display_index(self.slot, self.modules);
        self.slot += 1;

        // Orders are checked in `FramePlan::new`; a policy that changes its
        // answer afterwards ends the plane instead of indexing past the buffer
        let value = *self
            .bytes
            .get(module.checked_mul(DIGITS_PER_MODULE)? + usize::from(self.plane))?;
        Some(Command::raw(self.plane + 1, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.modules - self.slot;
        (remaining, Some(remaining))
    }
}

impl<O: ChainOrder + ?Sized> ExactSizeIterator for PlaneCommands<'_, O> {}

//! Chain ordering policies
//!
//! Data shifted into a chain travels through every chip, so the first
//! command of a frame ends up in the chip farthest down the wire. How
//! buffer modules map onto wire positions depends on how the board was
//! wired, which is why the mapping is a policy rather than a formula baked
//! into the serializer.
//!
//! A policy maps a transmission slot `j` (0 = first command of the frame)
//! to the buffer module index whose bytes are sent in that slot. It must be
//! a permutation of `0..modules`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::MAX_MODULES;

/// Maps transmission slots to buffer modules
pub trait ChainOrder {
    /// Buffer module index sent in `slot` of a frame for `modules` modules
    ///
    /// Only called with `slot < modules`.
    fn display_index(&self, slot: usize, modules: usize) -> usize;
}

impl<F> ChainOrder for F
where
    F: Fn(usize, usize) -> usize,
{
    fn display_index(&self, slot: usize, modules: usize) -> usize {
        self(slot, modules)
    }
}

/// Built-in wiring layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChainLayout {
    /// Modules wired in groups that alternate direction, whole chain reversed
    Serpentine {
        /// Modules per group
        group_size: u8,
    },
    /// Last buffer module first on the wire
    Reversed,
    /// Buffer order equals wire order
    Natural,
}

impl ChainLayout {
    /// Serpentine in groups of ten, as on the reference board
    pub const REFERENCE: Self = Self::Serpentine { group_size: 10 };
}

impl Default for ChainLayout {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl ChainOrder for ChainLayout {
    fn display_index(&self, slot: usize, modules: usize) -> usize {
        match *self {
            Self::Serpentine { group_size } => {
                serpentine_index(slot, modules, group_size as usize)
            }
            Self::Reversed => modules - 1 - slot,
            Self::Natural => slot,
        }
    }
}

/// Serpentine mapping
///
/// Even groups keep their order, odd groups are reversed within the group,
/// then the result is mirrored across the whole chain. A short trailing
/// group is reversed over its actual length.
pub fn serpentine_index(slot: usize, modules: usize, group_size: usize) -> usize {
    debug_assert!(slot < modules);
    let group_size = group_size.max(1);

    let group = slot / group_size;
    let index_in_group = slot % group_size;

    let raw = if group % 2 == 0 {
        slot
    } else {
        let start = group * group_size;
        let len = group_size.min(modules - start);
        start + (len - 1 - index_in_group)
    };

    modules - 1 - raw
}

/// Check that `order` is a permutation of `0..modules`
///
/// Chains longer than [`MAX_MODULES`] are rejected.
pub fn is_permutation<O: ChainOrder + ?Sized>(order: &O, modules: usize) -> bool {
    if modules > MAX_MODULES {
        return false;
    }

    let mut seen = [false; MAX_MODULES];
    for slot in 0..modules {
        let index = order.display_index(slot, modules);
        if index >= modules || seen[index] {
            return false;
        }
        seen[index] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sequence<O: ChainOrder>(order: &O, modules: usize) -> Vec<usize> {
        (0..modules)
            .map(|slot| order.display_index(slot, modules))
            .collect()
    }

    #[test]
    fn test_single_group_is_full_reversal() {
        let order = ChainLayout::REFERENCE;
        assert_eq!(sequence(&order, 10), vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_two_groups() {
        // Group 0 (slots 0-9): raw = slot, mirrored to 19-slot.
        // Group 1 (slots 10-19): raw = 10 + (9 - (slot - 10)) = 29 - slot,
        // mirrored to slot - 10.
        let order = ChainLayout::REFERENCE;
        let expected: Vec<usize> = (10..20).rev().chain(0..10).collect();
        assert_eq!(sequence(&order, 20), expected);
    }

    #[test]
    fn test_three_groups() {
        let order = ChainLayout::REFERENCE;
        let got = sequence(&order, 30);
        // Slot 0 carries the last module, slot 10 the module mirrored from
        // raw 19, slot 20 is back in forward order.
        assert_eq!(got[0], 29);
        assert_eq!(got[10], 10);
        assert_eq!(got[19], 19);
        assert_eq!(got[20], 9);
        assert_eq!(got[29], 0);
    }

    #[test]
    fn test_short_trailing_group() {
        // 15 modules: group 1 has only five members (slots 10-14)
        let order = ChainLayout::REFERENCE;
        let expected: Vec<usize> = (5..15).rev().chain(0..5).collect();
        assert_eq!(sequence(&order, 15), expected);
    }

    #[test]
    fn test_reversed_and_natural() {
        assert_eq!(sequence(&ChainLayout::Reversed, 4), vec![3, 2, 1, 0]);
        assert_eq!(sequence(&ChainLayout::Natural, 4), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_closure_policy() {
        let swap_pairs = |slot: usize, _modules: usize| slot ^ 1;
        assert_eq!(sequence(&swap_pairs, 4), vec![1, 0, 3, 2]);
        assert!(is_permutation(&swap_pairs, 4));
        assert!(!is_permutation(&swap_pairs, 3));
    }

    #[test]
    fn test_non_permutation_detected() {
        let constant = |_slot: usize, _modules: usize| 0;
        assert!(!is_permutation(&constant, 2));
        assert!(is_permutation(&constant, 1));
        assert!(!is_permutation(&ChainLayout::Natural, MAX_MODULES + 1));
    }

    proptest! {
        #[test]
        fn prop_serpentine_is_permutation(modules in 1usize..=MAX_MODULES, group in 1u8..=16) {
            let order = ChainLayout::Serpentine { group_size: group };
            prop_assert!(is_permutation(&order, modules));
        }

        #[test]
        fn prop_builtin_layouts_are_permutations(modules in 1usize..=MAX_MODULES) {
            prop_assert!(is_permutation(&ChainLayout::REFERENCE, modules));
            prop_assert!(is_permutation(&ChainLayout::Reversed, modules));
            prop_assert!(is_permutation(&ChainLayout::Natural, modules));
        }
    }
}

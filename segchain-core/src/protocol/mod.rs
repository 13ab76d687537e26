//! Chain wire protocol
//!
//! Register map and command frames of the display chips, the ordering
//! policies that map transmission slots to modules, and the per-plane
//! transmission plan built from them.

pub mod order;
pub mod plan;
pub mod register;

pub use order::{is_permutation, serpentine_index, ChainLayout, ChainOrder};
pub use plan::{FramePlan, PlaneCommands, PLANES};
pub use register::{Command, DecodeMode, Register, INIT_SEQUENCE, MAX_INTENSITY};

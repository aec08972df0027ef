//! Cube State Synthesis
//!
//! Turns a crystal genome into a cube state that obeys the reachability
//! invariants, and encodes that state as a single integer.
//!
//! ## Module Structure
//!
//! - `state`: validated permutation/orientation quadruple, parity math
//! - `generator`: genome-seeded synthesis with parity repair
//! - `encode`: Lehmer / mixed-radix bijection to [`UniqueId`]

pub mod state;
pub mod generator;
pub mod encode;

pub use state::{CubeState, CubeStateError, permutation_parity};
pub use generator::{generate_cube_state, cube_seed};
pub use encode::{encode, decode, DecodeError, ParseIdError, UniqueId, ID_SPACE};

//! Core deterministic primitives.
//!
//! Seed derivation, the LCG stream and the genome fold. Every function here
//! is pure 32-bit wrapping arithmetic, identical on every platform.

pub mod seed;
pub mod rng;
pub mod hash;

// Re-export core types
pub use seed::derive_seed;
pub use rng::DeterministicRng;
pub use hash::{fold_genome, GenomeHasher};

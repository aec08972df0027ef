//! # Crystal ID
//!
//! Deterministic, one-way visitor fingerprints. A client address string
//! becomes a large unique id and an ASCII snowflake "crystal"; the address
//! itself is never stored.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       CRYSTAL ID                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── seed.rs     - Address → 32-bit seed (IPv4 / FNV-1a)     │
//! │  ├── rng.rs      - Deterministic 32-bit LCG                  │
//! │  └── hash.rs     - Genome fold into the cube seed            │
//! │                                                              │
//! │  crystal/        - Snowflake                                 │
//! │  ├── genome.rs   - Arm length + sorted branches              │
//! │  └── render.rs   - ASCII rendering                           │
//! │                                                              │
//! │  cube/           - Cube state                                │
//! │  ├── state.rs    - Validated permutation/orientation state   │
//! │  ├── generator.rs- Genome-seeded synthesis, parity repair    │
//! │  └── encode.rs   - Lehmer / mixed-radix unique id            │
//! │                                                              │
//! │  pipeline.rs     - Address → AnonymizedVisitor               │
//! │  visitors/       - Stored document, stores, migration        │
//! │  config.rs       - Environment configuration                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! `core/`, `crystal/`, `cube/` and `pipeline` are **100% deterministic**:
//! - All modular steps are wrapping `u32` arithmetic, never floating point
//! - The unique id is composed in `u128`
//! - No shared mutable state; the factorial table is a `const`
//!
//! The same address string yields the same id and crystal on any platform.
//!
//! ## Anonymization Strength
//!
//! Every input collapses to a 32-bit seed, so at most 2^32 distinct ids
//! exist. This is a deduplication key, not a cryptographic scheme.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod crystal;
pub mod cube;
pub mod pipeline;
pub mod visitors;
pub mod config;

// Re-export commonly used types
pub use crate::core::rng::DeterministicRng;
pub use crate::core::seed::derive_seed;
pub use crystal::{render, Genome};
pub use cube::{CubeState, UniqueId};
pub use pipeline::{anonymize, AnonymizedVisitor};
pub use visitors::{VisitorLog, VisitorRecord};
pub use config::CrystalConfig;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

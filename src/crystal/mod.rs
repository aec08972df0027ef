//! Snowflake Crystal
//!
//! Genome generation from the seed stream and its ASCII rendering.
//!
//! - `genome`: arm length and sorted branch list, drawn from the LCG
//! - `render`: six-armed ASCII snowflake, pure function of the genome

pub mod genome;
pub mod render;

pub use genome::{Branch, Genome, GenomeError, GenomeParts};
pub use render::{render, strokes, Frame, Stroke};

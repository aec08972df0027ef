//! Snowflake Genome
//!
//! Procedural crystal description drawn from the seed stream: an arm length
//! plus a short list of side branches, sorted by their position on the arm.

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::core::rng::DeterministicRng;

/// Shortest arm.
pub const MIN_ARM_LENGTH: u8 = 2;

/// Longest arm.
pub const MAX_ARM_LENGTH: u8 = 7;

/// Most branches a genome carries.
pub const MAX_BRANCHES: usize = 4;

/// Longest branch.
pub const MAX_BRANCH_LENGTH: u8 = 3;

/// One side branch: rooted `pos` cells out along every arm, `len` cells long.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Branch {
    /// Distance from the center, in [1, arm_length - 1].
    pub pos: u8,
    /// Cells drawn along each neighbouring direction, in [1, 3].
    pub len: u8,
}

/// Genome construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenomeError {
    /// Arm length outside [2, 7].
    #[error("arm length {0} outside [2, 7]")]
    ArmLength(u8),

    /// Branch count outside [1, 4].
    #[error("branch count {0} outside [1, 4]")]
    BranchCount(usize),

    /// Branch does not fit on the arm.
    #[error("branch at pos {pos} len {len} invalid for arm length {arm_length}")]
    Branch {
        /// Offending branch position.
        pos: u8,
        /// Offending branch length.
        len: u8,
        /// Arm length of the genome.
        arm_length: u8,
    },

    /// Branches not in ascending `pos` order.
    #[error("branches are not sorted by position")]
    Unsorted,
}

/// Crystal genome.
///
/// Branches are always sorted ascending by `pos`, ties kept in draw order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "GenomeParts")]
pub struct Genome {
    arm_length: u8,
    branches: Vec<Branch>,
}

impl Genome {
    /// Build a genome from explicit parts, validating every range.
    pub fn new(arm_length: u8, mut branches: Vec<Branch>) -> Result<Self, GenomeError> {
        if !(MIN_ARM_LENGTH..=MAX_ARM_LENGTH).contains(&arm_length) {
            return Err(GenomeError::ArmLength(arm_length));
        }
        if branches.is_empty() || branches.len() > MAX_BRANCHES {
            return Err(GenomeError::BranchCount(branches.len()));
        }
        for b in &branches {
            if b.pos == 0 || b.pos >= arm_length || b.len == 0 || b.len > MAX_BRANCH_LENGTH {
                return Err(GenomeError::Branch { pos: b.pos, len: b.len, arm_length });
            }
        }

        branches.sort_by_key(|b| b.pos);
        Ok(Self { arm_length, branches })
    }

    /// Grow a genome from a pipeline seed.
    pub fn from_seed(seed: u32) -> Self {
        let mut rng = DeterministicRng::new(seed);
        Self::generate(&mut rng)
    }

    /// Grow a genome from an RNG stream.
    ///
    /// Consumes exactly `2 + 2 * num_branches` draws:
    /// arm length, branch count, then `pos`/`len` for each branch.
    pub fn generate(rng: &mut DeterministicRng) -> Self {
        let arm_length = (rng.next_int(6) + 2) as u8;
        let num_branches = rng.next_int(4) + 1;

        let span = u32::from(arm_length - 1).max(1);
        let mut branches: Vec<Branch> = (0..num_branches)
            .map(|_| {
                let pos = (rng.next_int(span) + 1) as u8;
                let len = (rng.next_int(3) + 1) as u8;
                Branch { pos, len }
            })
            .collect();

        // Vec::sort_by_key is stable
        branches.sort_by_key(|b| b.pos);

        Self { arm_length, branches }
    }

    /// Arm length in [2, 7].
    #[inline]
    pub fn arm_length(&self) -> u8 {
        self.arm_length
    }

    /// Branches sorted by position.
    #[inline]
    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    /// Flattened form `[arm_length, num_branches, pos1, len1, ...]`.
    pub fn flatten(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(2 + 2 * self.branches.len());
        out.push(u32::from(self.arm_length));
        out.push(self.branches.len() as u32);
        for b in &self.branches {
            out.push(u32::from(b.pos));
            out.push(u32::from(b.len));
        }
        out
    }
}

/// Unchecked wire form; deserialization goes through [`Genome::new`].
///
/// Branch order is part of the genome (it feeds the cube seed), so stored
/// genomes must already be sorted rather than being re-sorted on load.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenomeParts {
    arm_length: u8,
    branches: Vec<Branch>,
}

impl TryFrom<GenomeParts> for Genome {
    type Error = GenomeError;

    fn try_from(p: GenomeParts) -> Result<Self, Self::Error> {
        if p.branches.windows(2).any(|w| w[0].pos > w[1].pos) {
            return Err(GenomeError::Unsorted);
        }
        Self::new(p.arm_length, p.branches)
    }
}

// =============================================================================
// TESTS
// =============================================================================

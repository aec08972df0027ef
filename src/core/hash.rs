//! Genome Folding Hash
//!
//! Folds the flattened crystal genome into the seed of the secondary RNG
//! stream that drives cube-state synthesis.

/// Initial accumulator for the genome fold.
pub const GENOME_HASH_INIT: u32 = 0xDEAD_BEEF;

/// Multiplier applied before adding each genome value.
pub const GENOME_HASH_MULTIPLIER: u32 = 31;

/// Incremental `h = h * 31 + v (mod 2^32)` hasher.
///
/// Order of updates is critical for determinism.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenomeHasher {
    state: u32,
}

impl Default for GenomeHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl GenomeHasher {
    /// Create a hasher at the initial accumulator.
    pub const fn new() -> Self {
        Self { state: GENOME_HASH_INIT }
    }

    /// Fold one value into the accumulator.
    #[inline]
    pub fn update(&mut self, value: u32) {
        self.state = self
            .state
            .wrapping_mul(GENOME_HASH_MULTIPLIER)
            .wrapping_add(value);
    }

    /// Return the accumulated hash.
    pub fn finalize(self) -> u32 {
        self.state
    }
}

/// Fold a flattened genome into a 32-bit seed.
pub fn fold_genome(values: &[u32]) -> u32 {
    let mut hasher = GenomeHasher::new();
    for &value in values {
        hasher.update(value);
    }
    hasher.finalize()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_fold_is_init() {
        assert_eq!(fold_genome(&[]), 0xDEADBEEF);
    }

    #[test]
    fn test_fold_wraps() {
        let expected = ((0xDEADBEEFu64 * 31 + 5) % (1u64 << 32)) as u32;
        assert_eq!(fold_genome(&[5]), expected);
    }

    #[test]
    fn test_order_matters() {
        assert_ne!(fold_genome(&[3, 1, 2, 1]), fold_genome(&[1, 3, 1, 2]));
    }

    #[test]
    fn test_incremental_matches_fold() {
        let values = [7, 4, 2, 3, 5, 1, 6, 2, 6, 3];
        let mut hasher = GenomeHasher::default();
        values.iter().for_each(|&v| hasher.update(v));
        assert_eq!(hasher.finalize(), fold_genome(&values));
    }
}

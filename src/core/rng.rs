//! Deterministic Random Number Generator
//!
//! Linear-congruential generator over 32-bit state.
//! Given the same seed, produces identical sequence on all platforms.

use serde::{Serialize, Deserialize};

/// LCG multiplier.
pub const LCG_MULTIPLIER: u32 = 1_664_525;

/// LCG increment.
pub const LCG_INCREMENT: u32 = 1_013_904_223;

/// Deterministic PRNG using a 32-bit linear-congruential recurrence.
///
/// # Determinism Guarantee
///
/// `state = (1664525 * state + 1013904223) mod 2^32`. All arithmetic wraps
/// in `u32`, so the sequence is bit-exact on every target.
///
/// # Example
///
/// ```
/// use crystal_id::core::rng::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(0);
/// assert_eq!(rng.next_u32(), 1013904223); // Always the same!
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicRng {
    state: u32,
}

impl Default for DeterministicRng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed becomes the initial state; it is never returned by a draw.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Restart the stream from a new seed.
    pub fn reseed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Advance the state and return it.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = LCG_MULTIPLIER
            .wrapping_mul(self.state)
            .wrapping_add(LCG_INCREMENT);
        self.state
    }

    /// Generate a random integer in range [0, max).
    ///
    /// Plain modulo of one draw; callers rely on exactly one draw per call.
    #[inline]
    pub fn next_int(&mut self, max: u32) -> u32 {
        let draw = self.next_u32();
        if max == 0 {
            return 0;
        }
        draw % max
    }

    /// Shuffle a slice in place using Fisher-Yates algorithm.
    ///
    /// Consumes `len - 1` draws, walking from the last index down to 1.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        let len = slice.len();
        for i in (1..len).rev() {
            let j = self.next_int((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Get current state (for checkpointing/debugging).
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Restore from saved state.
    pub fn set_state(&mut self, state: u32) {
        self.state = state;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_determinism() {
        // Same seed must produce same sequence
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(12345);

        for _ in 0..1000 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = DeterministicRng::new(12345);
        let mut rng2 = DeterministicRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_rng_known_values() {
        // These values must never change!
        // If they do, every stored visitor id changes with them.
        let mut rng = DeterministicRng::new(0);
        assert_eq!(rng.next_u32(), 1013904223);
        assert_eq!(rng.next_u32(), 1196435762);
        assert_eq!(rng.next_u32(), 3519870697);
    }

    #[test]
    fn test_rng_wraps_at_u32() {
        let mut rng = DeterministicRng::new(u32::MAX);
        let expected = ((1664525u64 * u32::MAX as u64 + 1013904223) % (1u64 << 32)) as u32;
        assert_eq!(rng.next_u32(), expected);
    }

    #[test]
    fn test_next_int() {
        let mut rng = DeterministicRng::new(1234);

        for _ in 0..1000 {
            let val = rng.next_int(100);
            assert!(val < 100);
        }

        // Edge case: max = 0 still consumes a draw
        let before = rng.state();
        assert_eq!(rng.next_int(0), 0);
        assert_ne!(rng.state(), before);

        // Edge case: max = 1
        assert_eq!(rng.next_int(1), 0);
    }

    #[test]
    fn test_shuffle_determinism() {
        let mut rng1 = DeterministicRng::new(1111);
        let mut rng2 = DeterministicRng::new(1111);

        let mut arr1 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let mut arr2 = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

        rng1.shuffle(&mut arr1);
        rng2.shuffle(&mut arr2);

        assert_eq!(arr1, arr2);

        let mut sorted = arr1;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_shuffle_draw_count() {
        let mut rng = DeterministicRng::new(99);
        let mut reference = DeterministicRng::new(99);

        let mut arr = [0u8; 8];
        rng.shuffle(&mut arr);
        for _ in 0..7 {
            reference.next_u32();
        }

        assert_eq!(rng.state(), reference.state());
    }

    #[test]
    fn test_state_checkpoint() {
        let mut rng = DeterministicRng::new(5555);

        for _ in 0..50 {
            rng.next_u32();
        }

        let saved_state = rng.state();
        let next_values: Vec<u32> = (0..10).map(|_| rng.next_u32()).collect();

        rng.set_state(saved_state);

        for expected in next_values {
            assert_eq!(rng.next_u32(), expected);
        }
    }

    #[test]
    fn test_reseed_restarts_stream() {
        let mut rng = DeterministicRng::new(7);
        let first = rng.next_u32();
        rng.next_u32();

        rng.reseed(7);
        assert_eq!(rng.next_u32(), first);
    }
}

//! Cube State Definitions
//!
//! Permutation/orientation quadruple with the three constraints a physically
//! reachable 3x3 cube obeys. Construction through [`CubeState::new`] checks
//! all of them.

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Corner cubies.
pub const NUM_CORNERS: usize = 8;

/// Edge cubies.
pub const NUM_EDGES: usize = 12;

/// Cube state validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CubeStateError {
    /// Corner array is not a permutation of 0..8.
    #[error("corners are not a permutation of 0..8")]
    CornerPermutation,

    /// Edge array is not a permutation of 0..12.
    #[error("edges are not a permutation of 0..12")]
    EdgePermutation,

    /// Orientation digit out of range.
    #[error("orientation digit {value} out of range at index {index}")]
    OrientationDigit {
        /// Position of the bad digit.
        index: usize,
        /// The digit found.
        value: u8,
    },

    /// Corner orientations do not sum to 0 mod 3.
    #[error("corner orientation sum {0} is not divisible by 3")]
    CornerTwist(u32),

    /// Edge orientations do not sum to 0 mod 2.
    #[error("edge orientation sum {0} is not even")]
    EdgeFlip(u32),

    /// Corner and edge permutation parities differ.
    #[error("corner and edge permutation parities differ")]
    Parity,
}

/// A cube state satisfying the reachability invariants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "CubeStateParts")]
pub struct CubeState {
    corners: [u8; NUM_CORNERS],
    corner_orient: [u8; NUM_CORNERS],
    edges: [u8; NUM_EDGES],
    edge_orient: [u8; NUM_EDGES],
}

impl CubeState {
    /// Build a state, rejecting anything a real cube could not reach.
    pub fn new(
        corners: [u8; NUM_CORNERS],
        corner_orient: [u8; NUM_CORNERS],
        edges: [u8; NUM_EDGES],
        edge_orient: [u8; NUM_EDGES],
    ) -> Result<Self, CubeStateError> {
        if !is_permutation(&corners) {
            return Err(CubeStateError::CornerPermutation);
        }
        if !is_permutation(&edges) {
            return Err(CubeStateError::EdgePermutation);
        }
        if let Some((index, &value)) = corner_orient.iter().enumerate().find(|(_, &v)| v > 2) {
            return Err(CubeStateError::OrientationDigit { index, value });
        }
        if let Some((index, &value)) = edge_orient.iter().enumerate().find(|(_, &v)| v > 1) {
            return Err(CubeStateError::OrientationDigit { index, value });
        }

        let twist: u32 = corner_orient.iter().map(|&v| u32::from(v)).sum();
        if twist % 3 != 0 {
            return Err(CubeStateError::CornerTwist(twist));
        }
        let flip: u32 = edge_orient.iter().map(|&v| u32::from(v)).sum();
        if flip % 2 != 0 {
            return Err(CubeStateError::EdgeFlip(flip));
        }
        if permutation_parity(&corners) != permutation_parity(&edges) {
            return Err(CubeStateError::Parity);
        }

        Ok(Self { corners, corner_orient, edges, edge_orient })
    }

    /// Assemble a state the caller has already made valid.
    pub(crate) fn from_parts(
        corners: [u8; NUM_CORNERS],
        corner_orient: [u8; NUM_CORNERS],
        edges: [u8; NUM_EDGES],
        edge_orient: [u8; NUM_EDGES],
    ) -> Self {
        let state = Self { corners, corner_orient, edges, edge_orient };
        debug_assert!(state.is_valid(), "constructed invalid cube state {state:?}");
        state
    }

    /// The solved cube.
    pub fn solved() -> Self {
        let mut corners = [0u8; NUM_CORNERS];
        let mut edges = [0u8; NUM_EDGES];
        corners.iter_mut().enumerate().for_each(|(i, c)| *c = i as u8);
        edges.iter_mut().enumerate().for_each(|(i, e)| *e = i as u8);
        Self::from_parts(corners, [0; NUM_CORNERS], edges, [0; NUM_EDGES])
    }

    /// Re-check every invariant.
    pub fn is_valid(&self) -> bool {
        Self::new(self.corners, self.corner_orient, self.edges, self.edge_orient).is_ok()
    }

    /// Corner permutation.
    #[inline]
    pub fn corners(&self) -> &[u8; NUM_CORNERS] {
        &self.corners
    }

    /// Corner orientations, each in {0, 1, 2}.
    #[inline]
    pub fn corner_orient(&self) -> &[u8; NUM_CORNERS] {
        &self.corner_orient
    }

    /// Edge permutation.
    #[inline]
    pub fn edges(&self) -> &[u8; NUM_EDGES] {
        &self.edges
    }

    /// Edge orientations, each in {0, 1}.
    #[inline]
    pub fn edge_orient(&self) -> &[u8; NUM_EDGES] {
        &self.edge_orient
    }
}

/// Unchecked wire form; deserialization goes through [`CubeState::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CubeStateParts {
    corners: [u8; NUM_CORNERS],
    corner_orient: [u8; NUM_CORNERS],
    edges: [u8; NUM_EDGES],
    edge_orient: [u8; NUM_EDGES],
}

impl TryFrom<CubeStateParts> for CubeState {
    type Error = CubeStateError;

    fn try_from(p: CubeStateParts) -> Result<Self, Self::Error> {
        Self::new(p.corners, p.corner_orient, p.edges, p.edge_orient)
    }
}

/// Whether `values` holds each of `0..values.len()` exactly once.
pub fn is_permutation(values: &[u8]) -> bool {
    let mut seen = [false; 256];
    values.iter().all(|&v| {
        let fresh = (v as usize) < values.len() && !seen[v as usize];
        seen[v as usize] = true;
        fresh
    })
}

/// Permutation parity: number of even-length cycles, mod 2.
///
/// `perm` must be a permutation of `0..perm.len()`.
pub fn permutation_parity(perm: &[u8]) -> u8 {
    let mut visited = vec![false; perm.len()];
    let mut even_cycles = 0u8;

    for start in 0..perm.len() {
        if visited[start] {
            continue;
        }
        let mut len = 0;
        let mut i = start;
        while !visited[i] {
            visited[i] = true;
            i = perm[i] as usize;
            len += 1;
        }
        if len % 2 == 0 {
            even_cycles ^= 1;
        }
    }

    even_cycles
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTITY_8: [u8; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
    const IDENTITY_12: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

    #[test]
    fn test_parity() {
        assert_eq!(permutation_parity(&IDENTITY_8), 0);
        // single transposition
        assert_eq!(permutation_parity(&[1, 0, 2, 3]), 1);
        // 3-cycle is even
        assert_eq!(permutation_parity(&[1, 2, 0, 3]), 0);
        // two transpositions
        assert_eq!(permutation_parity(&[1, 0, 3, 2]), 0);
        // 4-cycle is odd
        assert_eq!(permutation_parity(&[1, 2, 3, 0]), 1);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&IDENTITY_12));
        assert!(is_permutation(&[2, 0, 1]));
        assert!(!is_permutation(&[0, 0, 1]));
        assert!(!is_permutation(&[0, 1, 3]));
        assert!(is_permutation(&[]));
    }

    #[test]
    fn test_solved_is_valid() {
        let solved = CubeState::solved();
        assert!(solved.is_valid());
        assert_eq!(solved.corners(), &IDENTITY_8);
        assert_eq!(solved.edges(), &IDENTITY_12);
    }

    #[test]
    fn test_rejects_twist() {
        let err = CubeState::new(IDENTITY_8, [1, 0, 0, 0, 0, 0, 0, 0], IDENTITY_12, [0; 12]);
        assert_eq!(err, Err(CubeStateError::CornerTwist(1)));
    }

    #[test]
    fn test_rejects_flip() {
        let mut eo = [0; 12];
        eo[3] = 1;
        let err = CubeState::new(IDENTITY_8, [0; 8], IDENTITY_12, eo);
        assert_eq!(err, Err(CubeStateError::EdgeFlip(1)));
    }

    #[test]
    fn test_rejects_parity() {
        let mut corners = IDENTITY_8;
        corners.swap(0, 1);
        let err = CubeState::new(corners, [0; 8], IDENTITY_12, [0; 12]);
        assert_eq!(err, Err(CubeStateError::Parity));

        // Swapping two edges as well restores reachability
        let mut edges = IDENTITY_12;
        edges.swap(10, 11);
        assert!(CubeState::new(corners, [0; 8], edges, [0; 12]).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let json = serde_json::to_string(&CubeState::solved()).unwrap();
        let back: CubeState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CubeState::solved());

        let twisted = json.replacen("\"cornerOrient\":[0", "\"cornerOrient\":[1", 1);
        assert!(serde_json::from_str::<CubeState>(&twisted).is_err());
    }

    #[test]
    fn test_rejects_bad_digits_and_permutations() {
        assert_eq!(
            CubeState::new([0; 8], [0; 8], IDENTITY_12, [0; 12]),
            Err(CubeStateError::CornerPermutation)
        );
        assert_eq!(
            CubeState::new(IDENTITY_8, [0; 8], [0; 12], [0; 12]),
            Err(CubeStateError::EdgePermutation)
        );
        assert_eq!(
            CubeState::new(IDENTITY_8, [3, 0, 0, 0, 0, 0, 0, 0], IDENTITY_12, [0; 12]),
            Err(CubeStateError::OrientationDigit { index: 0, value: 3 })
        );
    }
}

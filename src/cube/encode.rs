//! Cube State Encoding
//!
//! Bijection between cube states and integers in `[0, 8!·3^7·12!·2^11)`:
//! Lehmer codes for the two permutations, base-3 and base-2 digits for the
//! free orientations, composed as a mixed-radix number in `u128`.
//!
//! The result needs ~67 bits, so it never fits a `u64`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use super::state::{is_permutation, CubeState, CubeStateError, NUM_CORNERS, NUM_EDGES};

/// `0!..=12!`, fixed at compile time.
pub const FACTORIALS: [u64; 13] = factorial_table();

const fn factorial_table() -> [u64; 13] {
    let mut table = [1u64; 13];
    let mut i = 1;
    while i < table.len() {
        table[i] = table[i - 1] * i as u64;
        i += 1;
    }
    table
}

/// Corner permutations, 8!.
pub const CORNER_PERM_RADIX: u128 = FACTORIALS[NUM_CORNERS] as u128;

/// Free corner twists, 3^7.
pub const CORNER_TWIST_RADIX: u128 = 2187;

/// Edge permutations, 12!.
pub const EDGE_PERM_RADIX: u128 = FACTORIALS[NUM_EDGES] as u128;

/// Free edge flips, 2^11.
pub const EDGE_FLIP_RADIX: u128 = 2048;

/// Size of the id space: 86 504 006 548 979 712 000.
pub const ID_SPACE: u128 = CORNER_PERM_RADIX * CORNER_TWIST_RADIX * EDGE_PERM_RADIX * EDGE_FLIP_RADIX;

/// Errors mapping an integer back to a cube state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Id is not below [`ID_SPACE`].
    #[error("id {0} outside the cube id space")]
    OutOfRange(u128),

    /// Id decodes to an unreachable state.
    #[error("id decodes to an unreachable state: {0}")]
    Unreachable(#[from] CubeStateError),
}

/// Errors parsing a decimal id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseIdError {
    /// Empty string or a non-digit character.
    #[error("id must be a non-empty run of decimal digits")]
    NotDecimal,

    /// Value not below [`ID_SPACE`].
    #[error("id outside the cube id space")]
    OutOfRange,
}

/// Anonymized visitor id.
///
/// Serialized as a decimal string: the value exceeds what JSON numbers
/// carry losslessly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueId(u128);

impl UniqueId {
    /// Wrap a raw value, if it lies in the id space.
    pub fn new(value: u128) -> Option<Self> {
        (value < ID_SPACE).then_some(Self(value))
    }

    /// Raw value.
    #[inline]
    pub fn value(self) -> u128 {
        self.0
    }
}

impl fmt::Display for UniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UniqueId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseIdError::NotDecimal);
        }
        let value: u128 = s.parse().map_err(|_| ParseIdError::OutOfRange)?;
        Self::new(value).ok_or(ParseIdError::OutOfRange)
    }
}

impl Serialize for UniqueId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for UniqueId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Lehmer rank of a permutation of `0..perm.len()`.
///
/// Result lies in `[0, n!)`. Returns `None` if `perm` is longer than 12 or
/// is not a permutation of `0..perm.len()`.
pub fn lehmer_rank(perm: &[u8]) -> Option<u64> {
    if perm.len() >= FACTORIALS.len() || !is_permutation(perm) {
        return None;
    }
    Some(permutation_rank(perm))
}

/// Rank of a slice already known to be a permutation of at most 12 values.
///
/// Each digit is the number of later values smaller than the current one,
/// which equals its index among the values not yet used.
fn permutation_rank(perm: &[u8]) -> u64 {
    let n = perm.len();
    perm.iter().enumerate().fold(0u64, |rank, (i, &value)| {
        let digit = perm[i + 1..].iter().filter(|&&later| later < value).count() as u64;
        rank + digit * FACTORIALS[n - 1 - i]
    })
}

/// Inverse of [`lehmer_rank`] for permutations of length `N`.
///
/// Returns `None` when `rank >= N!`.
pub fn lehmer_unrank<const N: usize>(mut rank: u64) -> Option<[u8; N]> {
    if N > 12 || rank >= FACTORIALS[N] {
        return None;
    }

    let mut available: Vec<u8> = (0..N as u8).collect();
    let mut perm = [0u8; N];
    for (i, slot) in perm.iter_mut().enumerate() {
        let weight = FACTORIALS[N - 1 - i];
        let digit = (rank / weight) as usize;
        rank %= weight;
        *slot = available.remove(digit);
    }

    Some(perm)
}

/// Encode a cube state as its unique id.
///
/// ```
/// use crystal_id::cube::{encode, CubeState};
///
/// assert_eq!(encode(&CubeState::solved()).value(), 0);
/// ```
pub fn encode(state: &CubeState) -> UniqueId {
    let cp = u128::from(permutation_rank(state.corners()));
    let co = state.corner_orient()[..NUM_CORNERS - 1]
        .iter()
        .fold(0u128, |acc, &d| acc * 3 + u128::from(d));
    let ep = u128::from(permutation_rank(state.edges()));
    let eo = state.edge_orient()[..NUM_EDGES - 1]
        .iter()
        .fold(0u128, |acc, &d| acc * 2 + u128::from(d));

    UniqueId(((cp * CORNER_TWIST_RADIX + co) * EDGE_PERM_RADIX + ep) * EDGE_FLIP_RADIX + eo)
}

/// Decode a unique id back into the cube state it names.
pub fn decode(id: u128) -> Result<CubeState, DecodeError> {
    if id >= ID_SPACE {
        return Err(DecodeError::OutOfRange(id));
    }

    let mut rest = id;
    let eo = (rest % EDGE_FLIP_RADIX) as u32;
    rest /= EDGE_FLIP_RADIX;
    let ep = (rest % EDGE_PERM_RADIX) as u64;
    rest /= EDGE_PERM_RADIX;
    let co = (rest % CORNER_TWIST_RADIX) as u32;
    let cp = (rest / CORNER_TWIST_RADIX) as u64;

    let corners = lehmer_unrank::<NUM_CORNERS>(cp).ok_or(DecodeError::OutOfRange(id))?;
    let edges = lehmer_unrank::<NUM_EDGES>(ep).ok_or(DecodeError::OutOfRange(id))?;

    let mut corner_orient = [0u8; NUM_CORNERS];
    let mut digits = co;
    for slot in corner_orient[..NUM_CORNERS - 1].iter_mut().rev() {
        *slot = (digits % 3) as u8;
        digits /= 3;
    }
    let twist: u32 = corner_orient.iter().map(|&d| u32::from(d)).sum();
    corner_orient[NUM_CORNERS - 1] = ((3 - twist % 3) % 3) as u8;

    let mut edge_orient = [0u8; NUM_EDGES];
    let mut digits = eo;
    for slot in edge_orient[..NUM_EDGES - 1].iter_mut().rev() {
        *slot = (digits % 2) as u8;
        digits /= 2;
    }
    let flip: u32 = edge_orient.iter().map(|&d| u32::from(d)).sum();
    edge_orient[NUM_EDGES - 1] = (flip % 2) as u8;

    Ok(CubeState::new(corners, corner_orient, edges, edge_orient)?)
}

// =============================================================================
// TESTS
// =============================================================================

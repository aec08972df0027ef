//! Anonymization Pipeline
//!
//! Address string → seed → genome → cube state → unique id.
//!
//! Every stage is a pure function of the previous one. Nothing is cached
//! between calls, so concurrent callers need no synchronization.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::seed::derive_seed;
use crate::crystal::genome::Genome;
use crate::crystal::render::render;
use crate::cube::encode::{encode, UniqueId};
use crate::cube::generator::generate_cube_state;
use crate::cube::state::CubeState;
use crate::visitors::record::VisitorRecord;

/// Pipeline output for one observed address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizedVisitor {
    /// Decimal-serialized unique id.
    pub anonymized_id: UniqueId,
    /// Crystal genome.
    pub genome: Genome,
    /// Cube state the id encodes.
    pub cube_state: CubeState,
}

impl AnonymizedVisitor {
    /// Render the crystal fingerprint.
    pub fn crystal(&self) -> String {
        render(&self.genome)
    }

    /// Store record `{id, crystal}` for this visitor.
    pub fn to_record(&self) -> VisitorRecord {
        VisitorRecord {
            id: self.anonymized_id.to_string(),
            crystal: self.crystal(),
        }
    }
}

/// Run the full pipeline on an address string.
///
/// Total: malformed input takes the hash path, never an error.
///
/// ```
/// use crystal_id::anonymize;
///
/// let a = anonymize("203.0.113.7");
/// let b = anonymize(" [203.0.113.7] ");
/// assert_eq!(a, b);
/// ```
pub fn anonymize(address: &str) -> AnonymizedVisitor {
    // The seed is not logged: for IPv4 it is the address itself
    let genome = Genome::from_seed(derive_seed(address));
    let cube_state = generate_cube_state(&genome);
    let anonymized_id = encode(&cube_state);

    debug!(
        id = %anonymized_id,
        arm_length = genome.arm_length(),
        branches = genome.branches().len(),
        "Derived visitor fingerprint"
    );

    AnonymizedVisitor {
        anonymized_id,
        genome,
        cube_state,
    }
}

// =============================================================================
// TESTS
// =============================================================================

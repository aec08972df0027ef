//! Visitor Document
//!
//! The single stored document of the visitor counter: a count plus the list
//! of anonymized visitors in first-seen order.

use serde::{Serialize, Deserialize};

use crate::pipeline::AnonymizedVisitor;

/// One stored visitor: anonymized id and its crystal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitorRecord {
    /// Decimal unique id.
    pub id: String,
    /// ASCII crystal, empty for records migrated without an address.
    #[serde(default)]
    pub crystal: String,
}

/// Stored visitor document `{count, visitors}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorLog {
    /// Number of distinct visitors counted.
    #[serde(default)]
    pub count: u64,
    /// Visitors in first-seen order.
    #[serde(default)]
    pub visitors: Vec<VisitorRecord>,
}

impl VisitorLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a visitor id is already recorded.
    pub fn contains(&self, id: &str) -> bool {
        self.visitors.iter().any(|v| v.id == id)
    }

    /// Find a visitor by id.
    pub fn get(&self, id: &str) -> Option<&VisitorRecord> {
        self.visitors.iter().find(|v| v.id == id)
    }

    /// Record a visit. Returns `true` when the visitor is new.
    ///
    /// Repeat visitors leave the document untouched.
    pub fn record(&mut self, visitor: &AnonymizedVisitor) -> bool {
        let id = visitor.anonymized_id.to_string();
        if self.contains(&id) {
            return false;
        }

        self.visitors.push(VisitorRecord {
            id,
            crystal: visitor.crystal(),
        });
        self.count += 1;
        true
    }
}

// =============================================================================
// TESTS
// =============================================================================

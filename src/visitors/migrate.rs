//! Legacy Record Migration
//!
//! Older documents stored raw client addresses. Migration runs every stored
//! address through the pipeline once and keeps already-anonymized ids as
//! they are.

use serde::{Serialize, Deserialize};
use tracing::{debug, info};

use crate::pipeline::anonymize;
use super::record::{VisitorLog, VisitorRecord};

/// A visitor entry as older documents may hold it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LegacyEntry {
    /// Bare string: a raw address or an anonymized id.
    Raw(String),
    /// Current `{id, crystal}` shape.
    Record(VisitorRecord),
}

/// Visitor document in any historical shape.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyVisitorLog {
    /// Stored count, carried over unchanged.
    #[serde(default)]
    pub count: u64,
    /// Mixed legacy entries.
    #[serde(default)]
    pub visitors: Vec<LegacyEntry>,
}

/// What a migration pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Raw addresses replaced by pipeline output.
    pub anonymized: usize,
    /// Entries kept as they were.
    pub kept: usize,
    /// Entries dropped because their id was already present.
    pub duplicates: usize,
}

impl MigrationReport {
    /// Whether the pass changed anything.
    pub fn changed(&self) -> bool {
        self.anonymized > 0 || self.duplicates > 0
    }
}

/// Whether a stored string still looks like a raw address.
#[inline]
pub fn is_raw_address(value: &str) -> bool {
    value.contains('.') || value.contains(':')
}

/// Whether a stored string is an anonymized id.
#[inline]
pub fn is_anonymized_id(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Migrate a single entry.
///
/// Returns the record and whether it had to be anonymized.
pub fn migrate_entry(entry: &LegacyEntry) -> (VisitorRecord, bool) {
    match entry {
        LegacyEntry::Raw(value) if is_anonymized_id(value) => (
            VisitorRecord { id: value.clone(), crystal: String::new() },
            false,
        ),
        // Raw addresses and unrecognised text are never retained
        LegacyEntry::Raw(value) => (anonymize(value).to_record(), true),
        LegacyEntry::Record(record) if is_raw_address(&record.id) => {
            (anonymize(&record.id).to_record(), true)
        }
        LegacyEntry::Record(record) => (record.clone(), false),
    }
}

/// Migrate a whole document.
///
/// Entry order is preserved; later entries whose id is already present are
/// dropped. The stored count is carried over unchanged, so `count` and
/// `visitors.len()` can differ after a migration.
pub fn migrate_log(legacy: &LegacyVisitorLog) -> (VisitorLog, MigrationReport) {
    let mut log = VisitorLog {
        count: legacy.count,
        visitors: Vec::with_capacity(legacy.visitors.len()),
    };
    let mut report = MigrationReport::default();

    for entry in &legacy.visitors {
        let (record, anonymized) = migrate_entry(entry);
        if log.contains(&record.id) {
            debug!(id = %record.id, "Dropping duplicate visitor during migration");
            report.duplicates += 1;
            continue;
        }
        if anonymized {
            report.anonymized += 1;
        } else {
            report.kept += 1;
        }
        log.visitors.push(record);
    }

    info!(
        anonymized = report.anonymized,
        kept = report.kept,
        duplicates = report.duplicates,
        "Migrated visitor document"
    );

    (log, report)
}

// =============================================================================
// TESTS
// =============================================================================

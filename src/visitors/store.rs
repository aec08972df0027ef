//! Visitor Stores
//!
//! Persistence for the visitor document, keyed by a store name. The pipeline
//! never touches a store; callers load, record and save.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::pipeline::{anonymize, AnonymizedVisitor};
use super::migrate::{migrate_log, LegacyVisitorLog, MigrationReport};
use super::record::VisitorLog;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("store I/O failed at {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The stored document is not valid JSON of the expected shape.
    #[error("malformed document in store '{store}': {source}")]
    Malformed {
        /// Store name.
        store: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be serialized for writing.
    #[error("failed to serialize document for store '{store}': {source}")]
    Serialize {
        /// Store name.
        store: String,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// Render a document as pretty JSON for `store`.
fn encode_document<T: Serialize + ?Sized>(store: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string_pretty(value).map_err(|source| StoreError::Serialize {
        store: store.to_string(),
        source,
    })
}

/// Raw document storage under a store name.
///
/// Implementors only move bytes; the provided methods handle the document.
pub trait VisitorStore {
    /// Application-level store name.
    fn name(&self) -> &str;

    /// Read the raw document, `None` if the store is empty.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the raw document.
    fn write(&mut self, document: &str) -> Result<(), StoreError>;

    /// Load the visitor document; an empty store yields an empty log.
    fn load(&self) -> Result<VisitorLog, StoreError> {
        match self.read()? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                store: self.name().to_string(),
                source,
            }),
            None => Ok(VisitorLog::new()),
        }
    }

    /// Load the document accepting legacy entry shapes.
    fn load_legacy(&self) -> Result<LegacyVisitorLog, StoreError> {
        match self.read()? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                store: self.name().to_string(),
                source,
            }),
            None => Ok(LegacyVisitorLog::default()),
        }
    }

    /// Persist the visitor document.
    fn save(&mut self, log: &VisitorLog) -> Result<(), StoreError> {
        let document = encode_document(self.name(), log)?;
        self.write(&document)
    }
}

/// Result of recording one visit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitOutcome {
    /// Pipeline output for the visitor.
    pub visitor: AnonymizedVisitor,
    /// Whether this visitor had not been seen before.
    pub is_new: bool,
    /// Visitor count after the visit.
    pub count: u64,
}

/// Anonymize an address and record it in a store.
///
/// The document is only rewritten when the visitor is new.
pub fn record_visit<S: VisitorStore + ?Sized>(
    store: &mut S,
    address: &str,
) -> Result<VisitOutcome, StoreError> {
    let visitor = anonymize(address);
    let mut log = store.load()?;

    let is_new = log.record(&visitor);
    if is_new {
        store.save(&log)?;
        info!(id = %visitor.anonymized_id, count = log.count, "New visitor");
    } else {
        debug!(id = %visitor.anonymized_id, "Returning visitor");
    }

    Ok(VisitOutcome { visitor, is_new, count: log.count })
}

/// Migrate a store's document in place.
///
/// Writes back only when migration changed something.
pub fn migrate_store<S: VisitorStore + ?Sized>(store: &mut S) -> Result<MigrationReport, StoreError> {
    let legacy = store.load_legacy()?;
    let (log, report) = migrate_log(&legacy);
    if report.changed() {
        store.save(&log)?;
    }
    Ok(report)
}

// =============================================================================
// JSON FILE STORE
// =============================================================================

/// Store backed by `<dir>/<name>.json`.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    name: String,
    path: PathBuf,
}

impl JsonFileStore {
    /// Open (lazily) the store `name` under `dir`.
    pub fn new(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let name = name.into();
        let path = dir.as_ref().join(format!("{name}.json"));
        Self { name, path }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io { path: self.path.clone(), source }
    }
}

impl VisitorStore for JsonFileStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn write(&mut self, document: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        // Write-then-rename so readers never see a torn document
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, document).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store holding a single named document.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    name: String,
    document: Option<String>,
}

impl MemoryStore {
    /// Empty store named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), document: None }
    }

    /// Seed the store with a raw document.
    pub fn with_document(name: impl Into<String>, document: impl Into<String>) -> Self {
        Self { name: name.into(), document: Some(document.into()) }
    }
}

impl VisitorStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<(), StoreError> {
        self.document = Some(document.to_string());
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_loads_empty_log() {
        let store = MemoryStore::new("visitors");
        assert_eq!(store.load().unwrap(), VisitorLog::new());
    }

    #[test]
    fn test_record_visit_counts_unique() {
        let mut store = MemoryStore::new("visitors");

        let first = record_visit(&mut store, "203.0.113.9").unwrap();
        assert!(first.is_new);
        assert_eq!(first.count, 1);

        let again = record_visit(&mut store, "203.0.113.9").unwrap();
        assert!(!again.is_new);
        assert_eq!(again.count, 1);
        assert_eq!(again.visitor, first.visitor);

        let other = record_visit(&mut store, "2001:db8::9").unwrap();
        assert!(other.is_new);
        assert_eq!(other.count, 2);

        let log = store.load().unwrap();
        assert_eq!(log.visitors.len(), 2);
        assert_eq!(log.visitors[0].id, first.visitor.anonymized_id.to_string());
    }

    #[test]
    fn test_stored_document_has_no_address() {
        let mut store = MemoryStore::new("visitors");
        record_visit(&mut store, "203.0.113.77").unwrap();

        let raw = store.read().unwrap().unwrap();
        assert!(!raw.contains("203.0.113.77"));
    }

    #[test]
    fn test_malformed_document() {
        let store = MemoryStore::with_document("visitors", "{not json");
        assert!(matches!(store.load(), Err(StoreError::Malformed { .. })));
    }

    #[test]
    fn test_memory_store_holds_one_document() {
        let mut store = MemoryStore::new("visitors");
        assert_eq!(store.read().unwrap(), None);

        store.write("first").unwrap();
        store.write("second").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("second"));

        let seeded = MemoryStore::with_document("blog", "{}");
        assert_eq!(seeded.name(), "blog");
        assert_eq!(seeded.read().unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_serialize_failure_is_not_malformed() {
        // JSON object keys must be strings
        let mut bad = std::collections::BTreeMap::new();
        bad.insert((1u8, 2u8), 3u8);

        let err = encode_document("visitors", &bad).unwrap_err();
        assert!(matches!(err, StoreError::Serialize { ref store, .. } if store == "visitors"));
        assert!(err.to_string().starts_with("failed to serialize document for store 'visitors'"));

        let log = VisitorLog::new();
        assert!(encode_document("visitors", &log).is_ok());
    }

    #[test]
    fn test_migrate_store() {
        let mut store = MemoryStore::with_document(
            "visitors",
            r#"{"count": 2, "visitors": ["0.0.0.1", "2814359591066391210"]}"#,
        );

        let report = migrate_store(&mut store).unwrap();
        assert_eq!(report.anonymized, 1);
        assert_eq!(report.kept, 1);

        let log = store.load().unwrap();
        assert_eq!(log.visitors[0].id, "48976403386189679274");
        assert_eq!(log.visitors[1].crystal, "");

        // Second pass is a no-op
        let report = migrate_store(&mut store).unwrap();
        assert!(!report.changed());
    }

    #[test]
    fn test_file_store_path() {
        let store = JsonFileStore::new("/var/lib/crystal", "visitors");
        assert_eq!(store.path(), Path::new("/var/lib/crystal/visitors.json"));
        assert_eq!(store.name(), "visitors");
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("crystal-id-store-{}", std::process::id()));
        let mut store = JsonFileStore::new(&dir, "round_trip");

        assert_eq!(store.read().unwrap(), None);
        record_visit(&mut store, "192.0.2.1").unwrap();

        let reopened = JsonFileStore::new(&dir, "round_trip");
        let log = reopened.load().unwrap();
        assert_eq!(log.count, 1);

        fs::remove_dir_all(&dir).unwrap();
    }
}

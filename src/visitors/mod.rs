//! Visitor Counter Collaborators
//!
//! Everything around the pipeline a visitor counter needs: the stored
//! document, its persistence, and the one-time migration of documents that
//! still hold raw addresses. Nothing here feeds back into the pipeline.

pub mod record;
pub mod migrate;
pub mod store;

pub use record::{VisitorLog, VisitorRecord};
pub use migrate::{migrate_entry, migrate_log, LegacyEntry, LegacyVisitorLog, MigrationReport};
pub use store::{
    migrate_store, record_visit, JsonFileStore, MemoryStore, StoreError, VisitOutcome, VisitorStore,
};

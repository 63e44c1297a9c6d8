//! The assay store seam.

use crate::fields::AssayFields;
use std::collections::HashMap;

/// Identifier match policy shared by stores and the facade cache:
/// whitespace-trimmed, case-insensitive.
pub fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

/// Lookup seam to the canonical assay dataset.
///
/// Absence of a record is a normal outcome, not an error. Implementations
/// may block (database, file, network); the library treats the call as
/// opaque and applies no timeout of its own, so callers that need one
/// wrap the lookup themselves.
pub trait AssayStore: Send + Sync {
    fn fetch_raw_record(&self, identifier: &str) -> Option<AssayFields>;
}

/// In-memory assay store backed by a `HashMap`.
///
/// Useful for tests and for embedding a fixed dataset; real deployments
/// put the canonical database behind [`AssayStore`] instead.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<String, AssayFields>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from a JSON array of assay field records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let records: Vec<AssayFields> = serde_json::from_str(json)?;
        let mut store = Self::new();
        for fields in records {
            store.insert(fields);
        }
        Ok(store)
    }

    /// Insert a record, replacing any previous record with the same
    /// normalized identifier.
    pub fn insert(&mut self, fields: AssayFields) {
        self.records
            .insert(normalize_identifier(&fields.identifier), fields);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl AssayStore for MemoryStore {
    fn fetch_raw_record(&self, identifier: &str) -> Option<AssayFields> {
        self.records.get(&normalize_identifier(identifier)).cloned()
    }
}

//! VersionStore - a [`VersionHistory`] bound to one key in a key-value backend
//!
//! Every transition that changes state (a successful save or a cursor move)
//! is written back as a self-describing record:
//!
//! ```json
//! { "schemaVersion": 1, "integrityHash": "<blake3 hex>", "history": { ... } }
//! ```
//!
//! The hash covers the serialized `history` value and is verified on load.

use serde::{Deserialize, Serialize};

use crate::error::{DraftscoreError, Result, ResultExt};
use crate::history::kv::KeyValueStore;
use crate::history::version::{SaveOutcome, VersionHistory, VersionView};

/// Schema version written into every persisted record
pub const HISTORY_SCHEMA_VERSION: u32 = 1;

/// Key prefix for persisted histories
pub const HISTORY_KEY_PREFIX: &str = "history:";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryRecord {
    schema_version: u32,
    integrity_hash: String,
    history: VersionHistory,
}

/// Backend key for a document identifier
pub fn history_key(identifier: &str) -> String {
    format!("{}{}", HISTORY_KEY_PREFIX, identifier)
}

fn integrity_hash(history: &VersionHistory) -> Result<String> {
    let json = serde_json::to_string(history)?;
    Ok(blake3::hash(json.as_bytes()).to_hex().to_string())
}

/// Open the version store for `identifier`, loading any persisted history
pub fn create_version_store<S: KeyValueStore>(
    identifier: impl Into<String>,
    backend: S,
) -> Result<VersionStore<S>> {
    VersionStore::open(identifier, backend)
}

/// Persisted undo/redo history for one document
#[derive(Debug)]
pub struct VersionStore<S: KeyValueStore> {
    identifier: String,
    key: String,
    backend: S,
    history: VersionHistory,
}

impl<S: KeyValueStore> VersionStore<S> {
    /// Load the history stored under `history:<identifier>`, or start empty
    pub fn open(identifier: impl Into<String>, backend: S) -> Result<Self> {
        let identifier = identifier.into();
        let key = history_key(&identifier);

        let history = match backend.get(&key)? {
            Some(raw) => Self::decode(&key, &raw)
                .with_context(|| format!("Loading version history '{}'", identifier))?,
            None => VersionHistory::new(),
        };

        tracing::debug!(
            identifier = %identifier,
            versions = history.len(),
            "version store opened"
        );

        Ok(Self {
            identifier,
            key,
            backend,
            history,
        })
    }

    fn decode(key: &str, raw: &str) -> Result<VersionHistory> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        let found = value
            .get("schemaVersion")
            .and_then(serde_json::Value::as_u64)
            .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
            .unwrap_or(0);
        if found != HISTORY_SCHEMA_VERSION {
            return Err(DraftscoreError::UnsupportedSchema {
                found,
                expected: HISTORY_SCHEMA_VERSION,
            });
        }

        let record: HistoryRecord = serde_json::from_value(value)?;
        let actual = integrity_hash(&record.history)?;
        if actual != record.integrity_hash {
            tracing::warn!(key = %key, "integrity hash mismatch on load");
            return Err(DraftscoreError::IntegrityViolation {
                key: key.to_string(),
                expected: record.integrity_hash,
                actual,
            });
        }

        record
            .history
            .check_invariants()
            .map_err(|reason| DraftscoreError::IntegrityViolation {
                key: key.to_string(),
                expected: "dense 1-based versions with an in-range cursor".to_string(),
                actual: reason,
            })?;

        Ok(record.history)
    }

    fn persist(&mut self, history: &VersionHistory) -> Result<()> {
        let record = HistoryRecord {
            schema_version: HISTORY_SCHEMA_VERSION,
            integrity_hash: integrity_hash(history)?,
            history: history.clone(),
        };
        let json = serde_json::to_string(&record)?;
        self.backend
            .put(&self.key, json)
            .with_context(|| format!("Persisting version history '{}'", self.identifier))
    }

    /// Apply a transition to a copy, persist it, then commit in memory.
    /// A failed write leaves the in-memory history untouched.
    fn transition<T>(
        &mut self,
        apply: impl FnOnce(&mut VersionHistory) -> T,
        changed: impl FnOnce(&T) -> bool,
    ) -> Result<T> {
        let mut next = self.history.clone();
        let result = apply(&mut next);
        if changed(&result) {
            self.persist(&next)?;
            self.history = next;
        }
        Ok(result)
    }

    /// Save a new version. Identical content is reported as skipped and not written.
    pub fn save_version(&mut self, content: impl Into<String>) -> Result<SaveOutcome> {
        let content = content.into();
        self.transition(|h| h.save(content), SaveOutcome::success)
    }

    /// Step back one version, `None` at the first version
    pub fn go_back(&mut self) -> Result<Option<VersionView>> {
        self.transition(VersionHistory::go_back, Option::is_some)
    }

    /// Step forward one version, `None` at the tip
    pub fn go_forward(&mut self) -> Result<Option<VersionView>> {
        self.transition(VersionHistory::go_forward, Option::is_some)
    }

    pub fn get_current_version(&self) -> Option<VersionView> {
        self.history.current()
    }

    /// Content of the current version
    pub fn load_draft(&self) -> Option<&str> {
        self.history.draft()
    }

    pub fn history(&self) -> &VersionHistory {
        &self.history
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn into_backend(self) -> S {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::kv::MemoryStore;
    use crate::history::version::SkipReason;

    #[test]
    fn test_new_store_is_empty() {
        let store = create_version_store("alpha", MemoryStore::new()).unwrap();
        assert_eq!(store.identifier(), "alpha");
        assert_eq!(store.get_current_version(), None);
        assert_eq!(store.load_draft(), None);
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_save_roundtrip() {
        let mut store = create_version_store("alpha", MemoryStore::new()).unwrap();
        let outcome = store.save_version("# Problem\nSlow invoices").unwrap();
        let view = store.get_current_version().unwrap();
        assert_eq!(Some(view.version_number), outcome.version_number());
        assert_eq!(view.content, "# Problem\nSlow invoices");
        assert_eq!(store.load_draft(), Some("# Problem\nSlow invoices"));
    }

    #[test]
    fn test_reload_restores_cursor() {
        let mut store = create_version_store("alpha", MemoryStore::new()).unwrap();
        store.save_version("v1").unwrap();
        store.save_version("v2").unwrap();
        store.save_version("v3").unwrap();
        store.go_back().unwrap();

        let backend = store.into_backend();
        let store = create_version_store("alpha", backend).unwrap();
        let view = store.get_current_version().unwrap();
        assert_eq!(view.content, "v2");
        assert_eq!(view.total_versions, 3);
        assert!(view.can_go_forward);
    }

    #[test]
    fn test_identifiers_are_isolated() {
        let mut store = create_version_store("alpha", MemoryStore::new()).unwrap();
        store.save_version("alpha draft").unwrap();

        let store = create_version_store("beta", store.into_backend()).unwrap();
        assert_eq!(store.load_draft(), None);
        assert_eq!(store.backend().len(), 1);
    }

    #[test]
    fn test_no_op_transitions_do_not_write() {
        let mut store = create_version_store("alpha", MemoryStore::new()).unwrap();
        assert_eq!(store.go_back().unwrap(), None);
        assert_eq!(store.go_forward().unwrap(), None);
        assert!(store.backend().is_empty());

        store.save_version("same").unwrap();
        let before = store.backend().get(&history_key("alpha")).unwrap();
        let outcome = store.save_version("same").unwrap();
        assert_eq!(outcome.reason(), Some(SkipReason::NoChange));
        assert_eq!(store.backend().get(&history_key("alpha")).unwrap(), before);
    }

    #[test]
    fn test_tampered_record_is_rejected() {
        let mut store = create_version_store("alpha", MemoryStore::new()).unwrap();
        store.save_version("original").unwrap();
        let mut backend = store.into_backend();

        let key = history_key("alpha");
        let raw = backend.get(&key).unwrap().unwrap();
        backend.put(&key, raw.replace("original", "tampered")).unwrap();

        let err = create_version_store("alpha", backend).unwrap_err();
        assert!(err.to_string().contains("Integrity violation"));
    }

    #[test]
    fn test_unknown_schema_is_rejected() {
        let mut backend = MemoryStore::new();
        backend
            .put(
                &history_key("alpha"),
                r#"{"schemaVersion":9,"integrityHash":"","history":{}}"#.to_string(),
            )
            .unwrap();

        let err = create_version_store("alpha", backend).unwrap_err();
        assert!(err.to_string().contains("Unsupported schema version 9"));
    }

    #[test]
    fn test_broken_invariants_are_rejected() {
        let history: VersionHistory = serde_json::from_value(serde_json::json!({
            "entries": [
                {"sequenceNumber": 1, "content": "a", "savedAt": "2024-01-01T00:00:00Z"},
                {"sequenceNumber": 5, "content": "b", "savedAt": "2024-01-01T00:00:00Z"}
            ],
            "cursor": 1
        }))
        .unwrap();
        let record = HistoryRecord {
            schema_version: HISTORY_SCHEMA_VERSION,
            integrity_hash: integrity_hash(&history).unwrap(),
            history,
        };

        let mut backend = MemoryStore::new();
        backend
            .put(&history_key("alpha"), serde_json::to_string(&record).unwrap())
            .unwrap();

        let err = create_version_store("alpha", backend).unwrap_err();
        assert!(err.to_string().contains("sequence number 5"));
    }
}

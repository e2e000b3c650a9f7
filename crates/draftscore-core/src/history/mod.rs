//! Version History
//!
//! Linear undo/redo for document drafts with destructive branch discard.
//!
//! - [`VersionHistory`]: the pure state machine (save, back, forward)
//! - [`KeyValueStore`]: the persistence seam, with [`MemoryStore`] and [`SqliteStore`]
//! - [`VersionStore`]: a history bound to one document identifier in a backend
//!
//! ```
//! use draftscore_core::history::{create_version_store, MemoryStore};
//!
//! let mut store = create_version_store("proposal-7", MemoryStore::new()).unwrap();
//! store.save_version("v1").unwrap();
//! store.save_version("v2").unwrap();
//! assert_eq!(store.go_back().unwrap().unwrap().content, "v1");
//! assert_eq!(store.load_draft(), Some("v1"));
//! ```

pub mod kv;
pub mod sqlite;
pub mod store;
pub mod version;

pub use kv::{KeyValueStore, MemoryStore};
pub use sqlite::{KeyInfo, SqliteStore};
pub use store::{
    create_version_store, history_key, VersionStore, HISTORY_KEY_PREFIX, HISTORY_SCHEMA_VERSION,
};
pub use version::{SaveOutcome, SkipReason, VersionEntry, VersionHistory, VersionView};

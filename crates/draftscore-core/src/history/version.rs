//! Branch-truncating version history
//!
//! A linear undo/redo list of document snapshots with a cursor. Saving at the
//! tip appends. Saving after rewinding takes the place of the entry at the
//! cursor and discards everything from there on: the old future is gone, not
//! forked. Sequence numbers always equal `position + 1`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionEntry {
    pub sequence_number: u32,
    pub content: String,
    pub saved_at: DateTime<Utc>,
}

/// Why a save wrote nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Content identical to the entry at the cursor
    #[serde(rename = "no-change")]
    NoChange,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoChange => "no-change",
        }
    }
}

/// Result of [`VersionHistory::save`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum SaveOutcome {
    #[serde(rename_all = "camelCase")]
    Saved {
        version_number: u32,
        total_versions: u32,
        /// Entries replaced or dropped by this save, counting the rewound entry itself
        discarded: u32,
    },
    Skipped { reason: SkipReason },
}

impl SaveOutcome {
    /// Whether a new entry was written
    pub fn success(&self) -> bool {
        matches!(self, SaveOutcome::Saved { .. })
    }

    pub fn version_number(&self) -> Option<u32> {
        match self {
            SaveOutcome::Saved { version_number, .. } => Some(*version_number),
            SaveOutcome::Skipped { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<SkipReason> {
        match self {
            SaveOutcome::Saved { .. } => None,
            SaveOutcome::Skipped { reason } => Some(*reason),
        }
    }
}

/// The entry at the cursor plus navigation flags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionView {
    pub content: String,
    pub version_number: u32,
    pub total_versions: u32,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Ordered snapshots and the current position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionHistory {
    entries: Vec<VersionEntry>,
    cursor: Option<usize>,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[VersionEntry] {
        &self.entries
    }

    /// Index of the current entry, `None` when empty
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// Save `content` as a new version.
    ///
    /// Identical content to the entry at the cursor is a no-op. At the tip the
    /// entry is appended. From a rewound cursor the history is truncated at
    /// the cursor, so the new entry takes the cursor's sequence number and the
    /// redo entries are destroyed.
    pub fn save(&mut self, content: impl Into<String>) -> SaveOutcome {
        let content = content.into();

        let next_index = match self.cursor {
            None => 0,
            Some(cursor) => {
                if self.entries.get(cursor).map_or(false, |e| e.content == content) {
                    return SaveOutcome::Skipped {
                        reason: SkipReason::NoChange,
                    };
                }
                if cursor + 1 == self.entries.len() {
                    cursor + 1
                } else {
                    cursor
                }
            }
        };

        let discarded = self.entries.len().saturating_sub(next_index);
        if discarded > 0 {
            tracing::info!(
                discarded,
                from_version = next_index + 1,
                "discarding redo history on save"
            );
        }
        self.entries.truncate(next_index);

        let sequence_number = to_u32(next_index + 1);
        self.entries.push(VersionEntry {
            sequence_number,
            content,
            saved_at: Utc::now(),
        });
        self.cursor = Some(next_index);

        tracing::debug!(version = sequence_number, total = self.entries.len(), "version saved");

        SaveOutcome::Saved {
            version_number: sequence_number,
            total_versions: to_u32(self.entries.len()),
            discarded: to_u32(discarded),
        }
    }

    /// Step back one version. `None` at the first version or when empty.
    pub fn go_back(&mut self) -> Option<VersionView> {
        let cursor = self.cursor?;
        if cursor == 0 {
            return None;
        }
        self.cursor = Some(cursor - 1);
        tracing::debug!(version = cursor, "moved back");
        self.current()
    }

    /// Step forward one version. `None` at the tip or when empty.
    pub fn go_forward(&mut self) -> Option<VersionView> {
        let cursor = self.cursor?;
        if cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor = Some(cursor + 1);
        tracing::debug!(version = cursor + 2, "moved forward");
        self.current()
    }

    /// View of the entry at the cursor
    pub fn current(&self) -> Option<VersionView> {
        let cursor = self.cursor?;
        let entry = self.entries.get(cursor)?;
        Some(VersionView {
            content: entry.content.clone(),
            version_number: entry.sequence_number,
            total_versions: to_u32(self.entries.len()),
            can_go_back: cursor > 0,
            can_go_forward: cursor + 1 < self.entries.len(),
        })
    }

    /// Content of the entry at the cursor
    pub fn draft(&self) -> Option<&str> {
        self.cursor
            .and_then(|c| self.entries.get(c))
            .map(|e| e.content.as_str())
    }

    /// Check the structural invariants; used when loading persisted state
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        match (self.cursor, self.entries.is_empty()) {
            (None, true) => {}
            (None, false) => return Err("non-empty history without a cursor".to_string()),
            (Some(c), true) => return Err(format!("cursor {} in an empty history", c)),
            (Some(c), false) if c >= self.entries.len() => {
                return Err(format!(
                    "cursor {} out of range for {} entries",
                    c,
                    self.entries.len()
                ))
            }
            (Some(_), false) => {}
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.sequence_number != to_u32(index + 1) {
                return Err(format!(
                    "entry at position {} has sequence number {}",
                    index, entry.sequence_number
                ));
            }
        }
        Ok(())
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

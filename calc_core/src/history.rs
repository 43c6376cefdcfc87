//! # Calculation History
//!
//! The `History` struct is the root container persisted between sessions.
//! It serializes to a JSON file (see [`crate::file_io`]).
//!
//! ## Structure
//!
//! ```text
//! History
//! ├── meta: HistoryMetadata (schema version, timestamps)
//! ├── settings: CalculatorSettings (separator, cap, division view)
//! └── entries: Vec<HistoryEntry> (newest first, keyed by input text)
//! ```
//!
//! Only the rendered output is stored, never the structured result.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::history::{History, HistoryEntry, Recorded};
//!
//! let mut history = History::new();
//! let outcome = history.record(HistoryEntry::new("2+2", "4", "  2\n+ 2\n---\n  4"));
//! assert!(matches!(outcome, Recorded::Inserted { .. }));
//!
//! // Same input again: the entry moves to the front instead of duplicating
//! let outcome = history.record(HistoryEntry::new("2+2", "4", "..."));
//! assert!(matches!(outcome, Recorded::Duplicate { previous_index: 0, .. }));
//! assert_eq!(history.len(), 1);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::settings::CalculatorSettings;

/// Current schema version for history files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root history container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History {
    /// Schema version and timestamps
    pub meta: HistoryMetadata,

    /// Calculator settings saved alongside the entries
    #[serde(default)]
    pub settings: CalculatorSettings,

    /// Newest first
    pub entries: Vec<HistoryEntry>,
}

/// History file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the history file was created
    pub created: DateTime<Utc>,

    /// When an entry was last added or removed
    pub modified: DateTime<Utc>,
}

/// One remembered calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,

    /// Display text that produced the calculation; the lookup key
    pub input: String,

    /// One-line answer shown in the history list
    pub result: String,

    /// Full rendered layout, replayed when the entry is opened
    pub rendered_output: String,

    pub created: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(input: impl Into<String>, result: impl Into<String>, rendered_output: impl Into<String>) -> Self {
        HistoryEntry {
            id: Uuid::new_v4(),
            input: input.into(),
            result: result.into(),
            rendered_output: rendered_output.into(),
            created: Utc::now(),
        }
    }
}

/// What [`History::record`] did with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// A new input, now at the front
    Inserted { id: Uuid },
    /// The input was already known; its entry moved to the front and
    /// took the new output
    Duplicate { id: Uuid, previous_index: usize },
}

impl History {
    /// Create an empty history with default settings.
    pub fn new() -> Self {
        History::with_settings(CalculatorSettings::default())
    }

    /// Create an empty history with the given settings.
    pub fn with_settings(settings: CalculatorSettings) -> Self {
        let now = Utc::now();
        History {
            meta: HistoryMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            settings,
            entries: Vec::new(),
        }
    }

    /// Remember a calculation, keyed by exact input text.
    ///
    /// The list is trimmed to `settings.history_limit`, dropping the
    /// oldest entries.
    pub fn record(&mut self, entry: HistoryEntry) -> Recorded {
        let outcome = match self.entries.iter().position(|e| e.input == entry.input) {
            Some(previous_index) => {
                let mut existing = self.entries.remove(previous_index);
                existing.result = entry.result;
                existing.rendered_output = entry.rendered_output;
                existing.created = entry.created;
                let id = existing.id;
                self.entries.insert(0, existing);
                tracing::debug!(input = %self.entries[0].input, previous_index, "history duplicate");
                Recorded::Duplicate { id, previous_index }
            }
            None => {
                let id = entry.id;
                self.entries.insert(0, entry);
                Recorded::Inserted { id }
            }
        };

        self.entries.truncate(self.settings.history_limit.max(1));
        self.touch();
        outcome
    }

    /// Look up an entry by its input text.
    pub fn find(&self, input: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.input == input)
    }

    /// Get an entry by id.
    pub fn get(&self, id: &Uuid) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.touch();
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for History {
    fn default() -> Self {
        History::new()
    }
}

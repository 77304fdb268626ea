//! JSON file-based session persistence.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) so a
//! crash mid-save leaves the previous session intact, and so every field of one
//! save becomes visible at the same time.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - the whole file is loaded once on open
//! - **Write**: O(n) - every save rewrites the document
//! - **Best for**: one or a few namespaces, a save per fetched page

use crate::domain::error::{Result, SearchError};
use crate::domain::{ResultItem, SessionState};
use crate::storage::backend::SessionPersistence;
use crate::storage::models::SessionRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk. Sessions are keyed by
/// namespace so several independent search screens can share one file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// Saved cursors, keyed by namespace.
    #[serde(default)]
    sessions: HashMap<String, SessionRecord>,

    /// Archived results, keyed by namespace.
    #[serde(default)]
    results: HashMap<String, Vec<ResultItem>>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            sessions: HashMap::new(),
            results: HashMap::new(),
        }
    }
}

/// JSON file session store.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. It is owned by the search session and
/// only ever touched from the session's controlling context.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "sessions": {
///     "picture_search": {
///       "search_term": "cats",
///       "next_start_index": 11,
///       "has_more": true,
///       "updated_at": 1700000000
///     }
///   },
///   "results": {
///     "picture_search": [
///       { "title": "Tabby", "image_url": "https://example.com/tabby.jpg" }
///     ]
///   }
/// }
/// ```
pub struct JsonSessionStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// Key under which this store's session lives.
    namespace: String,

    /// Whether accumulated results are archived alongside the cursor.
    archive_results: bool,

    /// In-memory copy of the document, loaded on creation.
    data: StorageData,
}

impl JsonSessionStore {
    /// Creates or opens a JSON session store.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; nothing
    /// is written until the first save. Parent directories are created
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use picsearch::storage::JsonSessionStore;
    /// use std::path::PathBuf;
    ///
    /// let store = JsonSessionStore::open(PathBuf::from("/tmp/picsearch/session.json"), "picture_search")?;
    /// # Ok::<(), picsearch::SearchError>(())
    /// ```
    pub fn open(file_path: PathBuf, namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        tracing::debug!(path = ?file_path, namespace = %namespace, "opening JSON session store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no session file yet, starting empty");
            StorageData::default()
        };

        Ok(Self {
            file_path,
            namespace,
            archive_results: false,
            data,
        })
    }

    /// Enables or disables archiving of accumulated results.
    #[must_use]
    pub const fn with_result_archive(mut self, enabled: bool) -> Self {
        self.archive_results = enabled;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid JSON, or
    /// was written by a newer format version.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| SearchError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version > STORAGE_VERSION {
            return Err(SearchError::Storage(format!(
                "unsupported session file version {} (expected <= {STORAGE_VERSION})",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            sessions = data.sessions.len(),
            archived_namespaces = data.results.len(),
            "loaded session data"
        );

        Ok(data)
    }

    /// Writes the whole document using an atomic temp-file + rename.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, the temporary file cannot be
    /// written, or the rename fails.
    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| SearchError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "session data saved");
        Ok(())
    }
}

/// Puts `previous` back under `key`, or removes the key if there was none.
fn restore<V>(map: &mut HashMap<String, V>, key: &str, previous: Option<V>) {
    match previous {
        Some(value) => {
            map.insert(key.to_string(), value);
        }
        None => {
            map.remove(key);
        }
    }
}

impl SessionPersistence for JsonSessionStore {
    fn save(&mut self, state: &SessionState) -> Result<()> {
        self.save_session(state, None)
    }

    fn load(&self) -> Result<Option<SessionState>> {
        let state = self
            .data
            .sessions
            .get(&self.namespace)
            .map(SessionRecord::to_state);

        tracing::debug!(namespace = %self.namespace, found = state.is_some(), "session lookup complete");
        Ok(state)
    }

    fn archives_results(&self) -> bool {
        self.archive_results
    }

    fn save_session(&mut self, state: &SessionState, results: Option<&[ResultItem]>) -> Result<()> {
        let results = results.filter(|_| self.archive_results);
        let _span = tracing::debug_span!("json_save_session",
            namespace = %self.namespace,
            next_start_index = state.next_start_index,
            has_more = state.has_more,
            archived = results.map(<[ResultItem]>::len)
        )
        .entered();

        let previous_record = self
            .data
            .sessions
            .insert(self.namespace.clone(), SessionRecord::from_state(state));

        let previous_results = results.map(|items| {
            if items.is_empty() {
                self.data.results.remove(&self.namespace)
            } else {
                self.data
                    .results
                    .insert(self.namespace.clone(), items.to_vec())
            }
        });

        if let Err(e) = self.save_to_file() {
            restore(&mut self.data.sessions, &self.namespace, previous_record);
            if let Some(previous) = previous_results {
                restore(&mut self.data.results, &self.namespace, previous);
            }
            return Err(e);
        }
        Ok(())
    }

    fn load_results(&self) -> Result<Vec<ResultItem>> {
        if !self.archive_results {
            return Ok(Vec::new());
        }
        Ok(self
            .data
            .results
            .get(&self.namespace)
            .cloned()
            .unwrap_or_default())
    }
}

impl std::fmt::Debug for JsonSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonSessionStore")
            .field("file_path", &self.file_path)
            .field("namespace", &self.namespace)
            .field("archive_results", &self.archive_results)
            .finish_non_exhaustive()
    }
}

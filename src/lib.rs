//! picsearch: a paginated image search client with resumable sessions.
//!
//! picsearch issues keyword image searches against a remote search API,
//! accumulates results page by page, and remembers where pagination stopped so
//! a restarted process can continue the same search.
//!
//! - Chunked pagination with a 1-based start index and "has more" detection
//! - At most one fetch in flight; responses from abandoned searches are dropped
//! - Session cursor persisted to a versioned JSON file with atomic writes
//! - Optional archive of received results so resume works across restarts

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal front-end (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Command/completion handling                      │
//! │  - Action dispatching                               │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session (session/)                                 │  ← State machine
//! │  - Cursor, phase, generation fencing                │
//! │  - Observer notifications                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Result store  │   │ Storage Layer │   │ Worker Layer  │
//! │ (store/)      │   │ (storage/)    │   │ (worker/)     │
//! │ - Append-only │   │ - JSON I/O    │   │ - tokio tasks │
//! │ - Read handle │   │ - Archive     │   │ - Client API  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Domain & Observability             │
//! │  - Paths and env overlay (infrastructure/)          │
//! │  - Items, pages, errors (domain/)                   │
//! │  - JSON log file (observability/)                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Event/action model and the async controller
//! - [`client`]: Remote search client trait and HTTP implementation
//! - [`domain`]: Core types (results, session state, errors)
//! - [`infrastructure`]: Data directory resolution and environment overlay
//! - [`session`]: The search session state machine and observer trait
//! - [`storage`]: Session persistence backends
//! - [`store`]: Shared result list
//! - [`worker`]: Background fetch execution
//! - [`observability`]: Structured file logging
//!
//! # Configuration
//!
//! ```toml
//! # $PICSEARCH_CONFIG
//! api_key = "..."
//! search_engine_id = "..."
//! chunk_size = 10
//! request_timeout_secs = 15
//! persist_results = true
//! trace_level = "debug"
//! ```
//!
//! Every key can be overridden with a `PICSEARCH_*` environment variable, see
//! [`Config::apply_overrides`].
//!
//! # Initialization Flow
//!
//! 1. Validate the configuration
//! 2. Build the HTTP client
//! 3. Open the JSON session file in the data directory
//! 4. Restore archived results into the store (when enabled)
//! 5. Build the session, which resumes the persisted cursor if results exist
//! 6. Wrap it in a [`SearchController`]

pub mod app;
pub mod client;
pub mod domain;
pub mod infrastructure;
pub mod session;
pub mod storage;
pub mod store;
pub mod worker;

pub mod observability;

pub use app::{handle_event, Action, Command, Event, SearchController};
pub use domain::{Result, ResultItem, ResultPage, SearchError, SessionState};
pub use session::{SearchSession, SessionObserver, SessionPhase, CHUNK_SIZE};

use client::{HttpSearchClient, SearchClient};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use storage::{JsonSessionStore, SessionPersistence};
use store::ResultStore;

/// Runtime configuration.
///
/// Loaded from defaults, then an optional TOML file, then `PICSEARCH_*`
/// environment overrides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API key sent with every search request.
    pub api_key: String,

    /// Identifier of the search engine scope (the `cx` parameter).
    pub search_engine_id: String,

    /// Scheme and host of the search API. Default: `https://www.googleapis.com`
    pub base_url: String,

    /// Results requested per page. Default: 10
    pub chunk_size: usize,

    /// Per-request timeout in seconds. Default: 15
    pub request_timeout_secs: u64,

    /// Overrides the data directory. `~` is expanded.
    pub data_dir: Option<String>,

    /// Key the session is stored under. Default: `"picture_search"`
    pub namespace: String,

    /// Also archive received results so a restart can resume. Default: false
    pub persist_results: bool,

    /// Log level filter when `RUST_LOG` is unset. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            search_engine_id: String::new(),
            base_url: "https://www.googleapis.com".to_string(),
            chunk_size: CHUNK_SIZE,
            request_timeout_secs: 15,
            data_dir: None,
            namespace: "picture_search".to_string(),
            persist_results: false,
            trace_level: None,
        }
    }
}

impl Config {
    /// Reads a TOML configuration file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Io`] if the file cannot be read and
    /// [`SearchError::Config`] if it is not valid TOML for this structure.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| SearchError::Config(format!("invalid config file {}: {e}", path.display())))
    }

    /// Applies key/value overrides on top of the current values.
    ///
    /// Keys are the `PICSEARCH_*` variable names without the prefix:
    /// `API_KEY`, `CX`, `BASE_URL`, `CHUNK_SIZE`, `TIMEOUT_SECS`, `DATA_DIR`,
    /// `NAMESPACE`, `PERSIST_RESULTS`, `TRACE_LEVEL`. Unknown keys are ignored.
    /// Values that fail to parse keep the previous setting.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use picsearch::Config;
    ///
    /// let mut overrides = BTreeMap::new();
    /// overrides.insert("CX".to_string(), "engine-1".to_string());
    /// overrides.insert("CHUNK_SIZE".to_string(), "five".to_string());
    ///
    /// let config = Config::default().apply_overrides(&overrides);
    /// assert_eq!(config.search_engine_id, "engine-1");
    /// assert_eq!(config.chunk_size, 10);
    /// ```
    #[must_use]
    pub fn apply_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, value) in overrides {
            match key.as_str() {
                "API_KEY" => self.api_key.clone_from(value),
                "CX" => self.search_engine_id.clone_from(value),
                "BASE_URL" => self.base_url.clone_from(value),
                "CHUNK_SIZE" => self.chunk_size = parse_or_keep(key, value, self.chunk_size),
                "TIMEOUT_SECS" => {
                    self.request_timeout_secs = parse_or_keep(key, value, self.request_timeout_secs);
                }
                "DATA_DIR" => self.data_dir = Some(value.clone()),
                "NAMESPACE" => self.namespace.clone_from(value),
                "PERSIST_RESULTS" => {
                    self.persist_results = parse_or_keep(key, value, self.persist_results);
                }
                "TRACE_LEVEL" => self.trace_level = Some(value.clone()),
                _ => tracing::trace!(key = %key, "ignoring unknown override"),
            }
        }
        self
    }

    /// Checks the settings a search needs.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] when the API key or engine id is empty,
    /// or the chunk size or timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(SearchError::Config("api_key is not set (PICSEARCH_API_KEY)".to_string()));
        }
        if self.search_engine_id.trim().is_empty() {
            return Err(SearchError::Config(
                "search_engine_id is not set (PICSEARCH_CX)".to_string(),
            ));
        }
        if self.chunk_size == 0 {
            return Err(SearchError::Config("chunk_size must be at least 1".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(SearchError::Config(
                "request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_or_keep<T: std::str::FromStr + Copy>(key: &str, value: &str, current: T) -> T {
    value.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(key = %key, value = %value, "unparseable override, keeping previous value");
        current
    })
}

/// Builds a ready-to-run controller from configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the HTTP client cannot be
/// built, or the session file cannot be opened.
pub fn initialize(config: &Config) -> Result<SearchController> {
    tracing::debug!("initializing picsearch");

    config.validate()?;
    let client = HttpSearchClient::new(config)?;
    build_controller(config, Arc::new(client))
}

/// Wires the store, persistence and session around an existing client.
///
/// Archived results, when enabled, are restored into the store before the
/// session is built so the resume rule sees them.
///
/// # Errors
///
/// Returns an error if the session file cannot be opened or read.
pub fn build_controller(config: &Config, client: Arc<dyn SearchClient>) -> Result<SearchController> {
    let path = infrastructure::session_file(config);
    let persistence = JsonSessionStore::open(path, config.namespace.clone())?
        .with_result_archive(config.persist_results);

    let restored = persistence.load_results()?;
    tracing::debug!(restored = restored.len(), "restoring archived results");
    let store = Arc::new(ResultStore::with_items(restored));

    let session = SearchSession::new(store, Box::new(persistence), config.chunk_size)?;
    tracing::debug!(phase = ?session.phase(), resumed = session.state().is_some(), "session ready");

    Ok(SearchController::new(session, client))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Config {
        Config {
            api_key: "key".to_string(),
            search_engine_id: "cx".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.chunk_size, 10);
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.namespace, "picture_search");
        assert!(!config.persist_results);
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config: Config = toml::from_str(
            r#"
            api_key = "k"
            search_engine_id = "e"
            persist_results = true
            "#,
        )
        .unwrap();
        assert_eq!(config.api_key, "k");
        assert!(config.persist_results);
        assert_eq!(config.base_url, "https://www.googleapis.com");
    }

    #[test]
    fn from_file_reports_bad_toml() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "chunk_size = \"ten\"").unwrap();
        assert!(matches!(Config::from_file(&path), Err(SearchError::Config(_))));
    }

    #[test]
    fn overrides_apply_and_bad_numbers_are_kept() {
        let overrides: BTreeMap<String, String> = [
            ("API_KEY", "env-key"),
            ("TIMEOUT_SECS", "soon"),
            ("CHUNK_SIZE", "5"),
            ("PERSIST_RESULTS", "true"),
            ("DATA_DIR", "~/pics"),
            ("UNRELATED", "x"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = valid().apply_overrides(&overrides);
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.request_timeout_secs, 15);
        assert_eq!(config.chunk_size, 5);
        assert!(config.persist_results);
        assert_eq!(config.data_dir.as_deref(), Some("~/pics"));
    }

    #[test]
    fn validate_rejects_missing_credentials_and_zeroes() {
        assert!(valid().validate().is_ok());
        assert!(Config::default().validate().is_err());
        assert!(Config { search_engine_id: String::new(), ..valid() }.validate().is_err());
        assert!(Config { chunk_size: 0, ..valid() }.validate().is_err());
        assert!(Config { request_timeout_secs: 0, ..valid() }.validate().is_err());
    }

    #[test]
    fn oversized_chunk_is_left_to_the_server() {
        assert!(Config { chunk_size: 50, ..valid() }.validate().is_ok());
    }
}

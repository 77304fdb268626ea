//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where picsearch keeps its session file and logs, and reads the
//! `PICSEARCH_*` environment overlay.

pub mod paths;

pub use paths::{data_dir, expand_tilde, log_file, session_file};

use std::collections::BTreeMap;

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "PICSEARCH_";

/// Collects `PICSEARCH_*` variables with the prefix stripped.
///
/// The result feeds [`crate::Config::apply_overrides`]. Variables that are not
/// valid UTF-8 are skipped.
#[must_use]
pub fn env_overrides() -> BTreeMap<String, String> {
    std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|name| (name.to_string(), value))
        })
        .collect()
}

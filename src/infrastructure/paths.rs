//! Path resolution for picsearch storage.
//!
//! Everything picsearch writes lives in one data directory: the session file
//! `session.json` and the log file `picsearch.log`. The directory comes from
//! [`Config::data_dir`] when set, otherwise from the platform data directory.

use crate::Config;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "picsearch";
const SESSION_FILE: &str = "session.json";
const LOG_FILE: &str = "picsearch.log";

/// Returns the directory picsearch stores its files in.
///
/// Resolution order:
/// 1. `config.data_dir`, with a leading `~` expanded
/// 2. `<platform data dir>/picsearch` (e.g. `~/.local/share/picsearch`)
/// 3. `./.picsearch` when no platform directory is known
///
/// The directory is not created here; the storage layer creates it on open.
#[must_use]
pub fn data_dir(config: &Config) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return expand_tilde(dir);
    }

    dirs::data_dir().map_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR}")), |dir| dir.join(APP_DIR))
}

/// Path of the JSON session file.
#[must_use]
pub fn session_file(config: &Config) -> PathBuf {
    data_dir(config).join(SESSION_FILE)
}

/// Path of the JSON log file.
#[must_use]
pub fn log_file(config: &Config) -> PathBuf {
    data_dir(config).join(LOG_FILE)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and every path when no home directory is
/// known, are returned unchanged.
///
/// # Examples
///
/// ```
/// use picsearch::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_in(path, dirs::home_dir().as_deref())
}

fn expand_tilde_in(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home.to_path_buf()
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_against_home() {
        let home = Path::new("/home/alice");
        assert_eq!(expand_tilde_in("~", Some(home)), PathBuf::from("/home/alice"));
        assert_eq!(
            expand_tilde_in("~/pics/data", Some(home)),
            PathBuf::from("/home/alice/pics/data")
        );
    }

    #[test]
    fn other_paths_are_untouched() {
        let home = Path::new("/home/alice");
        assert_eq!(expand_tilde_in("/var/lib/x", Some(home)), PathBuf::from("/var/lib/x"));
        assert_eq!(expand_tilde_in("~bob/x", Some(home)), PathBuf::from("~bob/x"));
        assert_eq!(expand_tilde_in("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn configured_dir_wins() {
        let config = Config {
            data_dir: Some("/tmp/picsearch-test".to_string()),
            ..Config::default()
        };
        assert_eq!(data_dir(&config), PathBuf::from("/tmp/picsearch-test"));
        assert_eq!(
            session_file(&config),
            PathBuf::from("/tmp/picsearch-test/session.json")
        );
        assert_eq!(log_file(&config), PathBuf::from("/tmp/picsearch-test/picsearch.log"));
    }
}

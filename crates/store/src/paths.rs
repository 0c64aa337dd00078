//! Data directory and file path resolution.
//!
//! Resolution order: `SIMFUT_DATA_DIR` env override, then the platform's
//! per-user data directory (`%LOCALAPPDATA%` on Windows, XDG data home on
//! Unix), always ending in a `Simfut` directory.

use std::env;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "SIMFUT_DATA_DIR";
pub const DATA_DIR_NAME: &str = "Simfut";
pub const DB_FILE_NAME: &str = "simfut_db.json";

#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(dir) = env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if cfg!(windows) {
        if let Some(local) = env::var_os("LOCALAPPDATA") {
            return PathBuf::from(local).join(DATA_DIR_NAME);
        }
    }

    if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        return PathBuf::from(xdg).join(DATA_DIR_NAME);
    }

    if let Some(home) = env::var_os("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join(DATA_DIR_NAME);
    }

    // Last resort: current directory.
    PathBuf::from(".").join(DATA_DIR_NAME)
}

#[must_use]
pub fn db_path() -> PathBuf {
    data_dir().join(DB_FILE_NAME)
}

/// Chat transcript sibling of the database file (`<stem>.chat.log`).
#[must_use]
pub fn chat_log_path(db_path: &Path) -> PathBuf {
    let stem = db_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("simfut_db");
    db_path.with_file_name(format!("{stem}.chat.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chat_log_sits_next_to_db() {
        let db = Path::new("/tmp/simfut/simfut_db.json");
        assert_eq!(
            chat_log_path(db),
            PathBuf::from("/tmp/simfut/simfut_db.chat.log")
        );
    }

    #[test]
    fn env_override_wins() {
        env::set_var(DATA_DIR_ENV, "/custom/simfut-data");
        assert_eq!(data_dir(), PathBuf::from("/custom/simfut-data"));
        env::remove_var(DATA_DIR_ENV);
    }
}

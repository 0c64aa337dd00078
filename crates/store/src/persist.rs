use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{Result, StoreError};
use crate::types::{AnswerStore, DEFAULT_CREATION_DATE};

/// Load the database, failing on IO or parse errors.
///
/// A missing `meta.creation_date` is filled with the default so older files
/// stay usable.
pub fn load(path: &Path) -> Result<AnswerStore> {
    let bytes = fs::read(path)?;
    let mut store: AnswerStore = serde_json::from_slice(&bytes)?;
    if store.meta.creation_date.is_none() {
        store.meta.creation_date = Some(DEFAULT_CREATION_DATE.to_string());
    }
    Ok(store)
}

/// Load the database, degrading to an empty default on any failure.
///
/// Selection must keep working over partial data; an unreadable or corrupt
/// file is logged and replaced by the in-memory default.
#[must_use]
pub fn load_or_default(path: &Path) -> AnswerStore {
    match load(path) {
        Ok(store) => store,
        Err(err) => {
            log::warn!("Cannot load database {}: {err}", path.display());
            AnswerStore::with_default_meta()
        }
    }
}

/// Write the database as pretty JSON, creating parent directories.
pub fn save(store: &AnswerStore, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load the database, creating a fresh one on first run.
pub fn ensure(path: &Path) -> Result<AnswerStore> {
    if !path.exists() {
        let store = AnswerStore::with_default_meta();
        save(&store, path)?;
        return Ok(store);
    }
    Ok(load_or_default(path))
}

/// Copy the database to a timestamped sibling file.
///
/// Returns `None` when there is nothing to back up yet.
pub fn backup(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("simfut_db.json");
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let backup_path = path.with_file_name(format!("{file_name}.backup.{ts}.json"));
    fs::copy(path, &backup_path)?;
    Ok(Some(backup_path))
}

/// Replace the active database with the contents of `from`.
///
/// The candidate file must carry an entry list; arbitrary JSON is rejected
/// instead of silently emptying the database.
pub fn restore(from: &Path, to: &Path) -> Result<AnswerStore> {
    let bytes = fs::read(from)?;
    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    if !value.get("suallar").is_some_and(|v| v.is_array()) {
        return Err(StoreError::InvalidStore(from.to_path_buf()));
    }
    let mut store: AnswerStore = serde_json::from_value(value)?;
    if store.meta.creation_date.is_none() {
        store.meta.creation_date = Some(DEFAULT_CREATION_DATE.to_string());
    }
    save(&store, to)?;
    Ok(store)
}

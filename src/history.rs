//! History Store
//!
//! Persists the words issued on previous runs as a flat JSON array of strings,
//! oldest first. Loading fails soft; saving merges, caps, and rewrites the
//! whole file through a temp file + rename so a reader never sees a torn write.

use crate::error::StorageError;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Default retention cap for the history file.
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Merge `new_words` into `existing`.
///
/// Keeps the relative order of `existing`, appends words not already present
/// in their `new_words` order, then drops from the front until at most `cap`
/// entries remain.
pub fn merge_history(existing: &[String], new_words: &[String], cap: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = existing.iter().map(String::as_str).collect();
    let mut merged: Vec<String> = existing.to_vec();

    for word in new_words {
        if seen.insert(word.as_str()) {
            merged.push(word.clone());
        }
    }

    if merged.len() > cap {
        let overflow = merged.len() - cap;
        merged.drain(..overflow);
    }
    merged
}

/// File-backed history of issued words
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    max_entries: usize,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries,
        }
    }

    /// Load the stored history.
    ///
    /// A missing file, an unreadable file, or a file that is not a JSON array
    /// of strings all yield an empty history.
    pub fn load(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No history file yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read history, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(words) => {
                debug!(path = %self.path.display(), count = words.len(), "Loaded history");
                words
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "History file is not a JSON string array, starting empty");
                Vec::new()
            }
        }
    }

    /// Merge `new_words` into `existing` and persist the result atomically.
    ///
    /// Returns the history as written.
    pub fn save(&self, existing: &[String], new_words: &[String]) -> Result<Vec<String>, StorageError> {
        let merged = merge_history(existing, new_words, self.max_entries);
        self.write_atomic(&merged)?;
        debug!(
            path = %self.path.display(),
            added = merged.len().saturating_sub(existing.len()),
            total = merged.len(),
            "Saved history"
        );
        Ok(merged)
    }

    fn write_atomic(&self, words: &[String]) -> Result<(), StorageError> {
        let path = self.path.as_path();
        let file_name = path
            .file_name()
            .ok_or_else(|| StorageError::InvalidPath(path.display().to_string()))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StorageError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create parent directory {:?}: {}", parent, e),
                ))
            })?;
        }

        let serialized = serde_json::to_string_pretty(words)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let mut temp_name = file_name.to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        fs::write(&temp_path, serialized.as_bytes()).map_err(|e| {
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to write history to {:?}: {}", temp_path, e),
            ))
        })?;

        fs::rename(&temp_path, path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StorageError::IoError(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file to {:?}: {}", path, e),
            ))
        })?;

        Ok(())
    }
}

//! Persisted operator preferences.
//!
//! The reconciliation logic only ever sees the `Preferences` capability, so
//! the storage backend can be swapped out (or faked in tests). Two backends
//! ship with the crate: a plain in-memory map and a JSON file under the
//! platform config directory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Process-wide key/value store for operator preferences.
pub trait Preferences {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory preferences. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    entries: HashMap<String, String>,
}

impl Preferences for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Preferences persisted as a JSON file in the platform config directory.
///
/// Writes go through immediately on every `set`; a write failure is logged
/// and the in-memory value is kept, so a broken disk degrades to
/// session-only preferences instead of an error the caller cannot act on.
pub struct FilePreferences {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FilePreferences {
    pub fn new() -> io::Result<Self> {
        let project_dirs = ProjectDirs::from("", "", "simbridge").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Could not determine config directory")
        })?;

        let config_dir = project_dirs.config_dir();
        fs::create_dir_all(config_dir)?;

        Self::with_path(config_dir.join("prefs.json"))
    }

    /// Open preferences backed by an explicit file path.
    pub fn with_path(path: PathBuf) -> io::Result<Self> {
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e),
        };

        Ok(Self { path, entries })
    }

    fn flush(&self) {
        let result = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            .and_then(|json| fs::write(&self.path, json));

        if let Err(e) = result {
            log::warn!("failed to persist preferences to {}: {e}", self.path.display());
        }
    }
}

impl Preferences for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush();
    }
}

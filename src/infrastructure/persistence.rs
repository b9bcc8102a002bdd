use crate::domain::AppearanceMode;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Key the appearance mode is stored under.
pub const APPEARANCE_KEY: &str = "appearanceMode";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid preferences file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Preferences file {0} does not contain a JSON object")]
    NotAnObject(String),
}

/// JSON object file holding the user's preferences.
///
/// Only the appearance mode is read or written; any other keys already in the
/// file are carried through untouched.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored appearance mode.
    ///
    /// A missing file, a missing key or an unrecognised value all read as
    /// [`AppearanceMode::System`]. Only an unreadable or malformed file is an error.
    pub fn load_appearance(&self) -> Result<AppearanceMode, PreferenceError> {
        let object = self.read_object()?;
        let Some(value) = object.get(APPEARANCE_KEY) else {
            return Ok(AppearanceMode::default());
        };

        match serde_json::from_value::<AppearanceMode>(value.clone()) {
            Ok(mode) => Ok(mode),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unrecognised appearance mode");
                Ok(AppearanceMode::default())
            }
        }
    }

    pub fn save_appearance(&self, mode: AppearanceMode) -> Result<(), PreferenceError> {
        let mut object = match self.read_object() {
            Ok(object) => object,
            Err(e) => {
                warn!(error = %e, "Replacing unreadable preferences file");
                Map::new()
            }
        };
        object.insert(APPEARANCE_KEY.to_string(), Value::String(mode.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
            PreferenceError::Parse {
                path: self.display_path(),
                source: e,
            }
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        debug!(path = %self.path.display(), mode = %mode, "Saved appearance mode");
        Ok(())
    }

    fn read_object(&self) -> Result<Map<String, Value>, PreferenceError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(object)) => Ok(object),
            Ok(_) => Err(PreferenceError::NotAnObject(self.display_path())),
            Err(e) => Err(PreferenceError::Parse {
                path: self.display_path(),
                source: e,
            }),
        }
    }

    fn display_path(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, source: io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.display_path(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> PreferenceStore {
        PreferenceStore::new(dir.path().join("preferences.json"))
    }

    #[test]
    fn test_missing_file_reads_system() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load_appearance().unwrap(), AppearanceMode::System);
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save_appearance(AppearanceMode::Dark).unwrap();
        assert_eq!(store.load_appearance().unwrap(), AppearanceMode::Dark);

        store.save_appearance(AppearanceMode::Light).unwrap();
        assert_eq!(store.load_appearance().unwrap(), AppearanceMode::Light);
    }

    #[test]
    fn test_saved_file_uses_fixed_key() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.save_appearance(AppearanceMode::Dark).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value[APPEARANCE_KEY], "Dark");
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"lastTab": 2, "appearanceMode": "Light"}"#).unwrap();

        store.save_appearance(AppearanceMode::System).unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(value["lastTab"], 2);
        assert_eq!(value[APPEARANCE_KEY], "System");
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested").join("prefs.json"));
        store.save_appearance(AppearanceMode::Light).unwrap();
        assert_eq!(store.load_appearance().unwrap(), AppearanceMode::Light);
    }

    #[test]
    fn test_unknown_value_reads_system() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"appearanceMode": "Sepia"}"#).unwrap();
        assert_eq!(store.load_appearance().unwrap(), AppearanceMode::System);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load_appearance(), Err(PreferenceError::Parse { .. })));

        fs::write(store.path(), "[1, 2]").unwrap();
        assert!(matches!(store.load_appearance(), Err(PreferenceError::NotAnObject(_))));
    }

    #[test]
    fn test_save_recovers_from_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();

        store.save_appearance(AppearanceMode::Dark).unwrap();
        assert_eq!(store.load_appearance().unwrap(), AppearanceMode::Dark);
    }
}

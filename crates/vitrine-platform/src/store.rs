//! Host capabilities for the headless runner: a JSON preference file and the
//! environment color-scheme signal.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use vitrine_core::{ColorSchemeQuery, PreferenceStore, StorageError};

/// File name of the preference store inside the state directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

/// Preferences kept as one JSON object on disk, e.g. `{"theme":"dark"}`.
///
/// A missing file reads as empty. Every `store` rewrites the whole file.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `dir/preferences.json`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(PREFERENCES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self, key: &str) -> Result<Map<String, Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    key: key.to_string(),
                    reason: format!("{}: {e}", self.path.display()),
                });
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{} is not a JSON object", self.path.display()),
            }),
            Err(e) => Err(StorageError::Read {
                key: key.to_string(),
                reason: format!("{}: {e}", self.path.display()),
            }),
        }
    }
}

impl PreferenceStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.read_map(key)?;
        Ok(map.get(key).and_then(Value::as_str).map(str::to_string))
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |reason: String| StorageError::Write {
            key: key.to_string(),
            reason,
        };
        // An unreadable file is replaced rather than blocking the write.
        let mut map = self.read_map(key).unwrap_or_default();
        map.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| write_err(format!("{}: {e}", dir.display())))?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| write_err(e.to_string()))?;
        fs::write(&self.path, text)
            .map_err(|e| write_err(format!("{}: {e}", self.path.display())))
    }
}

/// Name of the environment variable read by `EnvColorScheme`.
pub const COLOR_SCHEME_VAR: &str = "VITRINE_COLOR_SCHEME";

/// System color-scheme signal for the headless runner, read once from
/// `VITRINE_COLOR_SCHEME` (`dark` means dark).
#[derive(Clone, Debug, Default)]
pub struct EnvColorScheme {
    value: Option<String>,
}

impl EnvColorScheme {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(COLOR_SCHEME_VAR).ok())
    }

    pub fn from_value(value: Option<String>) -> Self {
        Self { value }
    }
}

impl ColorSchemeQuery for EnvColorScheme {
    fn prefers_dark(&self) -> bool {
        self.value
            .as_deref()
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("dark"))
    }
}

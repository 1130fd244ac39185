//! Named configuration profiles stored in `~/.a2i/config.json`
//!
//! The file is a JSON object mapping profile names to settings objects:
//!
//! ```json
//! { "default": { "frame_size": 65536, "window": "hann_poisson", ... } }
//! ```

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::{RawSettings, Settings, DEFAULT_PROFILE};
use crate::infrastructure::traits::FileSystem;

/// Non-fatal problem found while loading a profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// Config file could not be opened; defaults were used.
    FileUnavailable(PathBuf),
    /// Profile is not in the file; defaults were used.
    ProfileMissing(String),
    /// Key in the profile that is not a setting; ignored.
    UnknownKey(String),
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::FileUnavailable(path) => write!(
                f,
                "Failed to open config file: {}. Loading default settings.",
                path.display()
            ),
            LoadWarning::ProfileMissing(name) => write!(
                f,
                "Configuration '{name}' not found. Loading default settings."
            ),
            LoadWarning::UnknownKey(key) => write!(f, "Unknown setting in config: {key}"),
        }
    }
}

/// Settings resolved from a profile plus everything worth telling the user.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub settings: Settings,
    pub warnings: Vec<LoadWarning>,
}

enum Store {
    Unavailable(io::Error),
    Loaded(Map<String, Value>),
}

/// Reads and writes named profiles.
pub struct ProfileService {
    fs: Arc<dyn FileSystem>,
    path: PathBuf,
}

impl ProfileService {
    /// Create a service for the config file at `path`.
    pub fn new(fs: Arc<dyn FileSystem>, path: PathBuf) -> Self {
        Self { fs, path }
    }

    pub fn config_path(&self) -> &Path {
        &self.path
    }

    fn parse_error(&self, message: impl Into<String>) -> ApplicationError {
        ApplicationError::ConfigParse {
            path: self.path.clone(),
            message: message.into(),
        }
    }

    fn read_store(&self) -> ApplicationResult<Store> {
        let content = match self.fs.read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => return Ok(Store::Unavailable(e)),
        };
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(map)) => Ok(Store::Loaded(map)),
            Ok(_) => Err(self.parse_error("expected an object of named configurations")),
            Err(e) => Err(self.parse_error(e.to_string())),
        }
    }

    fn write_store(&self, map: Map<String, Value>) -> ApplicationResult<()> {
        let write_err = |source| ApplicationError::ConfigWrite {
            path: self.path.clone(),
            source,
        };
        self.fs.ensure_parent(&self.path).map_err(write_err)?;
        let mut content =
            serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| {
                ApplicationError::Config {
                    message: format!("serialize config: {e}"),
                }
            })?;
        content.push('\n');
        self.fs.write(&self.path, &content).map_err(write_err)?;
        debug!("wrote {}", self.path.display());
        Ok(())
    }

    fn to_value(settings: &Settings) -> ApplicationResult<Value> {
        serde_json::to_value(settings).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {e}"),
        })
    }

    /// Load profile `name` on top of the compiled defaults.
    ///
    /// A missing file or profile is not an error: defaults are used and a
    /// warning is reported. A file that is not valid JSON is an error.
    #[instrument(skip(self))]
    pub fn load(&self, name: &str) -> ApplicationResult<LoadReport> {
        let mut warnings = Vec::new();
        let defaults = Settings::default();

        let settings = match self.read_store()? {
            Store::Unavailable(e) => {
                debug!("cannot read {}: {}", self.path.display(), e);
                warnings.push(LoadWarning::FileUnavailable(self.path.clone()));
                defaults
            }
            Store::Loaded(map) => match map.get(name) {
                None => {
                    warnings.push(LoadWarning::ProfileMissing(name.to_string()));
                    defaults
                }
                Some(value) => {
                    let raw: RawSettings = serde_json::from_value(value.clone())
                        .map_err(|e| self.parse_error(format!("configuration '{name}': {e}")))?;
                    warnings.extend(raw.unknown.keys().cloned().map(LoadWarning::UnknownKey));
                    defaults.merge_with(&raw)
                }
            },
        };

        Ok(LoadReport { settings, warnings })
    }

    /// Names of all stored profiles (empty when the file cannot be read).
    pub fn profile_names(&self) -> ApplicationResult<Vec<String>> {
        match self.read_store()? {
            Store::Unavailable(_) => Ok(Vec::new()),
            Store::Loaded(map) => Ok(map.keys().cloned().collect()),
        }
    }

    /// Store `settings` as profile `name`, keeping other profiles.
    #[instrument(skip(self, settings))]
    pub fn write_profile(&self, name: &str, settings: &Settings) -> ApplicationResult<()> {
        let mut map = match self.read_store()? {
            Store::Loaded(map) => map,
            Store::Unavailable(_) => Map::new(),
        };
        map.insert(name.to_string(), Self::to_value(settings)?);
        self.write_store(map)
    }

    /// Rename profile `old` to `new`.
    #[instrument(skip(self))]
    pub fn rename_profile(&self, old: &str, new: &str) -> ApplicationResult<()> {
        let mut map = match self.read_store()? {
            Store::Loaded(map) => map,
            Store::Unavailable(_) => return Err(ApplicationError::ProfileNotFound(old.into())),
        };
        if map.contains_key(new) {
            return Err(ApplicationError::ProfileExists(new.to_string()));
        }
        let value = map
            .remove(old)
            .ok_or_else(|| ApplicationError::ProfileNotFound(old.to_string()))?;
        map.insert(new.to_string(), value);
        self.write_store(map)
    }

    /// Overwrite the config file with only the default profile.
    #[instrument(skip(self))]
    pub fn reset_default(&self) -> ApplicationResult<()> {
        let mut map = Map::new();
        map.insert(
            DEFAULT_PROFILE.to_string(),
            Self::to_value(&Settings::default())?,
        );
        self.write_store(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory filesystem; `read_only` makes every write fail.
    #[derive(Default)]
    struct MemoryFs {
        files: Mutex<HashMap<PathBuf, String>>,
        read_only: bool,
    }

    impl MemoryFs {
        fn with_file(path: &Path, content: &str) -> Self {
            let fs = Self::default();
            fs.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            fs
        }
    }

    impl FileSystem for MemoryFs {
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.files
                .lock()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }

        fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.read_to_string(path).map(String::into_bytes)
        }

        fn write(&self, path: &Path, content: &str) -> io::Result<()> {
            if self.read_only {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
        }

        fn create_dir_all(&self, _path: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    fn path() -> PathBuf {
        PathBuf::from("/home/u/.a2i/config.json")
    }

    #[test]
    fn given_empty_fs_when_reset_default_then_file_holds_default_profile() {
        let fs = Arc::new(MemoryFs::default());
        let service = ProfileService::new(fs.clone(), path());

        service.reset_default().unwrap();

        let content = fs.read_to_string(&path()).unwrap();
        let map: Map<String, Value> = serde_json::from_str(&content).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map[DEFAULT_PROFILE]["frame_size"], 65536);
    }

    #[test]
    fn given_read_only_fs_when_write_then_config_write_error() {
        let fs = Arc::new(MemoryFs {
            read_only: true,
            ..MemoryFs::default()
        });
        let service = ProfileService::new(fs, path());

        let err = service.reset_default().unwrap_err();

        assert!(matches!(err, ApplicationError::ConfigWrite { ref path, .. } if path.ends_with("config.json")));
    }

    #[test]
    fn given_non_object_json_when_load_then_parse_error() {
        let fs = Arc::new(MemoryFs::with_file(&path(), "42"));
        let service = ProfileService::new(fs, path());

        assert!(matches!(
            service.load(DEFAULT_PROFILE),
            Err(ApplicationError::ConfigParse { .. })
        ));
    }

    #[test]
    fn given_no_file_when_profile_names_then_empty() {
        let service = ProfileService::new(Arc::new(MemoryFs::default()), path());
        assert!(service.profile_names().unwrap().is_empty());
    }

    #[test]
    fn given_warning_when_displayed_then_mentions_defaults() {
        let warning = LoadWarning::FileUnavailable(path());
        assert_eq!(
            warning.to_string(),
            "Failed to open config file: /home/u/.a2i/config.json. Loading default settings."
        );
    }
}

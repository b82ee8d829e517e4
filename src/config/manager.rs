//! Settings store for loading, merging and saving the settings document
//!
//! The store keeps the only in-memory copy of the document. Every mutation
//! is written straight through to disk with an atomic replace; a failed
//! write is logged and the in-memory copy stays authoritative.

use crate::config::models::{self, Language, Settings, Theme, Version, WindowPosition, keys};
use crate::error::{LauncherError, Result, StringError};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default settings file name, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "game_config.json";

/// Handle through which services share the single store
pub type SharedConfig = Arc<Mutex<ConfigStore>>;

/// File-backed settings document with default-merge on load
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    document: Map<String, Value>,
}

impl ConfigStore {
    /// Open the store backed by `path`
    ///
    /// Never fails: a missing, unreadable or malformed file yields the
    /// default document. The file itself is only written on the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = Self::load_or_default(&path);
        Self { path, document }
    }

    /// Open the store and wrap it in a shareable handle
    pub fn open_shared(path: impl Into<PathBuf>) -> SharedConfig {
        Arc::new(Mutex::new(Self::open(path)))
    }

    /// Re-read the backing file, replacing the in-memory document
    pub fn reload(&mut self) {
        self.document = Self::load_or_default(&self.path);
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The whole document, including keys this launcher does not know about
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Look up a raw value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Look up a raw value, returning `default` when the key is absent
    pub fn get_or(&self, key: &str, default: Value) -> Value {
        self.document.get(key).cloned().unwrap_or(default)
    }

    /// Look up and deserialize a value; `None` when absent or of the wrong shape
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.document
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Set one key and write the document through to disk
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.document.insert(key.to_string(), value.into());
        self.save();
    }

    /// Set several keys with a single write
    pub fn update<K, I>(&mut self, entries: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let mut changed = false;
        for (key, value) in entries {
            self.document.insert(key.into(), value);
            changed = true;
        }
        if changed {
            self.save();
        }
    }

    /// Write the document, logging instead of returning a failure
    pub fn save(&self) {
        if let Err(e) = self.try_save() {
            warn!(
                "{}. Continuing with in-memory settings; \
                 changes will be lost on restart.",
                e
            );
        }
    }

    /// Write the document atomically
    ///
    /// The document goes to a temp file in the same directory which is then
    /// persisted over the backing file.
    pub fn try_save(&self) -> Result<()> {
        self.write_document().map_err(|source| LauncherError::ConfigSave {
            path: self.path.clone(),
            source,
        })?;
        debug!("Settings saved to {}", self.path.display());
        Ok(())
    }

    /// Typed snapshot of the current document
    pub fn settings(&self) -> Settings {
        Settings::from_document(&self.document)
    }

    /// Selected language
    pub fn language(&self) -> Language {
        self.get_as(keys::LANGUAGE).unwrap_or_default()
    }

    /// Selected version
    pub fn version(&self) -> Version {
        self.get_as(keys::VERSION).unwrap_or_default()
    }

    /// Selected theme; unknown names fall back to dark
    pub fn theme(&self) -> Theme {
        self.get_as(keys::THEME).unwrap_or_default()
    }

    /// Last saved window position
    pub fn window_position(&self) -> WindowPosition {
        self.get_as(keys::WINDOW_POSITION).unwrap_or_default()
    }

    /// Whether the stored selection launches on startup
    pub fn auto_launch(&self) -> bool {
        self.get_as(keys::AUTO_LAUNCH).unwrap_or(false)
    }

    /// Number of launches so far
    pub fn play_count(&self) -> u64 {
        self.get(keys::PLAY_COUNT)
            .and_then(models::play_count_from_value)
            .unwrap_or(0)
    }

    /// Stamp of the last launch, empty when never played
    pub fn last_played(&self) -> String {
        self.get_as(keys::LAST_PLAYED).unwrap_or_default()
    }

    /// Configured game file for `language`
    pub fn game_path(&self, language: Language) -> PathBuf {
        self.get_as(language.path_key())
            .unwrap_or_else(|| Settings::default().game_path(language).clone())
    }

    /// Fill every default key missing from `loaded`; present keys always win
    pub fn merge_defaults(mut loaded: Map<String, Value>) -> Map<String, Value> {
        for (key, value) in models::default_document() {
            loaded.entry(key).or_insert(value);
        }
        loaded
    }

    /// Parse a settings document and gap-fill it from the defaults
    pub fn parse_document(json: &str) -> Result<Map<String, Value>> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Ok(Self::merge_defaults(map)),
            other => Err(LauncherError::ConfigLoad {
                path: PathBuf::new(),
                source: StringError::new(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )),
            }),
        }
    }

    /// Serialize a document the way it is stored on disk
    pub fn render_document(document: &Map<String, Value>) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(512);
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        document.serialize(&mut serializer)?;
        out.push(b'\n');
        Ok(out)
    }

    fn load_or_default(path: &Path) -> Map<String, Value> {
        match Self::try_load(path) {
            Ok(Some(document)) => {
                info!("Settings loaded from {}", path.display());
                document
            }
            Ok(None) => {
                info!(
                    "Settings file {} not found, using defaults",
                    path.display()
                );
                models::default_document()
            }
            Err(e) => {
                warn!("{}. Using default settings.", e);
                models::default_document()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Option<Map<String, Value>>> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(LauncherError::ConfigLoad {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        Self::parse_document(&json).map(Some).map_err(|e| match e {
            LauncherError::ConfigLoad { source, .. } => LauncherError::ConfigLoad {
                path: path.to_path_buf(),
                source,
            },
            other => LauncherError::ConfigLoad {
                path: path.to_path_buf(),
                source: Box::new(other),
            },
        })
    }

    fn write_document(&self) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let bytes = Self::render_document(&self.document)?;
        let mut temp = tempfile::NamedTempFile::new_in(&dir)?;
        temp.write_all(&bytes)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    /// Helper to create a temporary directory for tests
    /// Returns a `TempDir` that automatically cleans up when dropped
    fn create_test_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp directory")
    }

    #[test]
    fn test_open_missing_file_uses_defaults_without_writing() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");

        let store = ConfigStore::open(&path);
        assert_eq!(store.document(), &models::default_document());
        assert!(!path.exists(), "loading must not create the file");
    }

    #[test]
    fn test_load_fills_missing_keys_and_keeps_present_ones() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");
        std::fs::write(&path, r#"{"language": "English", "play_count": 7}"#).unwrap();

        let store = ConfigStore::open(&path);
        assert_eq!(store.get("language"), Some(&json!("English")));
        assert_eq!(store.play_count(), 7);
        for key in models::default_document().keys() {
            assert!(store.get(key).is_some(), "missing default key {key}");
        }
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = ConfigStore::open(&path);
        assert_eq!(store.document(), &models::default_document());
    }

    #[test]
    fn test_unreadable_file_falls_back_to_defaults() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");
        std::fs::create_dir(&path).unwrap();

        assert!(matches!(
            ConfigStore::try_load(&path),
            Err(LauncherError::ConfigLoad { .. })
        ));
        let store = ConfigStore::open(&path);
        assert_eq!(store.document(), &models::default_document());
    }

    #[test]
    fn test_reload_picks_up_external_changes() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");

        let mut store = ConfigStore::open(&path);
        store.set(keys::THEME, "light");

        std::fs::write(&path, r#"{"theme": "gaming", "play_count": 9}"#).unwrap();
        assert_eq!(store.theme(), Theme::Light);

        store.reload();
        assert_eq!(store.theme(), Theme::Gaming);
        assert_eq!(store.play_count(), 9);
        for key in models::default_document().keys() {
            assert!(store.get(key).is_some(), "missing default key {key}");
        }
    }

    #[test]
    fn test_non_object_document_is_a_load_error() {
        let result = ConfigStore::parse_document("[1, 2, 3]");
        assert!(matches!(result, Err(LauncherError::ConfigLoad { .. })));
    }

    #[test]
    fn test_set_then_get_and_reload() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");

        let mut store = ConfigStore::open(&path);
        store.set(keys::THEME, "gaming");
        assert_eq!(store.theme(), Theme::Gaming);

        let reloaded = ConfigStore::open(&path);
        assert_eq!(reloaded.theme(), Theme::Gaming);
        assert_eq!(reloaded.document(), store.document());
    }

    #[test]
    fn test_get_or_returns_default_for_absent_key() {
        let dir = create_test_dir();
        let store = ConfigStore::open(dir.path().join("game_config.json"));
        assert_eq!(store.get_or("volume", json!(0.5)), json!(0.5));
        assert_eq!(store.get_or("theme", json!("light")), json!("dark"));
    }

    #[test]
    fn test_unknown_keys_survive_save() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");
        std::fs::write(&path, r#"{"mod_list": ["hats", "trails"]}"#).unwrap();

        let mut store = ConfigStore::open(&path);
        store.set(keys::AUTO_LAUNCH, true);

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["mod_list"], json!(["hats", "trails"]));
        assert_eq!(written["auto_launch"], json!(true));
    }

    #[test]
    fn test_saved_file_is_indented_utf8() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");

        let mut store = ConfigStore::open(&path);
        store.set("player_name", "小明");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\n    \"language\": \"Chinese\""));
        assert!(text.contains("小明"));
    }

    #[test]
    fn test_update_writes_all_entries_once() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");

        let mut store = ConfigStore::open(&path);
        store.update([
            (keys::PLAY_COUNT, json!(3)),
            (keys::LAST_PLAYED, json!("2025-06-01T10:00:00")),
        ]);

        let reloaded = ConfigStore::open(&path);
        assert_eq!(reloaded.play_count(), 3);
        assert_eq!(reloaded.last_played(), "2025-06-01T10:00:00");
    }

    #[test]
    fn test_save_failure_is_not_surfaced_to_set() {
        let dir = create_test_dir();
        let blocker = dir.path().join("not_a_dir");
        std::fs::write(&blocker, "file").unwrap();

        let mut store = ConfigStore::open(blocker.join("game_config.json"));
        store.set(keys::THEME, "light");
        assert_eq!(store.theme(), Theme::Light);
        assert!(matches!(
            store.try_save(),
            Err(LauncherError::ConfigSave { .. })
        ));
    }

    #[test]
    fn test_wrong_typed_values_fall_back_in_accessors() {
        let dir = create_test_dir();
        let path = dir.path().join("game_config.json");
        std::fs::write(
            &path,
            r#"{"theme": 42, "play_count": "many", "auto_launch": "yes"}"#,
        )
        .unwrap();

        let store = ConfigStore::open(&path);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(store.play_count(), 0);
        assert!(!store.auto_launch());
        assert_eq!(store.settings().theme, Theme::Dark);
        // Stored values are kept as-is, only the typed view falls back
        assert_eq!(store.get("theme"), Some(&json!(42)));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: merging is idempotent and never overrides present keys
            #[test]
            fn merge_is_idempotent(
                present in prop::collection::btree_map(
                    prop::sample::select(vec![
                        "language", "version", "theme", "play_count", "extra", "notes",
                    ]),
                    "[a-z0-9]{0,8}",
                    0..6,
                )
            ) {
                let loaded: Map<String, Value> = present
                    .iter()
                    .map(|(k, v)| ((*k).to_string(), Value::from(v.as_str())))
                    .collect();

                let once = ConfigStore::merge_defaults(loaded.clone());
                let twice = ConfigStore::merge_defaults(once.clone());
                prop_assert_eq!(&once, &twice);

                for (key, value) in &loaded {
                    prop_assert_eq!(once.get(key), Some(value));
                }
                for key in models::default_document().keys() {
                    prop_assert!(once.contains_key(key));
                }
            }
        }
    }
}

//! Settings data models
//!
//! This module defines the typed view over the settings document: the
//! selectable enums, the window position, and the defaults every loaded
//! document is gap-filled from.

use crate::error::LauncherError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Keys of the settings document, in canonical order
pub mod keys {
    /// Selected game language
    pub const LANGUAGE: &str = "language";
    /// Selected game version
    pub const VERSION: &str = "version";
    /// Last window position
    pub const WINDOW_POSITION: &str = "window_position";
    /// Launcher colour theme
    pub const THEME: &str = "theme";
    /// Launch the stored selection on startup
    pub const AUTO_LAUNCH: &str = "auto_launch";
    /// ISO-8601 stamp of the last launch, empty when never played
    pub const LAST_PLAYED: &str = "last_played";
    /// Number of successful launch requests
    pub const PLAY_COUNT: &str = "play_count";
    /// Path of the Chinese game file
    pub const CHINESE_PATH: &str = "chinese_path";
    /// Path of the English game file
    pub const ENGLISH_PATH: &str = "english_path";
}

/// File name of the Chinese game variant inside a game folder
pub const CHINESE_FILE_NAME: &str = "super_ball-chinese.html";
/// File name of the English game variant inside a game folder
pub const ENGLISH_FILE_NAME: &str = "super_ball-english.html";
/// Folder the game files ship in, relative to the launcher
pub const DEFAULT_GAME_DIR: &str = "super_ball-HTMLfile";

/// Game language variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Chinese edition (`super_ball-chinese.html`)
    #[default]
    Chinese,
    /// English edition (`super_ball-english.html`)
    English,
}

impl Language {
    /// Both variants, in display order
    pub const ALL: [Self; 2] = [Self::Chinese, Self::English];

    /// Stored name of the language
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chinese => "Chinese",
            Self::English => "English",
        }
    }

    /// Settings key holding this language's game path
    pub fn path_key(self) -> &'static str {
        match self {
            Self::Chinese => keys::CHINESE_PATH,
            Self::English => keys::ENGLISH_PATH,
        }
    }

    /// Game file name for this language inside a game folder
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Chinese => CHINESE_FILE_NAME,
            Self::English => ENGLISH_FILE_NAME,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chinese" | "zh" => Ok(Self::Chinese),
            "english" | "en" => Ok(Self::English),
            _ => Err(LauncherError::InvalidValue {
                kind: "language",
                value: s.to_string(),
            }),
        }
    }
}

/// Game version variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Version {
    /// Classic release
    #[serde(rename = "v1.0")]
    V1_0,
    /// Current release
    #[default]
    #[serde(rename = "v2.0")]
    V2_0,
}

impl Version {
    /// Stored name of the version
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1_0 => "v1.0",
            Self::V2_0 => "v2.0",
        }
    }

    /// Feature list shown next to the version selector
    pub fn features(self) -> &'static str {
        match self {
            Self::V1_0 => {
                "• Basic ball physics\n• Simple controls\n• Classic gameplay\n• Standard graphics"
            }
            Self::V2_0 => {
                "• Advanced physics engine\n• Spear combat system\n• Enhanced animations\n\
                 • Modern graphics\n• Special effects"
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Version {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        match normalized.strip_prefix('v').unwrap_or(&normalized) {
            "1.0" | "1" => Ok(Self::V1_0),
            "2.0" | "2" => Ok(Self::V2_0),
            _ => Err(LauncherError::InvalidValue {
                kind: "version",
                value: s.to_string(),
            }),
        }
    }
}

/// Launcher colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme
    #[default]
    Dark,
    /// Light theme
    Light,
    /// High-contrast gaming theme
    Gaming,
}

impl Theme {
    /// Stored name of the theme
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Gaming => "gaming",
        }
    }

    /// Capitalised name for display
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
            Self::Gaming => "Gaming",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = LauncherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            "gaming" => Ok(Self::Gaming),
            _ => Err(LauncherError::InvalidValue {
                kind: "theme",
                value: s.to_string(),
            }),
        }
    }
}

/// Window position for persistence (best-effort, never negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowPosition {
    /// X position
    pub x: u32,
    /// Y position
    pub y: u32,
}

impl WindowPosition {
    /// Build a position from raw window coordinates, clamping negatives to 0
    pub fn clamped(x: i32, y: i32) -> Self {
        Self {
            x: u32::try_from(x).unwrap_or(0),
            y: u32::try_from(y).unwrap_or(0),
        }
    }
}

impl Default for WindowPosition {
    fn default() -> Self {
        Self { x: 100, y: 100 }
    }
}

/// Typed snapshot of the settings document
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Selected language
    pub language: Language,
    /// Selected version
    pub version: Version,
    /// Last window position
    pub window_position: WindowPosition,
    /// Colour theme
    pub theme: Theme,
    /// Launch the stored selection on startup
    pub auto_launch: bool,
    /// Stamp of the last launch, empty when never played
    pub last_played: String,
    /// Number of launches
    pub play_count: u64,
    /// Chinese game file
    pub chinese_path: PathBuf,
    /// English game file
    pub english_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        let game_dir = PathBuf::from(DEFAULT_GAME_DIR);
        Self {
            language: Language::default(),
            version: Version::default(),
            window_position: WindowPosition::default(),
            theme: Theme::default(),
            auto_launch: false,
            last_played: String::new(),
            play_count: 0,
            chinese_path: game_dir.join(CHINESE_FILE_NAME),
            english_path: game_dir.join(ENGLISH_FILE_NAME),
        }
    }
}

impl Settings {
    /// Render the snapshot as a settings document in canonical key order
    pub fn to_document(&self) -> Map<String, Value> {
        let mut position = Map::new();
        position.insert("x".into(), Value::from(self.window_position.x));
        position.insert("y".into(), Value::from(self.window_position.y));

        let mut doc = Map::new();
        doc.insert(keys::LANGUAGE.into(), Value::from(self.language.as_str()));
        doc.insert(keys::VERSION.into(), Value::from(self.version.as_str()));
        doc.insert(keys::WINDOW_POSITION.into(), Value::Object(position));
        doc.insert(keys::THEME.into(), Value::from(self.theme.as_str()));
        doc.insert(keys::AUTO_LAUNCH.into(), Value::from(self.auto_launch));
        doc.insert(keys::LAST_PLAYED.into(), Value::from(self.last_played.as_str()));
        doc.insert(keys::PLAY_COUNT.into(), Value::from(self.play_count));
        doc.insert(
            keys::CHINESE_PATH.into(),
            Value::from(self.chinese_path.to_string_lossy().into_owned()),
        );
        doc.insert(
            keys::ENGLISH_PATH.into(),
            Value::from(self.english_path.to_string_lossy().into_owned()),
        );
        doc
    }

    /// Read a typed snapshot from a document
    ///
    /// Each field falls back to its default independently when the stored
    /// value is missing or has the wrong shape.
    pub fn from_document(doc: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            language: field(doc, keys::LANGUAGE).unwrap_or(defaults.language),
            version: field(doc, keys::VERSION).unwrap_or(defaults.version),
            window_position: field(doc, keys::WINDOW_POSITION)
                .unwrap_or(defaults.window_position),
            theme: field(doc, keys::THEME).unwrap_or(defaults.theme),
            auto_launch: field(doc, keys::AUTO_LAUNCH).unwrap_or(defaults.auto_launch),
            last_played: field(doc, keys::LAST_PLAYED).unwrap_or(defaults.last_played),
            play_count: doc
                .get(keys::PLAY_COUNT)
                .and_then(play_count_from_value)
                .unwrap_or(defaults.play_count),
            chinese_path: field(doc, keys::CHINESE_PATH).unwrap_or(defaults.chinese_path),
            english_path: field(doc, keys::ENGLISH_PATH).unwrap_or(defaults.english_path),
        }
    }

    /// Path configured for `language`
    pub fn game_path(&self, language: Language) -> &PathBuf {
        match language {
            Language::Chinese => &self.chinese_path,
            Language::English => &self.english_path,
        }
    }
}

/// Read a stored play count
///
/// Integral non-negative floats such as `5.0` count too; anything else is `None`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn play_count_from_value(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    let count = value.as_f64()?;
    (count >= 0.0 && count.fract() == 0.0 && count <= u64::MAX as f64).then(|| count as u64)
}

/// The document a fresh or unreadable settings file is replaced with
pub fn default_document() -> Map<String, Value> {
    Settings::default().to_document()
}

fn field<T: DeserializeOwned>(doc: &Map<String, Value>, key: &str) -> Option<T> {
    doc.get(key)
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

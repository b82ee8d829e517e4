//! Launcher controller implementation
//!
//! This module implements the controller that turns user intents from the
//! presentation layer into settings updates and game launches.

use crate::config::{Language, SharedConfig, Theme, Version, WindowPosition, keys};
use crate::controller::opener::{BrowserOpener, GameOpener};
use crate::error::{LauncherError, Result};
use crate::paths::{FileReport, PathResolver, RebaseOutcome};
use crate::stats::{StatsService, StatsSummary};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Phase of a launch request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LaunchState {
    /// No request in flight
    #[default]
    Idle,
    /// Looking up the configured game file
    Resolving,
    /// Checking the game file exists
    Validating,
    /// Recording the play and handing the file to the opener
    Launching,
    /// The request was aborted
    Failed,
}

/// Result of a successful launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// Launched language
    pub language: Language,
    /// Launched version
    pub version: Version,
    /// File handed to the opener
    pub path: PathBuf,
    /// Statistics after recording this launch
    pub stats: StatsSummary,
    /// Status line for the presentation layer
    pub message: String,
}

/// Snapshot of everything the launcher's status panel shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherStatus {
    /// Play statistics
    pub stats: StatsSummary,
    /// Selected language
    pub language: Language,
    /// Selected version
    pub version: Version,
    /// Selected theme
    pub theme: Theme,
    /// Whether the selection launches on startup
    pub auto_launch: bool,
    /// Game file availability
    pub files: FileReport,
}

impl fmt::Display for LauncherStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(25);
        writeln!(f, "📊 GAME STATISTICS")?;
        writeln!(f, "{rule}")?;
        writeln!(f)?;
        writeln!(f, "🎮 Total Games Played: {}", self.stats.play_count)?;
        writeln!(f, "📅 Last Played: {}", self.stats.last_played_display)?;
        writeln!(f)?;
        writeln!(f, "🌍 Current Language: {}", self.language)?;
        writeln!(f, "⚙️ Current Version: {}", self.version)?;
        writeln!(f, "🎨 Current Theme: {}", self.theme.display_name())?;
        writeln!(
            f,
            "🚀 Auto-launch: {}",
            if self.auto_launch { "On" } else { "Off" }
        )?;
        writeln!(f)?;
        writeln!(f, "📁 Game Files Status:")?;
        writeln!(f, "{rule}")?;
        for file in &self.files.files {
            let mark = if file.exists { "✅ Found" } else { "❌ Missing" };
            writeln!(f, "{}: {mark}", file.language)?;
        }
        Ok(())
    }
}

/// Coordinates settings, statistics, path checks and the game opener
pub struct LauncherController {
    config: SharedConfig,
    paths: PathResolver,
    stats: StatsService,
    opener: Box<dyn GameOpener>,
    state: LaunchState,
}

impl fmt::Debug for LauncherController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LauncherController")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl LauncherController {
    /// Create a controller that hands games to `opener`
    pub fn new(config: SharedConfig, opener: impl GameOpener + 'static) -> Self {
        Self {
            paths: PathResolver::new(config.clone()),
            stats: StatsService::new(config.clone()),
            config,
            opener: Box::new(opener),
            state: LaunchState::Idle,
        }
    }

    /// Create a controller that opens games in the default browser
    pub fn with_browser(config: SharedConfig) -> Self {
        Self::new(config, BrowserOpener)
    }

    /// Phase of the current launch request; `Idle` between requests
    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Stored language and version selection
    pub fn selection(&self) -> (Language, Version) {
        let store = self.config.lock();
        (store.language(), store.version())
    }

    /// Launch `language`/`version`
    ///
    /// A missing game file aborts before anything is recorded. Once the
    /// file is validated the play is recorded, then the file is opened;
    /// an opener failure is reported with its own message.
    pub fn start_game(&mut self, language: Language, version: Version) -> Result<LaunchReport> {
        info!("Launch requested: {} {}", language, version);

        self.transition(LaunchState::Resolving);
        let path = self.paths.resolve(language);

        self.transition(LaunchState::Validating);
        if !self.paths.exists(language) {
            return Err(self.fail(LauncherError::GameFileNotFound(path)));
        }

        self.transition(LaunchState::Launching);
        if let Err(e) = self.stats.record_play() {
            return Err(self.fail(e));
        }

        let target = std::path::absolute(&path).unwrap_or_else(|_| path.clone());
        if let Err(e) = self.opener.open(&target) {
            return Err(self.fail(LauncherError::LaunchOpen(e)));
        }

        let message = format!("Game launched: {language} {version}");
        info!("{}", message);
        self.transition(LaunchState::Idle);

        Ok(LaunchReport {
            language,
            version,
            path: target,
            stats: self.stats.summary(),
            message,
        })
    }

    /// Launch the stored selection
    pub fn start_selected(&mut self) -> Result<LaunchReport> {
        let (language, version) = self.selection();
        self.start_game(language, version)
    }

    /// Launch the stored selection if auto-launch is enabled
    pub fn auto_launch(&mut self) -> Option<Result<LaunchReport>> {
        let enabled = self.config.lock().auto_launch();
        if enabled {
            info!("Auto-launch enabled, starting last selected game");
            Some(self.start_selected())
        } else {
            None
        }
    }

    /// Store the selected language
    pub fn change_language(&self, language: Language) -> String {
        self.config.lock().set(keys::LANGUAGE, language.as_str());
        format!("Language changed to {language}")
    }

    /// Store the selected version
    pub fn change_version(&self, version: Version) -> String {
        self.config.lock().set(keys::VERSION, version.as_str());
        format!("Version changed to {version}")
    }

    /// Store the selected theme
    pub fn change_theme(&self, theme: Theme) -> String {
        self.config.lock().set(keys::THEME, theme.as_str());
        format!("Theme changed to {}", theme.display_name())
    }

    /// Store the auto-launch preference
    pub fn set_auto_launch(&self, enabled: bool) -> String {
        self.config.lock().set(keys::AUTO_LAUNCH, enabled);
        if enabled {
            "Auto-launch enabled".to_string()
        } else {
            "Auto-launch disabled".to_string()
        }
    }

    /// Store the window position, clamping negative coordinates to 0
    pub fn remember_window_position(&self, x: i32, y: i32) -> WindowPosition {
        let position = WindowPosition::clamped(x, y);
        let mut entry = serde_json::Map::new();
        entry.insert("x".into(), Value::from(position.x));
        entry.insert("y".into(), Value::from(position.y));
        self.config
            .lock()
            .set(keys::WINDOW_POSITION, Value::Object(entry));
        debug!("Window position saved: {:?}", position);
        position
    }

    /// Rebase the game paths onto `folder`
    pub fn browse_folder(&self, folder: &Path) -> RebaseOutcome {
        self.paths.rebase(folder)
    }

    /// Current play statistics
    pub fn summary(&self) -> StatsSummary {
        self.stats.summary()
    }

    /// Availability of every game file
    pub fn file_report(&self) -> FileReport {
        self.paths.file_report()
    }

    /// Everything the status panel shows
    pub fn status(&self) -> LauncherStatus {
        let settings = self.config.lock().settings();
        LauncherStatus {
            stats: self.stats.summary(),
            language: settings.language,
            version: settings.version,
            theme: settings.theme,
            auto_launch: settings.auto_launch,
            files: self.paths.file_report(),
        }
    }

    fn transition(&mut self, next: LaunchState) {
        debug!("Launch state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: LauncherError) -> LauncherError {
        self.transition(LaunchState::Failed);
        warn!("Launch failed: {}", error);
        self.transition(LaunchState::Idle);
        error
    }
}

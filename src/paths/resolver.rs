//! Game file path resolution and folder rebasing

use crate::config::{Language, SharedConfig};
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Existence check result for one language variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Language variant
    pub language: Language,
    /// Configured path
    pub path: PathBuf,
    /// Whether the path exists right now
    pub exists: bool,
}

/// Existence check results for every language variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// One entry per language, in [`Language::ALL`] order
    pub files: Vec<FileStatus>,
}

impl FileReport {
    /// Whether every variant is present
    pub fn all_found(&self) -> bool {
        self.files.iter().all(|file| file.exists)
    }

    /// Status of one variant
    pub fn status(&self, language: Language) -> Option<&FileStatus> {
        self.files.iter().find(|file| file.language == language)
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File Test Results:")?;
        writeln!(f)?;
        for file in &self.files {
            let mark = if file.exists { "✅ Found" } else { "❌ Missing" };
            writeln!(f, "{} Version: {mark}", file.language)?;
        }
        let missing: Vec<_> = self.files.iter().filter(|file| !file.exists).collect();
        if !missing.is_empty() {
            writeln!(f)?;
            for file in missing {
                writeln!(
                    f,
                    "{} file path: {}",
                    file.language,
                    file.path.display()
                )?;
            }
        }
        Ok(())
    }
}

/// Entries a [`PathResolver::rebase`] call replaced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebaseOutcome {
    /// New Chinese game path, if one was found in the folder
    pub chinese: Option<PathBuf>,
    /// New English game path, if one was found in the folder
    pub english: Option<PathBuf>,
}

impl RebaseOutcome {
    /// Whether nothing was found in the folder
    pub fn is_empty(&self) -> bool {
        self.chinese.is_none() && self.english.is_none()
    }

    /// Status line for the presentation layer
    pub fn status_message(&self) -> &'static str {
        if self.is_empty() {
            "No game files found in the selected folder"
        } else {
            "Game folder updated"
        }
    }

    fn slot_mut(&mut self, language: Language) -> &mut Option<PathBuf> {
        match language {
            Language::Chinese => &mut self.chinese,
            Language::English => &mut self.english,
        }
    }
}

/// Resolves configured game files and validates them on disk
#[derive(Debug, Clone)]
pub struct PathResolver {
    config: SharedConfig,
}

impl PathResolver {
    /// Create a resolver over the shared store
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }

    /// Configured game file for `language`
    pub fn resolve(&self, language: Language) -> PathBuf {
        self.config.lock().game_path(language)
    }

    /// Whether the configured game file for `language` exists
    pub fn exists(&self, language: Language) -> bool {
        let path = self.resolve(language);
        let exists = path.exists();
        debug!(
            "{} game file {} exists: {}",
            language,
            path.display(),
            exists
        );
        exists
    }

    /// Point the configured paths at the game files inside `folder`
    ///
    /// Only candidates that exist replace the configured path; all
    /// replacements are written at once.
    pub fn rebase(&self, folder: &Path) -> RebaseOutcome {
        let mut outcome = RebaseOutcome::default();
        let mut entries = Vec::new();

        for language in Language::ALL {
            let candidate = folder.join(language.file_name());
            if candidate.exists() {
                entries.push((
                    language.path_key(),
                    Value::from(candidate.to_string_lossy().into_owned()),
                ));
                *outcome.slot_mut(language) = Some(candidate);
            } else {
                debug!("No {} game file at {}", language, candidate.display());
            }
        }

        if entries.is_empty() {
            info!("No game files found in {}", folder.display());
        } else {
            self.config.lock().update(entries);
            info!("Game folder set to {}", folder.display());
        }
        outcome
    }

    /// Check every language variant
    pub fn file_report(&self) -> FileReport {
        let files = Language::ALL
            .into_iter()
            .map(|language| {
                let path = self.resolve(language);
                let exists = path.exists();
                FileStatus {
                    language,
                    path,
                    exists,
                }
            })
            .collect();
        FileReport { files }
    }
}

//! `superball-launcher` - Launcher for the Super Ball HTML game
//!
//! Lets the player pick a language and version of the game, keeps the
//! preferences in a flat JSON settings file, tracks how often the game was
//! started, and opens the chosen HTML file in the default browser.
//!
//! `LauncherController` owns the shared `ConfigStore` handle and drives the
//! `PathResolver` and `StatsService` over it. Presentation is left to the
//! caller; the bundled binary is a thin text front-end.

// Module declarations
pub mod config;
pub mod controller;
pub mod error;
pub mod paths;
pub mod stats;
pub mod utils;

// Re-export commonly used types
pub use error::{LauncherError, Result};

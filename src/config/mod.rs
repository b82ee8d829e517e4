//! Settings management module
//!
//! This module handles loading, saving, and managing the launcher settings.
//! Settings are stored in `game_config.json` (a flat JSON object) with atomic
//! writes to prevent corruption. Keys the launcher does not know are kept.

pub mod manager;
pub mod models;

pub use manager::{ConfigStore, DEFAULT_CONFIG_FILE, SharedConfig};
pub use models::{Language, Settings, Theme, Version, WindowPosition, keys};

//! Launcher logic controller module
//!
//! This module turns user intents from the presentation layer into settings
//! updates and game launches.
//!
//! # Architecture
//!
//! - `LauncherController`: owns the shared settings handle and drives the
//!   `PathResolver`, the `StatsService` and a `GameOpener`
//! - `GameOpener`: seam for the "open in browser" collaborator;
//!   `BrowserOpener` is the real one
//! - **Single-threaded**: one launch request at a time, every request ends in
//!   `LaunchState::Idle`
//!
//! # Launch Flow
//!
//! ```text
//! Idle → Resolving → Validating ─┬→ Launching ─┬→ Idle
//!                                │             └→ Failed → Idle
//!                                └→ Failed → Idle
//! ```
//!
//! 1. **Resolving**: look up the configured file for the language
//! 2. **Validating**: a missing file fails with `GameFileNotFound`; nothing
//!    is recorded
//! 3. **Launching**: record the play (count and stamp in one write), then
//!    hand the absolute path to the opener; an opener error fails with
//!    `LaunchOpen`

pub mod launcher_controller;
pub mod opener;

pub use launcher_controller::{LaunchReport, LaunchState, LauncherController, LauncherStatus};
pub use opener::{BrowserOpener, GameOpener, OpenError};

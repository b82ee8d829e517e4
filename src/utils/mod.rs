//! Utility modules
//!
//! Provides logging initialization.

pub mod logging;

pub use logging::{init_logging, log_dir_for};

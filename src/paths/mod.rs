//! Game file path module
//!
//! Resolves the configured HTML file for each language variant, checks it
//! on disk, and rebases both entries onto a user-chosen game folder.
//! Existence is only ever checked at use time; a dangling configured path
//! is a normal state, not an error.

pub mod resolver;

pub use resolver::{FileReport, FileStatus, PathResolver, RebaseOutcome};

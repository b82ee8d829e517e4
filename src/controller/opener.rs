//! Hand-off of a game file to the system's default handler

use std::path::Path;

/// Error returned by a [`GameOpener`]
pub type OpenError = Box<dyn std::error::Error + Send + Sync>;

/// Opens a local game file outside the launcher
pub trait GameOpener {
    /// Open `path`, normally in the default web browser
    fn open(&self, path: &Path) -> Result<(), OpenError>;
}

/// Opens files with the OS default handler (a browser for `.html`)
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserOpener;

impl GameOpener for BrowserOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        open::that(path)?;
        Ok(())
    }
}

impl<F> GameOpener for F
where
    F: Fn(&Path) -> Result<(), OpenError>,
{
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        self(path)
    }
}

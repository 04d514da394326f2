//! Persistence port for the configuration document.
//!
//! The resolver never touches storage directly; it reads and writes raw
//! document text through a [`ConfigStore`]. [`JsonFileStore`] backs the
//! document with a file on disk, [`MemoryConfigStore`] keeps it in memory
//! for tests and embedded hosts.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

/// Storage for the raw configuration document.
pub trait ConfigStore {
    /// Read the stored document, or `None` if nothing has been written yet.
    fn load(&mut self) -> Result<Option<String>, ConfigError>;

    /// Replace the stored document.
    fn save(&mut self, document: &str) -> Result<(), ConfigError>;
}

/// A configuration document stored as a JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Store the document at `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for JsonFileStore {
    fn load(&mut self) -> Result<Option<String>, ConfigError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "Config file not found");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, document: &str) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, document)?;
        debug!(path = %self.path.display(), "Config file written");
        Ok(())
    }
}

/// An in-memory configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryConfigStore {
    contents: Option<String>,
    saves: u32,
}

impl MemoryConfigStore {
    /// A store that already holds `contents`.
    pub const fn with_contents(contents: String) -> Self {
        Self {
            contents: Some(contents),
            saves: 0,
        }
    }

    /// The currently stored document.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// How many times the document has been written.
    pub const fn saves(&self) -> u32 {
        self.saves
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&mut self) -> Result<Option<String>, ConfigError> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, document: &str) -> Result<(), ConfigError> {
        self.contents = Some(document.to_owned());
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }
}

//! Where map, tileset and config documents come from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::MapError;

/// Fetches documents by locator, synchronously to completion.
pub trait DocumentSource {
    /// Text of the document at `locator`; failures are `Io` errors.
    fn fetch_text(&self, locator: &str) -> Result<String, MapError>;
}

/// Reads documents from the filesystem, relative to `root`.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    /// Reads relative to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSource { root: root.into() }
    }

    /// Resolves locators against the current directory.
    pub fn cwd() -> Self {
        FileSource::new(".")
    }

    /// Filesystem path of `locator`.
    pub fn path_of(&self, locator: &str) -> PathBuf {
        self.root.join(locator)
    }
}

impl DocumentSource for FileSource {
    fn fetch_text(&self, locator: &str) -> Result<String, MapError> {
        std::fs::read_to_string(self.path_of(locator)).map_err(|source| MapError::Io {
            locator: locator.to_owned(),
            source,
        })
    }
}

/// Documents held in memory, keyed by locator.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    docs: HashMap<String, String>,
}

impl MemorySource {
    /// No documents.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document, builder style.
    pub fn with(mut self, locator: &str, text: &str) -> Self {
        self.insert(locator, text);
        self
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, locator: &str, text: &str) {
        self.docs.insert(locator.to_owned(), text.to_owned());
    }
}

impl DocumentSource for MemorySource {
    fn fetch_text(&self, locator: &str) -> Result<String, MapError> {
        self.docs.get(locator).cloned().ok_or_else(|| MapError::Io {
            locator: locator.to_owned(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"),
        })
    }
}

/// Locator of `relative` next to the document at `base`.
pub fn sibling(base: &str, relative: &str) -> String {
    let dir = Path::new(base).parent().unwrap_or_else(|| Path::new(""));
    dir.join(relative).to_string_lossy().into_owned()
}

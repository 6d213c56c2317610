//! Storage for the best-scores table
//!
//! Stores hand raw JSON text back and forth; parsing and recovery from bad
//! data belong to the caller. Failures here are never fatal to a game.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O failed")]
    Io(#[from] io::Error),
    #[error("stored data is not valid")]
    Json(#[from] serde_json::Error),
}

/// Somewhere the best-scores table can live between runs
pub trait ScoreStore {
    /// Stored text, or `None` if nothing has been saved yet
    fn load(&self) -> Result<Option<String>, PersistenceError>;
    fn save(&mut self, json: &str) -> Result<(), PersistenceError>;
}

/// JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write to a sibling temp file, then rename over the target
    fn save(&mut self, json: &str) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// In-memory store, used when no file is configured and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub contents: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.contents.clone())
    }

    fn save(&mut self, json: &str) -> Result<(), PersistenceError> {
        self.contents = Some(json.to_string());
        Ok(())
    }
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load(&self) -> Result<Option<String>, PersistenceError> {
        (**self).load()
    }

    fn save(&mut self, json: &str) -> Result<(), PersistenceError> {
        (**self).save(json)
    }
}

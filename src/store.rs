//! Persistence of the user's default gradient.
//!
//! The record is stored as JSON under [`DEFAULT_GRADIENT_KEY`]. Writes are
//! last-write-wins; a missing or unreadable record falls back to
//! [`fallback_gradient`].

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;

use crate::config::GradientConfig;
use crate::error::StyleError;

pub const DEFAULT_GRADIENT_KEY: &str = "iconStyler.defaultGradient";

/// The gradient used when nothing has been stored.
pub fn fallback_gradient() -> GradientConfig {
    GradientConfig::new(135.0, "#667eea", "#764ba2")
}

/// A string key/value store for persisted settings.
pub trait GradientStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StyleError>;
    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StyleError>;
}

/// Returns the stored default gradient, or [`fallback_gradient`] if none is
/// stored or the record cannot be read.
pub fn default_gradient(store: &dyn GradientStore) -> GradientConfig {
    let raw = match store.load_raw(DEFAULT_GRADIENT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback_gradient(),
        Err(err) => {
            warn!("could not read default gradient: {err}");
            return fallback_gradient();
        }
    };

    serde_json::from_str(&raw).unwrap_or_else(|err| {
        warn!("ignoring corrupt default gradient record: {err}");
        fallback_gradient()
    })
}

pub fn save_default_gradient(
    store: &mut dyn GradientStore,
    gradient: &GradientConfig,
) -> Result<(), StyleError> {
    store.save_raw(DEFAULT_GRADIENT_KEY, &serde_json::to_string(gradient)?)
}

// ============================================================================
// Implementations
// ============================================================================

/// In-memory store, for tests and embedders with their own persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryGradientStore {
    entries: HashMap<String, String>,
}

impl MemoryGradientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GradientStore for MemoryGradientStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StyleError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StyleError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileGradientStore {
    dir: PathBuf,
}

impl FileGradientStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl GradientStore for FileGradientStore {
    fn load_raw(&self, key: &str) -> Result<Option<String>, StyleError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save_raw(&mut self, key: &str, value: &str) -> Result<(), StyleError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

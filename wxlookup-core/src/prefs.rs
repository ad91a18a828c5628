use anyhow::{Context, Result};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

use crate::units::UnitMode;

/// The two remembered values: last searched city and unit mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub units: Option<UnitMode>,
}

impl Preferences {
    pub fn unit_mode(&self) -> UnitMode {
        self.units.unwrap_or_default()
    }
}

/// Read once at startup, written through on every change.
pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> Result<Preferences>;
    fn save(&self, prefs: &Preferences) -> Result<()>;
}

/// TOML file under the platform data directory.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences: {}", self.path.display()))?;

        // A corrupt file only costs the remembered values.
        match toml::from_str(&contents) {
            Ok(prefs) => Ok(prefs),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring unreadable preferences");
                Ok(Preferences::default())
            }
        }
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(prefs).context("Failed to serialize preferences")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write preferences: {}", self.path.display()))?;

        Ok(())
    }
}

/// Keeps preferences for the life of the process only.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    inner: Mutex<Preferences>,
}

impl MemoryPreferenceStore {
    pub fn new(prefs: Preferences) -> Self {
        Self {
            inner: Mutex::new(prefs),
        }
    }

    pub fn snapshot(&self) -> Preferences {
        self.inner.lock().clone()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Preferences> {
        Ok(self.snapshot())
    }

    fn save(&self, prefs: &Preferences) -> Result<()> {
        *self.inner.lock() = prefs.clone();
        Ok(())
    }
}

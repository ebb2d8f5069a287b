//! User configuration for the Novus stage.
//!
//! The configuration is owned by the host and may change at any time, so the
//! core asks a [`ConfigSource`] for a fresh copy on every callback.

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;

/// Feature toggles for the Novus stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NovusConfig {
    /// Show the relic info window while a Novus relic is equipped
    pub display_relic_info: bool,
    /// Append the light value to the RelicGlass light text
    pub show_numbers_in_relic_glass: bool,
    /// Overwrite the analyze text with the light text so the glass does not animate
    pub suppress_bonus_animation: bool,
}

impl Default for NovusConfig {
    fn default() -> Self {
        Self {
            display_relic_info: true,
            show_numbers_in_relic_glass: true,
            suppress_bonus_animation: false,
        }
    }
}

/// Read-only access to the current configuration
pub trait ConfigSource {
    fn read(&self) -> Result<NovusConfig>;
}

impl<T: ConfigSource + ?Sized> ConfigSource for &T {
    fn read(&self) -> Result<NovusConfig> {
        (**self).read()
    }
}

/// In-memory configuration that can be swapped between callbacks
#[derive(Debug, Default)]
pub struct StaticConfig {
    config: Cell<NovusConfig>,
}

impl StaticConfig {
    pub fn new(config: NovusConfig) -> Self {
        Self {
            config: Cell::new(config),
        }
    }

    pub fn set(&self, config: NovusConfig) {
        self.config.set(config);
    }
}

impl ConfigSource for StaticConfig {
    fn read(&self) -> Result<NovusConfig> {
        Ok(self.config.get())
    }
}

/// TOML configuration file, re-read on every call.
///
/// A missing file yields the defaults; a malformed file is an error.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfig {
    fn read(&self) -> Result<NovusConfig> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Config file {} not found, using defaults", self.path.display());
                return Ok(NovusConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(toml::from_str(&content)?)
    }
}

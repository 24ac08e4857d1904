//=========================================================================
// Engine Configuration
//=========================================================================
//
// Optional TOML settings for the runtime and the show's variants.
//
// Every field has a default, so an empty file (or no file) is valid:
//
//   tps = 60.0
//   channel_capacity = 128
//   window_title = "Reveal"
//   ambient = "stop"      # or "loop"
//   gifts = "keepsakes"   # or "plain"
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::decor::CatalogKind;
use crate::core::scene::AmbientMode;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

//=== EngineConfig ========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Logic thread ticks per second.
    pub tps: f64,

    /// Capacity of the platform → logic channel.
    pub channel_capacity: usize,

    pub window_title: String,

    /// What the media scene's track does when it ends.
    pub ambient: AmbientMode,

    /// Which gift catalog the decoration page offers.
    pub gifts: CatalogKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            window_title: String::from("Reveal"),
            ambient: AmbientMode::default(),
            gifts: CatalogKind::default(),
        }
    }
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or unknown enum values,
    /// [`ConfigError::Invalid`] for out-of-range numbers.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&source)
    }

    /// Checks the invariants [`crate::EngineBuilder`] would otherwise assert.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tps.is_finite() && self.tps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tps must be positive, got {}",
                self.tps
            )));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid(String::from(
                "channel_capacity must be positive",
            )));
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

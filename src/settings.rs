//! Laser settings
//!
//! Loaded once at startup from a JSON file; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_ACTIVATION_FRAMES, DEFAULT_MAX_BENT_LASERS, DEFAULT_MAX_LASERS};

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Pool sizes and default timings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    /// Straight laser pool capacity
    pub max_lasers: usize,
    /// Bent laser pool capacity
    pub max_bent_lasers: usize,
    /// Expand duration used by scripts that don't pick one
    pub default_activation_frames: u32,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            max_lasers: DEFAULT_MAX_LASERS,
            max_bent_lasers: DEFAULT_MAX_BENT_LASERS,
            default_activation_frames: DEFAULT_ACTIVATION_FRAMES,
        }
    }
}

impl LaserSettings {
    /// Parse settings from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded laser settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given, otherwise defaults; failures fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path.map(Self::load) {
            Some(Ok(settings)) => settings,
            Some(Err(e)) => {
                log::warn!("Using default laser settings: {}", e);
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp a zero frame count to one; zero capacities are allowed but noted
    pub fn validated(mut self) -> Self {
        if self.default_activation_frames == 0 {
            log::warn!("default_activation_frames = 0, using 1");
            self.default_activation_frames = 1;
        }
        if self.max_lasers == 0 || self.max_bent_lasers == 0 {
            log::warn!(
                "Laser pool with zero capacity (straight {}, bent {}): spawns will be dropped",
                self.max_lasers,
                self.max_bent_lasers
            );
        }
        self
    }
}

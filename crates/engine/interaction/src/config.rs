//! Controller configuration
//!
//! One TOML document configures the whole rig:
//!
//! ```toml
//! eye_height = 1.7
//!
//! [look]
//! movement_speed = 4.0
//! pitch_limit = 65.0
//!
//! [inspection]
//! interact_range = 3.0
//! zoom_distance = 1.5
//!
//! [inspection.transition]
//! time = 0.5
//! blend = "from_current"
//! ```
//!
//! Every field is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::inspection::InspectionConfig;
use crate::look::LookConfig;

/// Combined configuration for a first-person inspection rig
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Camera height above the actor origin
    pub eye_height: f32,
    pub look: LookConfig,
    pub inspection: InspectionConfig,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            eye_height: 1.7,
            look: LookConfig::default(),
            inspection: InspectionConfig::default(),
        }
    }
}

impl RigConfig {
    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.eye_height.is_finite() {
            return Err(Error::invalid("eye_height", "must be finite"));
        }
        self.look.validate()?;
        self.inspection.validate()
    }

    /// Serialize back to TOML, e.g. to write out the defaults
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::invalid("config", e.to_string()))
    }
}

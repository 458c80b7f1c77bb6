/*
 * Config Module
 *
 * Everything needed to build a `Simulation`, loadable from and savable to a
 * JSON file. Missing fields fall back to their defaults, so a config file
 * only has to name what it changes.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::boid::Bounds;
use crate::error::ConfigError;
use crate::params::SimulationParams;
use crate::ripples::{DEFAULT_MAX_RIPPLES, DEFAULT_RIPPLE_DELAY};
use crate::style::Style;

/// Visible area plus the off-screen margin creatures wrap through.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            margin: 100.0,
        }
    }
}

impl AreaConfig {
    pub fn bounds(&self) -> Bounds {
        Bounds::with_margin(self.width, self.height, self.margin)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub area: AreaConfig,
    pub params: SimulationParams,
    pub style: Style,
    pub max_ripples: usize,
    /// Ripple lifetime in seconds of simulation time.
    pub ripple_delay: f32,
    /// Fixed seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            area: AreaConfig::default(),
            params: SimulationParams::default(),
            style: Style::default(),
            max_ripples: DEFAULT_MAX_RIPPLES,
            ripple_delay: DEFAULT_RIPPLE_DELAY,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let area = &self.area;
        if !(area.width.is_finite() && area.height.is_finite() && area.margin.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "area",
                reason: "must only contain finite numbers",
            });
        }
        if area.width <= 0.0 || area.height <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "area",
                reason: "width and height must be positive",
            });
        }
        if area.margin < 0.0 {
            return Err(ConfigError::Invalid {
                field: "area.margin",
                reason: "must not be negative",
            });
        }
        if !self.ripple_delay.is_finite() || self.ripple_delay < 0.0 {
            return Err(ConfigError::Invalid {
                field: "ripple_delay",
                reason: "must be a non-negative number of seconds",
            });
        }
        if !self.style.outline_width.is_finite() {
            return Err(ConfigError::Invalid {
                field: "style.outlineWidth",
                reason: "must be finite",
            });
        }
        self.params.validate()
    }
}

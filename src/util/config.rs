use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::domain::{FuelProfiles, NavigateParams};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "CargoRoutePlanner";
const APP_NAME: &str = "CargoRoutePlanner";
const CONFIG_FILE: &str = "planner.json";

/// Tunables of the route planner. Every field falls back to its default when
/// missing from the file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConfig {
    pub fuel_profiles: FuelProfiles,
    pub navigation: NavigateParams,
}

impl PlannerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (class, profile) in self.fuel_profiles.iter() {
            if !profile.multiplier.is_finite() || profile.multiplier < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "fuel multiplier for {class} must be a non-negative number, got {}",
                    profile.multiplier
                )));
            }
        }
        let nav = &self.navigation;
        if !nav.range.is_finite() || nav.range < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "navigation range must be a non-negative number, got {}",
                nav.range
            )));
        }
        if !nav.fuel_margin.is_finite() || nav.fuel_margin < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fuel margin must be a non-negative percentage, got {}",
                nav.fuel_margin
            )));
        }
        Ok(())
    }
}

/// `<config dir>/planner.json` for the current user, when one can be resolved.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn load_config(path: &Path) -> Result<PlannerConfig, ConfigError> {
    let data = fs::read_to_string(path)?;
    PlannerConfig::from_json(&data)
}

/// Loads the per-user config, or the built-in defaults when there is none.
pub fn load_default_config() -> Result<PlannerConfig, ConfigError> {
    let Some(path) = default_config_path() else {
        return Ok(PlannerConfig::default());
    };
    match load_config(&path) {
        Err(ConfigError::Read(err)) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no planner config, using defaults");
            Ok(PlannerConfig::default())
        }
        other => other,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] SerdeError),
    #[error("invalid config: {0}")]
    Invalid(String),
}

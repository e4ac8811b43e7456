/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{DispatchError, Floor};

/***************************************/
/*               Errors                */
/***************************************/
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub building: BuildingConfig,
    pub timing: TimingConfig,
    pub scaler: ScalerConfig,
    pub dispatch: DispatchConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BuildingConfig {
    pub min_floor: Floor,
    pub max_floor: Floor,
    pub n_elevators: u32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub time_per_floor: u32,
    pub stop_time: u32,
    pub direction_reversal_penalty: u32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScalerConfig {
    pub traffic_threshold: u32,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    pub power_saving: PowerSavingPolicy,
    pub power_saving_penalty: u32,
}

/// How hall call dispatch treats elevators the scaler put in power-saving mode.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PowerSavingPolicy {
    /// Power-saving elevators compete for hall calls like any other.
    #[default]
    Operational,
    /// Power-saving elevators only receive hall calls when no active elevator exists.
    Excluded,
    /// Power-saving elevators have `power_saving_penalty` added to their cost.
    Penalized,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            min_floor: 0,
            max_floor: 27,
            n_elevators: 3,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            time_per_floor: 2,
            stop_time: 5,
            direction_reversal_penalty: 10,
        }
    }
}

impl Default for ScalerConfig {
    fn default() -> Self {
        ScalerConfig {
            traffic_threshold: 10,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            power_saving: PowerSavingPolicy::Operational,
            power_saving_penalty: 10,
        }
    }
}

impl BuildingConfig {
    pub fn contains(&self, floor: Floor) -> bool {
        (self.min_floor..=self.max_floor).contains(&floor)
    }

    /// Rejects floors outside the building.
    pub fn check_floor(&self, floor: Floor) -> Result<Floor, DispatchError> {
        if self.contains(floor) {
            Ok(floor)
        } else {
            Err(DispatchError::FloorOutOfRange {
                floor,
                min: self.min_floor,
                max: self.max_floor,
            })
        }
    }

    /// Floor new elevators are parked at: 0, or the nearest bound if 0 is outside the building.
    pub fn ground_floor(&self) -> Floor {
        0.clamp(self.min_floor, self.max_floor)
    }
}

impl Config {
    pub fn from_toml_str(config_str: &str) -> Result<Config, ConfigError> {
        let config: Config = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.building.min_floor > self.building.max_floor {
            return Err(ConfigError::Invalid(format!(
                "min_floor {} is above max_floor {}",
                self.building.min_floor, self.building.max_floor
            )));
        }
        if self.building.n_elevators == 0 {
            return Err(ConfigError::Invalid(
                "n_elevators must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml_str(&config_str)
}

/***************************************/
/*             Unit tests              */
/***************************************/

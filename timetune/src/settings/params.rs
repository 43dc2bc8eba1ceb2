// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use std::str::FromStr;

use serde::Deserialize;
use tracing::error;

use crate::{
    config::{Config, EstimatorConfig, Logging, LoggingOutput, LoggingRotation},
    error::Error,
    estimator::DurationRange,
};

const TARGET_PARAMS: &str = "TimeTune-Params";

#[derive(Debug, Deserialize, Default)]
pub struct Params {
    #[serde(default)]
    timetune: TimeTuneParams,
}

impl Params {
    pub fn from_env() -> Result<Self, Error> {
        Ok(Self {
            timetune: TimeTuneParams::from_env("TIMETUNE")?,
        })
    }

    /// `other_config` wins wherever it holds a non-default value.
    pub fn mix_config(&self, other_config: Params) -> Self {
        Self {
            timetune: self.timetune.mix_config(other_config.timetune),
        }
    }
}

impl TryFrom<Params> for Config {
    type Error = Error;

    fn try_from(params: Params) -> Result<Self, Self::Error> {
        let TimeTuneParams { estimator, logging } = params.timetune;

        // Reject inverted ranges before the server starts.
        DurationRange::new(estimator.min_minutes, estimator.max_minutes)?;

        Ok(Self {
            estimator: EstimatorConfig {
                min_minutes: estimator.min_minutes,
                max_minutes: estimator.max_minutes,
                seed: estimator.seed,
            },
            logging: Logging {
                output: LoggingOutput::from_str(&logging.output)?,
                file_path: logging.file_path,
                rotation: LoggingRotation::from_str(&logging.rotation)?,
                max_size: logging.max_size,
                max_files: logging.max_files,
                level: logging.level,
            },
        })
    }
}

#[derive(Debug, Deserialize, Default)]
struct TimeTuneParams {
    #[serde(default)]
    estimator: EstimatorParams,
    #[serde(default)]
    logging: LoggingParams,
}

impl TimeTuneParams {
    fn from_env(parent: &str) -> Result<Self, Error> {
        Ok(Self {
            estimator: EstimatorParams::from_env(&format!("{parent}_"))?,
            logging: LoggingParams::from_env(&format!("{parent}_"))?,
        })
    }

    fn mix_config(&self, other_config: TimeTuneParams) -> Self {
        Self {
            estimator: self.estimator.mix_config(other_config.estimator),
            logging: self.logging.mix_config(other_config.logging),
        }
    }
}

fn from_env<T>(prefix: &str) -> Result<T, Error>
where
    T: for<'de> Deserialize<'de>,
{
    let mut config = config::Config::builder();
    config = config.add_source(
        config::Environment::with_prefix(prefix).try_parsing(true),
    );

    let config = config.build().map_err(|e| {
        error!(TARGET_PARAMS, "Error building config: {}", e);
        Error::Config(format!("Error building config: {}", e))
    })?;

    config.try_deserialize().map_err(|e| {
        error!(TARGET_PARAMS, "Error try deserialize config: {}", e);
        Error::Config(format!("Error try deserialize config: {}", e))
    })
}

#[derive(Debug, Deserialize, Clone)]
struct EstimatorParams {
    #[serde(default = "default_min_minutes")]
    min_minutes: u32,
    #[serde(default = "default_max_minutes")]
    max_minutes: u32,
    #[serde(default)]
    seed: Option<u64>,
}

fn default_min_minutes() -> u32 {
    30
}

fn default_max_minutes() -> u32 {
    60
}

impl Default for EstimatorParams {
    fn default() -> Self {
        Self {
            min_minutes: default_min_minutes(),
            max_minutes: default_max_minutes(),
            seed: None,
        }
    }
}

impl EstimatorParams {
    fn from_env(parent: &str) -> Result<Self, Error> {
        from_env(&format!("{parent}ESTIMATOR"))
    }

    fn mix_config(&self, other_config: EstimatorParams) -> Self {
        let min_minutes = if other_config.min_minutes != default_min_minutes() {
            other_config.min_minutes
        } else {
            self.min_minutes
        };

        let max_minutes = if other_config.max_minutes != default_max_minutes() {
            other_config.max_minutes
        } else {
            self.max_minutes
        };

        Self {
            min_minutes,
            max_minutes,
            seed: other_config.seed.or(self.seed),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
struct LoggingParams {
    #[serde(default = "default_log_output")]
    pub output: String, // "stdout" | "file" | "stdout,file"
    #[serde(default = "default_log_file_path")]
    pub file_path: String,
    #[serde(default = "default_log_rotation")]
    pub rotation: String,
    #[serde(default = "default_log_max_size")]
    pub max_size: u64, // bytes
    #[serde(default = "default_log_max_files")]
    pub max_files: usize,
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_output() -> String {
    "stdout".into()
}
fn default_log_file_path() -> String {
    "logs".into()
}
fn default_log_rotation() -> String {
    "size".into()
}
fn default_log_max_size() -> u64 {
    100 * 1024 * 1024
}
fn default_log_max_files() -> usize {
    3
}
fn default_log_level() -> String {
    "info".into()
}

impl Default for LoggingParams {
    fn default() -> Self {
        LoggingParams {
            output: default_log_output(),
            file_path: default_log_file_path(),
            rotation: default_log_rotation(),
            max_size: default_log_max_size(),
            max_files: default_log_max_files(),
            level: default_log_level(),
        }
    }
}

impl LoggingParams {
    /// Reads `TIMETUNE_LOGGING_*` variables.
    fn from_env(parent: &str) -> Result<Self, Error> {
        from_env(&format!("{parent}LOGGING"))
    }

    fn mix_config(&self, other: LoggingParams) -> LoggingParams {
        LoggingParams {
            output: if other.output != default_log_output() {
                other.output
            } else {
                self.output.clone()
            },
            file_path: if other.file_path != default_log_file_path() {
                other.file_path
            } else {
                self.file_path.clone()
            },
            rotation: if other.rotation != default_log_rotation() {
                other.rotation
            } else {
                self.rotation.clone()
            },
            max_size: if other.max_size != default_log_max_size() {
                other.max_size
            } else {
                self.max_size
            },
            max_files: if other.max_files != default_log_max_files() {
                other.max_files
            } else {
                self.max_files
            },
            level: if other.level != default_log_level() {
                other.level
            } else {
                self.level.clone()
            },
        }
    }
}

// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

//! # Configuration module

use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Service configuration.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Duration estimator settings.
    pub estimator: EstimatorConfig,
    /// Logging parameters.
    pub logging: Logging,
}

/// Estimator configuration.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Lower bound of the drawn duration, in minutes.
    pub min_minutes: u32,
    /// Upper bound of the drawn duration, in minutes (inclusive).
    pub max_minutes: u32,
    /// Seed for a reproducible sequence of draws.
    pub seed: Option<u64>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_minutes: 30,
            max_minutes: 60,
            seed: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Logging {
    pub output: LoggingOutput,
    pub file_path: String,
    pub rotation: LoggingRotation,
    pub max_size: u64,
    pub max_files: usize,
    pub level: String,
}

impl Logging {
    /// Whether any log sink is enabled.
    pub fn logs(&self) -> bool {
        self.output.stdout || self.output.file
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            output: LoggingOutput::default(),
            file_path: "logs".to_owned(),
            rotation: LoggingRotation::default(),
            max_size: 100 * 1024 * 1024,
            max_files: 3,
            level: "info".to_owned(),
        }
    }
}

/// Enabled log sinks.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoggingOutput {
    pub stdout: bool,
    pub file: bool,
}

impl Default for LoggingOutput {
    fn default() -> Self {
        Self {
            stdout: true,
            file: false,
        }
    }
}

impl FromStr for LoggingOutput {
    type Err = Error;

    /// Parses a comma separated list of sinks, e.g. `stdout,file`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut output = LoggingOutput {
            stdout: false,
            file: false,
        };
        for sink in s.split(',').map(str::trim).filter(|x| !x.is_empty()) {
            match sink.to_lowercase().as_str() {
                "stdout" => output.stdout = true,
                "file" => output.file = true,
                other => {
                    return Err(Error::Config(format!(
                        "Unknown logging output '{}'",
                        other
                    )));
                }
            }
        }
        Ok(output)
    }
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LoggingRotation {
    #[default]
    Size,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl FromStr for LoggingRotation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "size" => Ok(Self::Size),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            other => Err(Error::Config(format!(
                "Unknown logging rotation '{}'",
                other
            ))),
        }
    }
}

// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

//! # Estimator module
//!
//! Produces the study time, in minutes, predicted for a single subject.

use std::sync::Mutex;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::{config::EstimatorConfig, error::Error};

const TARGET_ESTIMATOR: &str = "TimeTune-Estimator";

/// Closed interval of minutes a duration is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationRange {
    min: u32,
    max: u32,
}

impl DurationRange {
    pub fn new(min: u32, max: u32) -> Result<Self, Error> {
        if min > max {
            return Err(Error::Config(format!(
                "Invalid duration range: min_minutes ({}) is greater than max_minutes ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes)
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self { min: 30, max: 60 }
    }
}

/// Predicts a study duration for a subject.
pub trait Estimator: Send + Sync {
    fn estimate(&self, subject: &str) -> u32;
}

enum Source {
    Thread,
    Seeded(Mutex<StdRng>),
}

/// Draws every duration uniformly from a [`DurationRange`], ignoring the
/// subject itself.
pub struct RandomEstimator {
    range: DurationRange,
    source: Source,
}

impl RandomEstimator {
    pub fn new(range: DurationRange) -> Self {
        Self {
            range,
            source: Source::Thread,
        }
    }

    pub fn seeded(range: DurationRange, seed: u64) -> Self {
        Self {
            range,
            source: Source::Seeded(Mutex::new(StdRng::seed_from_u64(seed))),
        }
    }

    pub fn range(&self) -> DurationRange {
        self.range
    }
}

impl TryFrom<&EstimatorConfig> for RandomEstimator {
    type Error = Error;

    fn try_from(config: &EstimatorConfig) -> Result<Self, Self::Error> {
        let range = DurationRange::new(config.min_minutes, config.max_minutes)?;
        Ok(match config.seed {
            Some(seed) => Self::seeded(range, seed),
            None => Self::new(range),
        })
    }
}

impl Estimator for RandomEstimator {
    fn estimate(&self, subject: &str) -> u32 {
        let bounds = self.range.min..=self.range.max;
        let minutes = match &self.source {
            Source::Thread => rand::rng().random_range(bounds),
            Source::Seeded(rng) => {
                // A panic while holding the lock leaves the generator usable.
                let mut rng = rng.lock().unwrap_or_else(|e| e.into_inner());
                rng.random_range(bounds)
            }
        };
        debug!(TARGET_ESTIMATOR, subject, minutes, "Duration drawn");
        minutes
    }
}

// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

//! # TimeTune
//!
//! Study-time prediction for the TimeTune planner. Given the subjects a
//! student is taking, [`Predictor::predict`] returns how many minutes to
//! study each one. The current estimator draws a mock duration per subject
//! from a configurable range (30 to 60 minutes by default).

use std::{future::Future, sync::Arc};

pub use tokio_util::sync::CancellationToken;
use tracing::info;

pub mod config;
pub mod error;
pub mod estimator;
pub mod model;
pub mod settings;
pub use clap;

pub use crate::config::{
    Config, EstimatorConfig, Logging, LoggingOutput, LoggingRotation,
};
pub use error::Error;
pub use estimator::{DurationRange, Estimator, RandomEstimator};
pub use model::{PredictRequest, StudyTimes};

const TARGET_PREDICTOR: &str = "TimeTune-Predictor";

#[derive(Clone)]
pub struct Predictor {
    estimator: Arc<dyn Estimator>,
    cancellation: CancellationToken,
}

impl Predictor {
    /// Builds the predictor and cancels its token on Ctrl-C.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(
        settings: &Config,
        token: Option<CancellationToken>,
    ) -> Result<Self, Error> {
        let estimator = RandomEstimator::try_from(&settings.estimator)?;
        let range = estimator.range();
        info!(
            TARGET_PREDICTOR,
            min_minutes = range.min(),
            max_minutes = range.max(),
            seeded = settings.estimator.seed.is_some(),
            "Predictor ready"
        );

        let token = token.unwrap_or_default();
        Self::bind_with_shutdown(token.clone(), tokio::signal::ctrl_c());

        Ok(Self::with_estimator(Arc::new(estimator), token))
    }

    pub fn with_estimator(
        estimator: Arc<dyn Estimator>,
        token: CancellationToken,
    ) -> Self {
        Self {
            estimator,
            cancellation: token,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancellation
    }

    fn bind_with_shutdown(
        token: CancellationToken,
        shutdown_signal: impl Future + Send + 'static,
    ) {
        let cancellation_token = token.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            cancellation_token.cancel();
        });
    }

    /// One independent draw per subject; a repeated subject keeps its first
    /// position and the value of its last draw.
    pub fn predict(&self, request: &PredictRequest) -> StudyTimes {
        let mut study_times = StudyTimes::new();
        for subject in &request.subjects {
            study_times.insert(subject.as_str(), self.estimator.estimate(subject));
        }
        study_times
    }
}

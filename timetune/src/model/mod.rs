// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

//! Request and response model of the prediction endpoint.

pub mod request;
pub mod study_times;

pub use request::PredictRequest;
pub use study_times::StudyTimes;

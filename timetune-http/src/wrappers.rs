// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prediction request. Fields other than `subjects` are accepted and ignored.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PredictRequestInfo {
    /// Subjects to predict a study time for. Missing means none.
    pub subjects: Option<Vec<String>>,
}

/// Predicted minutes of study keyed by subject.
///
/// The schema is a plain object; the served body lists keys in the order
/// each subject first appears in the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StudyTimesInfo(pub HashMap<String, u32>);

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Machine readable error code.
    pub error: String,
    pub message: String,
}

impl From<&timetune::Error> for ErrorInfo {
    fn from(value: &timetune::Error) -> Self {
        Self {
            error: value.code().to_owned(),
            message: value.to_string(),
        }
    }
}

// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use crate::{
    server::*,
    wrappers::{ErrorInfo, PredictRequestInfo, StudyTimesInfo},
};
use utoipa::OpenApi;
/// TimeTune HTTP
///
/// Study-time prediction API of the TimeTune planner.
///
/// # Configuration
///
/// The documentation is only served when `TIMETUNE_HTTP_DOC=true`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TimeTune HTTP",
        description = "Predicts how many minutes a student should study each of their subjects.",
        version = "0.1.0",
        license(
            name = "AGPL-3.0-only",
            url = "https://www.gnu.org/licenses/agpl-3.0.html"
        )
    ),
    paths(
        predict
    ),
    components(
        schemas(
            PredictRequestInfo,
            StudyTimesInfo,
            ErrorInfo
        )
    ),
    tags(
        (name = "Prediction", description = "Endpoints related to study-time prediction."),
    )
)]
pub struct ApiDoc;

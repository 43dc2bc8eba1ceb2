// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use std::sync::Arc;

use crate::{
    environment::DEFAULT_BODY_LIMIT,
    error::Error,
    middleware::{cors_layer, tower_trace},
    wrappers::{ErrorInfo, PredictRequestInfo, StudyTimesInfo},
};
use axum::{
    Extension, Json, Router,
    extract::{DefaultBodyLimit, rejection::BytesRejection},
    http::StatusCode,
    routing::post,
};
use bytes::Bytes;
use timetune::{PredictRequest, Predictor, StudyTimes};
use tower::ServiceBuilder;
use tracing::debug;

use crate::doc::ApiDoc;
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

/// Settings fixed when the routes are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoutesConfig {
    /// Serve the OpenAPI document and RapiDoc under `/doc`.
    pub doc: bool,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            doc: false,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Predict Study Times
///
/// Returns the minutes to study each subject of the request. Every subject
/// gets an independent draw between 30 and 60 minutes, so repeated requests
/// may answer with different values. Repeated subjects appear once.
///
/// # Parameters
///
/// * `Extension(predictor): Extension<Arc<Predictor>>` - The predictor extension wrapped in an `Arc`.
/// * `body: Result<Bytes, BytesRejection>` - The raw request body. It is parsed as JSON whatever its `Content-Type`.
///
/// # Returns
///
/// * `Result<Json<StudyTimes>, Error>` - The study time per subject or a JSON error.
#[utoipa::path(
    post,
    path = "/predict",
    operation_id = "Predict Study Times",
    tag = "Prediction",
    request_body(content = PredictRequestInfo, content_type = "application/json", description = "Subjects the student is studying"),
    responses(
        (status = 200, description = "Study time per subject, in minutes. Keys follow the order in which each subject first appears in the request.", body = StudyTimesInfo,
        example = json!(
            {
                "Math": 42,
                "Physics": 55,
                "History": 30
            }
        )),
        (status = 400, description = "Malformed request", body = ErrorInfo,
        example = json!(
            {
                "error": "malformed_request",
                "message": "Malformed request: expected a JSON object, found array"
            }
        )),
        (status = 413, description = "Request body over the configured limit", body = ErrorInfo,
        example = json!(
            {
                "error": "payload_too_large",
                "message": "Payload too large: Failed to buffer the request body: length limit exceeded"
            }
        )),
    )
)]
pub async fn predict(
    Extension(predictor): Extension<Arc<Predictor>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<StudyTimes>, Error> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            timetune::Error::PayloadTooLarge(rejection.body_text())
        } else {
            timetune::Error::MalformedRequest(rejection.body_text())
        }
    })?;
    let request = PredictRequest::from_slice(&body)?;
    debug!("Predicting study time for {} subjects", request.subjects.len());
    Ok(Json(predictor.predict(&request)))
}

pub fn build_routes(predictor: Predictor, config: RoutesConfig) -> Router {
    let predictor = Arc::new(predictor);
    let routes = Router::new()
        .route("/predict", post(predict))
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(config.body_limit))
                .layer(Extension(predictor)),
        );

    if config.doc {
        Router::new().merge(routes).merge(
            RapiDoc::with_openapi("/doc/timetune.json", ApiDoc::openapi())
                .path("/doc"),
        )
    } else {
        Router::new().merge(routes)
    }
}

/// Routes with request tracing and permissive CORS applied.
pub fn build_app(predictor: Predictor, config: RoutesConfig) -> Router {
    tower_trace(build_routes(predictor, config)).layer(cors_layer())
}

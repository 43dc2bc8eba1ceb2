// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

use crate::wrappers::ErrorInfo;

// Error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TimeTune(#[from] timetune::Error),
    #[error("Server error: {0}")]
    Server(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::TimeTune(error) if error.is_request_error() => {
                debug!("Rejected request: {}", error);
                let status = match &error {
                    timetune::Error::PayloadTooLarge(_) => {
                        StatusCode::PAYLOAD_TOO_LARGE
                    }
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, Json(ErrorInfo::from(&error))).into_response()
            }
            Error::TimeTune(error) => {
                error!("{}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorInfo::from(&error)),
                )
                    .into_response()
            }
            Error::Server(error) => {
                error!("{}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorInfo {
                        error: "server".to_owned(),
                        message: error,
                    }),
                )
                    .into_response()
            }
        }
    }
}

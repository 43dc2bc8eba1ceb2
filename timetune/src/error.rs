// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

//! # Error module.
//!

use thiserror::Error;

use serde::{Deserialize, Serialize};

/// Error type.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Error {
    /// The request body is absent, is not JSON or is not a JSON object.
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    /// An entry of `subjects` is not a string.
    #[error("Invalid subject entry at position {index}: expected a string, found {found}")]
    InvalidSubjectEntry { index: usize, found: String },
    /// The request body exceeds the configured size limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    /// Settings error.
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Machine readable code sent to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Error::MalformedRequest(_) => "malformed_request",
            Error::InvalidSubjectEntry { .. } => "invalid_subject_entry",
            Error::PayloadTooLarge(_) => "payload_too_large",
            Error::Config(_) => "config",
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedRequest(_)
                | Error::InvalidSubjectEntry { .. }
                | Error::PayloadTooLarge(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let error = Error::MalformedRequest("empty body".to_owned());
        assert_eq!(error.code(), "malformed_request");
        assert!(error.is_request_error());

        let error = Error::InvalidSubjectEntry {
            index: 2,
            found: "number".to_owned(),
        };
        assert_eq!(error.code(), "invalid_subject_entry");
        assert_eq!(
            error.to_string(),
            "Invalid subject entry at position 2: expected a string, found number"
        );

        let error = Error::PayloadTooLarge("length limit exceeded".to_owned());
        assert_eq!(error.code(), "payload_too_large");
        assert!(error.is_request_error());

        let error = Error::Config("min greater than max".to_owned());
        assert!(!error.is_request_error());
    }
}

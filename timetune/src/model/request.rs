// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Serialize;
use serde_json::Value;

use crate::error::Error;

const SUBJECTS: &str = "subjects";

/// Body of a prediction request.
///
/// Only `subjects` is read. Every other field of the incoming object is
/// ignored, and a missing (or `null`) `subjects` is an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PredictRequest {
    pub subjects: Vec<String>,
}

impl PredictRequest {
    pub fn new<I, S>(subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subjects: subjects.into_iter().map(Into::into).collect(),
        }
    }

    /// Parses a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::MalformedRequest(
                "request body is empty".to_owned(),
            ));
        }

        let value: Value = serde_json::from_slice(body).map_err(|e| {
            Error::MalformedRequest(format!("request body is not JSON: {}", e))
        })?;

        Self::from_value(value)
    }

    /// Validates an already parsed JSON document.
    pub fn from_value(value: Value) -> Result<Self, Error> {
        let Value::Object(mut object) = value else {
            return Err(Error::MalformedRequest(format!(
                "expected a JSON object, found {}",
                kind(&value)
            )));
        };

        let subjects = match object.remove(SUBJECTS) {
            None | Some(Value::Null) => vec![],
            Some(Value::Array(entries)) => entries
                .into_iter()
                .enumerate()
                .map(|(index, entry)| match entry {
                    Value::String(subject) => Ok(subject),
                    other => Err(Error::InvalidSubjectEntry {
                        index,
                        found: kind(&other).to_owned(),
                    }),
                })
                .collect::<Result<Vec<String>, Error>>()?,
            Some(other) => {
                return Err(Error::MalformedRequest(format!(
                    "'{}' must be an array of strings, found {}",
                    SUBJECTS,
                    kind(&other)
                )));
            }
        };

        Ok(Self { subjects })
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

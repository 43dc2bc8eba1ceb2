// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use serde::Serialize;
use serde_json::{Map, Value};

/// Predicted study time per subject, in minutes.
///
/// Keys keep the order in which a subject was first inserted. Inserting an
/// existing subject again replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StudyTimes(Map<String, Value>);

impl StudyTimes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, subject: impl Into<String>, minutes: u32) {
        self.0.insert(subject.into(), Value::from(minutes));
    }

    pub fn get(&self, subject: &str) -> Option<u32> {
        self.0
            .get(subject)
            .and_then(Value::as_u64)
            .and_then(|minutes| u32::try_from(minutes).ok())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn subjects(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().filter_map(|(subject, minutes)| {
            let minutes = u32::try_from(minutes.as_u64()?).ok()?;
            Some((subject.as_str(), minutes))
        })
    }
}

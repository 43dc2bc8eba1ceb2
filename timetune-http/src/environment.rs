// Copyright 2025 TimeTune developers
// SPDX-License-Identifier: AGPL-3.0-only

use std::env;

use crate::server::RoutesConfig;

/// Request bodies up to 16 MiB are accepted unless overridden.
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn build_address_http() -> String {
    env::var("TIMETUNE_HTTP_ADDRESS").unwrap_or("0.0.0.0:5000".to_owned())
}

pub fn build_address_https() -> String {
    env::var("TIMETUNE_HTTPS_ADDRESS").unwrap_or_default()
}

pub fn build_https_cert() -> String {
    env::var("TIMETUNE_HTTPS_CERT").unwrap_or_default()
}

pub fn build_https_private_key() -> String {
    env::var("TIMETUNE_HTTPS_PRIVATE_KEY").unwrap_or_default()
}

pub fn build_doc() -> bool {
    env::var("TIMETUNE_HTTP_DOC").unwrap_or_default() == "true"
}

pub fn build_body_limit() -> usize {
    env::var("TIMETUNE_HTTP_BODY_LIMIT")
        .ok()
        .and_then(|limit| limit.trim().parse().ok())
        .unwrap_or(DEFAULT_BODY_LIMIT)
}

pub fn build_routes_config() -> RoutesConfig {
    RoutesConfig {
        doc: build_doc(),
        body_limit: build_body_limit(),
    }
}

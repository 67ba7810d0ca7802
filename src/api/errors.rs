// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scrape::ScrapeFailure;

/// Numeric error codes returned to API clients
pub mod error_code {
    pub const REQUEST_TIMEOUT: u32 = 10001;
    pub const REMOTE_UNREACHABLE: u32 = 10002;
    pub const NO_RESULTS: u32 = 10003;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error_message: String,
    pub error_code: u32,
}

#[derive(Debug, Clone)]
pub enum ApiError {
    NoResults(String),
    RemoteUnreachable(String),
    Timeout,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoResults(_) => StatusCode::NOT_FOUND,
            ApiError::RemoteUnreachable(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    pub fn error_code(&self) -> u32 {
        match self {
            ApiError::NoResults(_) => error_code::NO_RESULTS,
            ApiError::RemoteUnreachable(_) => error_code::REMOTE_UNREACHABLE,
            ApiError::Timeout => error_code::REQUEST_TIMEOUT,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error_message: self.to_string(),
            error_code: self.error_code(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NoResults(query) => write!(f, "No results found for '{}'", query),
            ApiError::RemoteUnreachable(msg) => write!(f, "Dictionary unreachable: {}", msg),
            ApiError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ScrapeFailure> for ApiError {
    fn from(failure: ScrapeFailure) -> Self {
        match failure {
            ScrapeFailure::NoResultsFound { query } => ApiError::NoResults(query),
            ScrapeFailure::RemoteUnreachable(e) => ApiError::RemoteUnreachable(e.to_string()),
            ScrapeFailure::Cancelled => ApiError::Timeout,
        }
    }
}

// Error response wrapper
pub struct ApiErrorResponse(pub ApiError);

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        Self(error)
    }
}

impl From<ScrapeFailure> for ApiErrorResponse {
    fn from(failure: ScrapeFailure) -> Self {
        Self(failure.into())
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.0.status_code(), Json(self.0.to_response())).into_response()
    }
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API for word lookups

pub mod config;
pub mod errors;
pub mod handlers;
pub mod response;
pub mod server;

pub use config::ApiConfig;
pub use errors::{ApiError, ApiErrorResponse, ErrorResponse};
pub use response::ApiResponse;
pub use server::{create_app, start_server, AppState};

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Success response envelope

use serde::Serialize;

use crate::scrape::PaginationState;

/// `{ data, pagination }` envelope for lookup responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationState>,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: PaginationState) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

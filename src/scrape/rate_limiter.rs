// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Rate limiting for outbound page fetches

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;

const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(60) {
    Some(rpm) => rpm,
    None => panic!("default rate must be non-zero"),
};

/// Process-wide quota on requests sent to the remote dictionary
#[derive(Clone)]
pub struct FetchRateLimiter {
    limiter: Arc<GovRateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    requests_per_minute: u32,
}

impl FetchRateLimiter {
    /// Create a new rate limiter
    ///
    /// A zero rate falls back to 60 requests per minute.
    pub fn new(requests_per_minute: u32) -> Self {
        let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(DEFAULT_REQUESTS_PER_MINUTE);
        let limiter = Arc::new(GovRateLimiter::direct(Quota::per_minute(rpm)));

        Self {
            limiter,
            requests_per_minute: rpm.get(),
        }
    }

    /// Wait until the quota allows another request
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }
}

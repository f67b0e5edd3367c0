// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! The single overall deadline every blocking call of a scan observes.

use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Stand-in for "never" when a timeout does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug, Clone, Copy)]
pub struct ScanDeadline {
    at: Instant,
}

impl ScanDeadline {
    /// Start the clock: the deadline fires `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        let now = Instant::now();
        let at = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        Self { at }
    }

    pub fn instant(&self) -> Instant {
        self.at
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    /// Resolves once the deadline has passed.
    pub async fn fired(&self) {
        sleep_until(self.at).await
    }

    /// Deadline for one request: `timeout` from now, never past the overall deadline.
    pub fn request_deadline(&self, timeout: Duration) -> Instant {
        Instant::now()
            .checked_add(timeout)
            .map_or(self.at, |at| at.min(self.at))
    }
}

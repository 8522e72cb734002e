// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Readiness polling for the externally-owned clean parameters.
//!
//! The five clean parameters live in controls that may not exist or be
//! populated yet when a clean is requested, e.g. right after host startup.
//! The poller retries resolution on a fixed interval until all five are
//! present, then assembles the request; it never dispatches a partial one.

use std::time::Duration;

use crate::command::CleanRequest;
use crate::error::Error;
use crate::params::{Parameter, ParameterStore};
use crate::types::{CleanMode, CleanTimes, FanLevel, RoomId, WaterLevel};

/// Outcome of a single resolution attempt.
enum Resolution {
    Ready(CleanRequest),
    Missing(Vec<Parameter>),
}

/// Bounded retry-with-delay resolution of the five clean parameters.
///
/// Each run is terminal: it either yields a [`CleanRequest`] or fails, and
/// a new invocation starts fresh with no memory of prior runs. Dropping the
/// returned future between attempts cancels the run; nothing is dispatched
/// for a cancelled run.
///
/// # Examples
///
/// ```
/// use scnr_lib::ReadinessPoller;
/// use std::time::Duration;
///
/// let poller = ReadinessPoller::new()
///     .with_attempts(10)
///     .with_interval(Duration::from_millis(100));
/// ```
#[derive(Debug, Clone)]
pub struct ReadinessPoller {
    attempts: u32,
    interval: Duration,
}

impl ReadinessPoller {
    /// Default attempt ceiling.
    pub const DEFAULT_ATTEMPTS: u32 = 20;

    /// Default delay between attempts.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    /// Creates a poller with the default budget (20 attempts, 500 ms apart).
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts: Self::DEFAULT_ATTEMPTS,
            interval: Self::DEFAULT_INTERVAL,
        }
    }

    /// Sets the attempt ceiling (minimum 1).
    #[must_use]
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Sets the delay between attempts.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Returns the attempt ceiling.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns the delay between attempts.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Resolves the five clean parameters, retrying while any are absent.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReadinessTimeout` naming the unresolved parameters
    /// if the attempt ceiling is reached, or `Error::Value` immediately if
    /// a present value is malformed; a malformed value is a data-shape bug
    /// and does not consume the retry budget.
    pub async fn wait_for_parameters(
        &self,
        store: &dyn ParameterStore,
        device_id: &str,
    ) -> Result<CleanRequest, Error> {
        let mut missing = Vec::new();

        for attempt in 1..=self.attempts {
            if attempt > 1 {
                tokio::time::sleep(self.interval).await;
            }

            match resolve(store, device_id)? {
                Resolution::Ready(request) => {
                    tracing::debug!(attempt, "clean parameters resolved");
                    return Ok(request);
                }
                Resolution::Missing(now_missing) => {
                    tracing::debug!(
                        attempt,
                        missing = ?now_missing.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
                        "clean parameters not yet resolvable"
                    );
                    missing = now_missing;
                }
            }
        }

        tracing::warn!(
            attempts = self.attempts,
            missing = ?missing.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
            "clean parameters unresolved, giving up"
        );
        Err(Error::ReadinessTimeout {
            attempts: self.attempts,
            missing,
        })
    }
}

impl Default for ReadinessPoller {
    fn default() -> Self {
        Self::new()
    }
}

/// One pass over the parameter store.
///
/// Absent values are collected for the retry report; present values are
/// coerced and validated immediately, so a malformed value aborts the run
/// even while others are still absent.
fn resolve(store: &dyn ParameterStore, device_id: &str) -> Result<Resolution, Error> {
    let mut missing = Vec::new();

    let room = match store.get(device_id, Parameter::Room) {
        Some(value) => Some(RoomId::new(value.into_text(Parameter::Room)?)?),
        None => {
            missing.push(Parameter::Room);
            None
        }
    };

    let mode = match store.get(device_id, Parameter::Mode) {
        Some(value) => Some(value.into_text(Parameter::Mode)?.parse::<CleanMode>()?),
        None => {
            missing.push(Parameter::Mode);
            None
        }
    };

    let water_level = match store.get(device_id, Parameter::WaterLevel) {
        Some(value) => Some(WaterLevel::new(value.into_int(Parameter::WaterLevel)?)?),
        None => {
            missing.push(Parameter::WaterLevel);
            None
        }
    };

    let fan_level = match store.get(device_id, Parameter::FanLevel) {
        Some(value) => Some(FanLevel::new(value.into_int(Parameter::FanLevel)?)?),
        None => {
            missing.push(Parameter::FanLevel);
            None
        }
    };

    let times = match store.get(device_id, Parameter::CleanTimes) {
        Some(value) => Some(CleanTimes::new(value.into_int(Parameter::CleanTimes)?)?),
        None => {
            missing.push(Parameter::CleanTimes);
            None
        }
    };

    match (room, mode, water_level, fan_level, times) {
        (Some(room), Some(mode), Some(water_level), Some(fan_level), Some(times)) => Ok(
            Resolution::Ready(CleanRequest::new(room, mode, water_level, fan_level, times)),
        ),
        _ => Ok(Resolution::Missing(missing)),
    }
}

//! The half-hour window that decides which reservations occupy a venue now.

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

const WINDOW_SECONDS: i64 = 30 * 60;

/// A half-open interval `[lower_bound, upper_bound)` aligned to `:00`/`:30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    /// Most recent half-hour mark at or before the resolved instant.
    pub lower_bound: DateTime<Utc>,
    /// The half-hour mark following `lower_bound`.
    pub upper_bound: DateTime<Utc>,
}

impl TimeWindow {
    /// Snaps `now` to the half-hour window that contains it.
    #[must_use]
    pub fn surrounding(now: DateTime<Utc>) -> Self {
        let into_window = now.timestamp().rem_euclid(WINDOW_SECONDS);
        let lower_bound = now
            - TimeDelta::seconds(into_window)
            - TimeDelta::nanoseconds(i64::from(now.timestamp_subsec_nanos()));

        Self {
            lower_bound,
            upper_bound: lower_bound + TimeDelta::seconds(WINDOW_SECONDS),
        }
    }

    /// Returns `true` if `instant` falls inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.lower_bound <= instant && instant < self.upper_bound
    }
}

//! Clock abstraction for determinism.

use chrono::{DateTime, Utc};

use crate::time_window::TimeWindow;

/// Abstraction over system time so availability is computed against an
/// injectable "now".
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the half-hour window surrounding the current time.
    fn active_window(&self) -> TimeWindow {
        TimeWindow::surrounding(self.now())
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

//! Countdown state for a fermentation timer.
//!
//! The caller owns the [`BakeTimer`] and passes the current time into every
//! operation, so the state machine never reads a clock itself.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TimerState {
    #[default]
    Idle,
    Running {
        started_at: NaiveDateTime,
        ends_at: NaiveDateTime,
    },
    Paused {
        remaining: Duration,
    },
    Finished,
}

/// What a countdown shows at a given moment.
#[derive(Copy, Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TimerTick {
    Idle,
    Running {
        hours: i64,
        minutes: i64,
        seconds: i64,
        /// Remaining share of the full duration, 1.0 at start and 0.0 at the end.
        progress: f64,
    },
    Paused {
        remaining_secs: i64,
    },
    Finished,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BakeTimer {
    total: Duration,
    state: TimerState,
}

/// `None` when the hours are non-finite or beyond what a `Duration` can hold.
fn hours_to_duration(hours: f64) -> Option<Duration> {
    let ms = (hours.max(0.0) * 3_600_000.0).round();
    if !ms.is_finite() || ms >= i64::MAX as f64 {
        return None;
    }
    Duration::try_milliseconds(ms as i64)
}

impl BakeTimer {
    pub fn state(&self) -> TimerState {
        self.state
    }

    /// Full countdown duration set by the last [`start`](Self::start).
    pub fn total(&self) -> Duration {
        self.total
    }

    /// Start a fresh countdown of `total_hours`; returns the finish time.
    ///
    /// Returns `None` and leaves the timer untouched when the finish time is
    /// out of the calendar's range.
    pub fn start(&mut self, now: NaiveDateTime, total_hours: f64) -> Option<NaiveDateTime> {
        let total = hours_to_duration(total_hours)?;
        let ends_at = now.checked_add_signed(total)?;
        self.total = total;
        self.state = TimerState::Running {
            started_at: now,
            ends_at,
        };
        debug!(%now, %ends_at, "timer started");
        Some(ends_at)
    }

    /// Pause a running countdown, keeping what is left. Returns the remaining time.
    /// A countdown already past its end becomes finished instead.
    pub fn pause(&mut self, now: NaiveDateTime) -> Option<Duration> {
        let TimerState::Running { ends_at, .. } = self.state else {
            return None;
        };
        let remaining = ends_at - now;
        if remaining <= Duration::zero() {
            self.state = TimerState::Finished;
            debug!("timer finished");
            return None;
        }
        self.state = TimerState::Paused { remaining };
        debug!(remaining_secs = remaining.num_seconds(), "timer paused");
        Some(remaining)
    }

    /// Resume a paused countdown with time left. Returns the new finish time.
    pub fn resume(&mut self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let TimerState::Paused { remaining } = self.state else {
            return None;
        };
        if remaining <= Duration::zero() {
            return None;
        }
        let ends_at = now.checked_add_signed(remaining)?;
        self.state = TimerState::Running {
            started_at: now,
            ends_at,
        };
        debug!(%ends_at, "timer resumed");
        Some(ends_at)
    }

    /// Start over with the full duration from the last start.
    pub fn restart(&mut self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let ends_at = now.checked_add_signed(self.total)?;
        self.state = TimerState::Running {
            started_at: now,
            ends_at,
        };
        debug!(%now, %ends_at, "timer restarted");
        Some(ends_at)
    }

    /// Advance to `now`. A running countdown past its end becomes finished.
    pub fn tick(&mut self, now: NaiveDateTime) -> TimerTick {
        match self.state {
            TimerState::Idle => TimerTick::Idle,
            TimerState::Finished => TimerTick::Finished,
            TimerState::Paused { remaining } => TimerTick::Paused {
                remaining_secs: remaining.num_seconds(),
            },
            TimerState::Running { ends_at, .. } => {
                let remaining = ends_at - now;
                if remaining <= Duration::zero() {
                    self.state = TimerState::Finished;
                    debug!("timer finished");
                    return TimerTick::Finished;
                }
                let secs = remaining.num_seconds();
                let total_ms = self.total.num_milliseconds();
                let progress = if total_ms > 0 {
                    remaining.num_milliseconds() as f64 / total_ms as f64
                } else {
                    0.0
                };
                TimerTick::Running {
                    hours: secs / 3600,
                    minutes: secs % 3600 / 60,
                    seconds: secs % 60,
                    progress,
                }
            }
        }
    }
}

//! Wall-clock countdown.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A countdown anchored at the instant it started.
///
/// Remaining time is always derived from the clock, so a caller that
/// redraws late or skips frames never drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    started_at: DateTime<Utc>,
    duration: Duration,
}

/// One redraw of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountdownFrame {
    /// Time left, never negative.
    pub remaining: Duration,
    /// Whole seconds to display, rounded up.
    pub seconds_left: u64,
    /// Elapsed share of the countdown, 0 to 100.
    pub progress_percent: f64,
    /// Whether the countdown has reached zero.
    pub finished: bool,
}

impl Countdown {
    /// Start a countdown of `duration` at `started_at`.
    pub fn start(started_at: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            started_at,
            duration,
        }
    }

    /// When the countdown started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Total length.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Frame for the instant `now`.
    pub fn frame(&self, now: DateTime<Utc>) -> CountdownFrame {
        // A clock that moved backwards counts as no time elapsed.
        let elapsed = (now - self.started_at).to_std().unwrap_or_default();
        let remaining = self.duration.saturating_sub(elapsed);

        let progress_percent = if self.duration.is_zero() {
            100.0
        } else {
            (elapsed.as_secs_f64() / self.duration.as_secs_f64() * 100.0).min(100.0)
        };

        CountdownFrame {
            remaining,
            seconds_left: remaining.as_nanos().div_ceil(1_000_000_000) as u64,
            progress_percent,
            finished: remaining.is_zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_frame_at_start() {
        let countdown = Countdown::start(start(), Duration::from_secs(5));
        let frame = countdown.frame(start());
        assert_eq!(frame.remaining, Duration::from_secs(5));
        assert_eq!(frame.seconds_left, 5);
        assert_eq!(frame.progress_percent, 0.0);
        assert!(!frame.finished);
    }

    #[test]
    fn test_seconds_round_up() {
        let countdown = Countdown::start(start(), Duration::from_secs(5));
        let frame = countdown.frame(start() + chrono::Duration::milliseconds(1_200));
        assert_eq!(frame.remaining, Duration::from_millis(3_800));
        assert_eq!(frame.seconds_left, 4);
        assert!((frame.progress_percent - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_late_redraw_clamps_to_zero() {
        let countdown = Countdown::start(start(), Duration::from_secs(5));
        let frame = countdown.frame(start() + chrono::Duration::seconds(60));
        assert_eq!(frame.remaining, Duration::ZERO);
        assert_eq!(frame.seconds_left, 0);
        assert_eq!(frame.progress_percent, 100.0);
        assert!(frame.finished);
    }

    #[test]
    fn test_clock_moving_backwards() {
        let countdown = Countdown::start(start(), Duration::from_secs(5));
        let frame = countdown.frame(start() - chrono::Duration::seconds(3));
        assert_eq!(frame.remaining, Duration::from_secs(5));
        assert!(!frame.finished);
    }

    #[test]
    fn test_zero_length_is_finished_immediately() {
        let countdown = Countdown::start(start(), Duration::ZERO);
        assert!(countdown.frame(start()).finished);
    }
}

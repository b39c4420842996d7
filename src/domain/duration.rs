//! Whole-second duration value used by the timer

use std::{
    fmt,
    ops::{Add, Sub},
};

use super::TimerError;

/// An immutable, non-negative count of seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    seconds: u64,
}

impl Duration {
    pub const ZERO: Duration = Duration { seconds: 0 };

    /// Create a duration, rejecting negative second counts
    pub fn new(seconds: i64) -> Result<Self, TimerError> {
        u64::try_from(seconds)
            .map(Self::from_secs)
            .map_err(|_| TimerError::InvalidDuration(seconds))
    }

    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    pub fn of_minutes(minutes: u64) -> Self {
        Self::from_secs(minutes.saturating_mul(60))
    }

    pub fn of_hours(hours: u64) -> Self {
        Self::from_secs(hours.saturating_mul(3600))
    }

    pub fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Second count as a signed integer for snapshots and wire formats
    pub fn as_secs_i64(&self) -> i64 {
        i64::try_from(self.seconds).unwrap_or(i64::MAX)
    }

    pub fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    pub fn is_positive(&self) -> bool {
        self.seconds > 0
    }

    /// Whole hours
    pub fn hours(&self) -> u64 {
        self.seconds / 3600
    }

    /// Minutes within the current hour
    pub fn minutes(&self) -> u64 {
        (self.seconds % 3600) / 60
    }

    /// Seconds within the current minute
    pub fn seconds(&self) -> u64 {
        self.seconds % 60
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, other: Duration) -> Duration {
        Duration::from_secs(self.seconds.saturating_add(other.seconds))
    }
}

/// Truncating subtraction: never goes below zero
impl Sub for Duration {
    type Output = Duration;

    fn sub(self, other: Duration) -> Duration {
        Duration::from_secs(self.seconds.saturating_sub(other.seconds))
    }
}

/// Formats as `HH:MM:SS`
impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours(), self.minutes(), self.seconds())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_seconds_are_rejected() {
        assert_eq!(Duration::new(-1), Err(TimerError::InvalidDuration(-1)));
        assert_eq!(Duration::new(0), Ok(Duration::ZERO));
        assert_eq!(Duration::new(90).map(|d| d.as_secs()), Ok(90));
    }

    #[test]
    fn subtraction_floors_at_zero() {
        let short = Duration::from_secs(30);
        let long = Duration::from_secs(100);

        assert_eq!(long - short, Duration::from_secs(70));
        assert_eq!(short - long, Duration::ZERO);
        assert_eq!(short + long, Duration::from_secs(130));
    }

    #[test]
    fn decomposes_into_clock_components() {
        let d = Duration::from_secs(3 * 3600 + 25 * 60 + 7);

        assert_eq!((d.hours(), d.minutes(), d.seconds()), (3, 25, 7));
        assert_eq!(d.to_string(), "03:25:07");
        assert_eq!(Duration::ZERO.to_string(), "00:00:00");
        assert_eq!(Duration::from_secs(86400).to_string(), "24:00:00");
    }

    #[test]
    fn unit_constructors() {
        assert_eq!(Duration::of_minutes(5), Duration::from_secs(300));
        assert_eq!(Duration::of_hours(2), Duration::from_secs(7200));
        assert!(Duration::ZERO.is_zero());
        assert!(!Duration::ZERO.is_positive());
        assert!(Duration::from_secs(1).is_positive());
    }
}

//! Injected wall clock. Nothing in Lectio reads ambient time directly: every
//! date-dependent operation takes a [`Clock`] so tests can pin "now".

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::error::{LectioError, Result};

pub trait Clock: Send + Sync {
    /// Current instant in the deployment's configured zone.
    fn now(&self) -> DateTime<FixedOffset>;

    /// Local calendar date of [`Clock::now`].
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Reads the system clock and shifts it into a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::new)
            .ok_or_else(|| LectioError::Config(format!("invalid UTC offset: {minutes} minutes")))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Parse an RFC 3339 timestamp, e.g. `2024-03-17T08:30:00-03:00`.
    pub fn parse(rfc3339: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(rfc3339)
            .map(Self)
            .map_err(|e| LectioError::InvalidDate(format!("{rfc3339}: {e}")))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn fixed_clock_keeps_local_date() {
        // 01:30 UTC on the 18th is still the 17th in UTC-3.
        let clock = FixedClock::parse("2024-03-17T22:30:00-03:00").unwrap();
        assert_eq!(clock.today().to_string(), "2024-03-17");
        assert_eq!(clock.now().hour(), 22);
    }

    #[test]
    fn system_clock_applies_offset() {
        let clock = SystemClock::from_offset_minutes(-180).unwrap();
        assert_eq!(clock.now().offset().local_minus_utc(), -180 * 60);
    }

    #[test]
    fn system_clock_rejects_full_day_offset() {
        assert!(SystemClock::from_offset_minutes(24 * 60).is_err());
    }

    #[test]
    fn system_clock_rejects_offsets_that_overflow_seconds() {
        for minutes in [i32::MAX, i32::MIN, i32::MAX / 60 + 1] {
            let err = SystemClock::from_offset_minutes(minutes).unwrap_err();
            assert_eq!(err.code(), "CONFIG_ERROR");
        }
    }
}

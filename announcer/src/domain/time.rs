//! Clock time handling for departure boards.
//!
//! Darwin provides times as "HH:MM" strings with no date. Announcements only
//! ever compare times a few minutes (or hours) apart, so comparisons wrap
//! around midnight instead of tracking dates.

use chrono::{NaiveTime, Timelike};
use std::fmt;

/// Minutes in a day.
const MINUTES_PER_DAY: i64 = 24 * 60;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day to the minute, as shown on a departure board.
///
/// # Examples
///
/// ```
/// use station_announcer::domain::ClockTime;
///
/// let std = ClockTime::parse_hhmm("23:58").unwrap();
/// let etd = ClockTime::parse_hhmm("00:04").unwrap();
///
/// assert_eq!(std.hour_str(), "23");
/// assert_eq!(std.minutes_until(etd), 6);
/// assert_eq!(etd.minutes_until(std), -6);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create from hour and minute, if valid.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    /// Parse a time from "HH:MM" format.
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // Must be exactly 5 characters: HH:MM
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();

        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_hm(hour, minute).ok_or_else(|| TimeError::new("invalid time"))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Zero-padded hour, as used in `hour.s.<HH>` clips.
    pub fn hour_str(&self) -> String {
        format!("{:02}", self.hour())
    }

    /// Zero-padded minute, as used in `mins.m.<MM>` clips.
    pub fn minute_str(&self) -> String {
        format!("{:02}", self.minute())
    }

    fn minute_of_day(&self) -> i64 {
        i64::from(self.hour()) * 60 + i64::from(self.minute())
    }

    /// Signed minutes from `self` to `later`, taking the shorter way round
    /// the clock so that 23:58 → 00:04 is 6 rather than -1434.
    pub fn minutes_until(&self, later: ClockTime) -> i64 {
        let diff = (later.minute_of_day() - self.minute_of_day()).rem_euclid(MINUTES_PER_DAY);
        if diff > MINUTES_PER_DAY / 2 {
            diff - MINUTES_PER_DAY
        } else {
            diff
        }
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(value: NaiveTime) -> Self {
        // Drop seconds so equality is to the minute.
        ClockTime::from_hm(value.hour(), value.minute()).unwrap_or(ClockTime(value))
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({})", self)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display then parse is the identity
        #[test]
        fn roundtrip(h in 0u32..24, m in 0u32..60) {
            let time = ClockTime::from_hm(h, m).unwrap();
            prop_assert_eq!(ClockTime::parse_hhmm(&time.to_string()).unwrap(), time);
        }

        /// Differences are antisymmetric except at the 12 hour boundary
        #[test]
        fn antisymmetric(a in 0u32..1440, b in 0u32..1440) {
            let x = ClockTime::from_hm(a / 60, a % 60).unwrap();
            let y = ClockTime::from_hm(b / 60, b % 60).unwrap();
            let d = x.minutes_until(y);
            prop_assert!(d.abs() <= 720);
            if d.abs() != 720 {
                prop_assert_eq!(y.minutes_until(x), -d);
            }
        }
    }
}

//! Stop time handling for tram timetables.
//!
//! The transcript gives departure times as "H:MM" clock strings. Trams run
//! within a single service day, so a stop time is just minutes since
//! midnight, bounded to the operating window.

use std::fmt;

use chrono::Duration;

/// Error returned when parsing or constructing an invalid stop time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid stop time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// First tram departure of the service day, in minutes since midnight (05:55).
pub const SERVICE_DAY_START: u16 = 355;

/// Last tram departure of the service day, in minutes since midnight (21:21).
pub const SERVICE_DAY_END: u16 = 1281;

/// A scheduled tram stop time.
///
/// Stored as minutes since midnight. Any `StopTime` value lies within the
/// service day `[SERVICE_DAY_START, SERVICE_DAY_END]` by construction.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::StopTime;
///
/// let t = StopTime::parse("5:55").unwrap();
/// assert_eq!(t.minutes_since_midnight(), 355);
/// assert_eq!(t.to_string(), "5:55");
///
/// // Before the first tram
/// assert!(StopTime::parse("5:54").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopTime(u16);

impl StopTime {
    /// Construct a stop time from minutes since midnight.
    ///
    /// # Errors
    ///
    /// Fails if the value lies outside the service day.
    pub fn from_minutes(minutes: u16) -> Result<Self, TimeError> {
        if !(SERVICE_DAY_START..=SERVICE_DAY_END).contains(&minutes) {
            return Err(TimeError::new("outside the tram service day"));
        }
        Ok(Self(minutes))
    }

    /// Parse a stop time from "H:MM" format.
    ///
    /// The hour is written without a leading zero and the minutes with
    /// exactly two digits, as the transcript grammar requires.
    ///
    /// # Examples
    ///
    /// ```
    /// use tram_fares::domain::StopTime;
    ///
    /// assert!(StopTime::parse("5:55").is_ok());
    /// assert!(StopTime::parse("21:21").is_ok());
    ///
    /// // Leading zero on the hour is not part of the grammar
    /// assert!(StopTime::parse("05:55").is_err());
    ///
    /// // Malformed
    /// assert!(StopTime::parse("555").is_err());
    /// assert!(StopTime::parse("5:5").is_err());
    /// assert!(StopTime::parse("5:60").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();

        // H:MM is 4 bytes, HH:MM is 5
        let colon = match bytes.len() {
            4 => 1,
            5 => 2,
            _ => return Err(TimeError::new("expected H:MM format")),
        };

        if bytes[colon] != b':' {
            return Err(TimeError::new("expected colon between hour and minute"));
        }

        let hour = match colon {
            1 => (bytes[0] as char)
                .to_digit(10)
                .ok_or_else(|| TimeError::new("invalid hour digit"))?,
            _ => {
                if bytes[0] == b'0' {
                    return Err(TimeError::new("hour must not have a leading zero"));
                }
                parse_two_digits(&bytes[0..2])
                    .ok_or_else(|| TimeError::new("invalid hour digits"))?
            }
        };
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[colon + 1..colon + 3])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Self::from_minutes((hour * 60 + minute) as u16)
    }

    /// Returns the minutes since midnight.
    pub fn minutes_since_midnight(&self) -> u16 {
        self.0
    }

    /// Returns the hour (5-21).
    pub fn hour(&self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u16 {
        self.0 % 60
    }

    /// Returns the duration between two stop times.
    ///
    /// Negative if `other` is after `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Duration;
    /// use tram_fares::domain::StopTime;
    ///
    /// let a = StopTime::parse("10:00").unwrap();
    /// let b = StopTime::parse("10:45").unwrap();
    /// assert_eq!(b.signed_duration_since(a), Duration::minutes(45));
    /// ```
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        Duration::minutes(self.0 as i64 - other.0 as i64)
    }
}

impl fmt::Debug for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopTime({}:{:02})", self.hour(), self.minute())
    }
}

impl fmt::Display for StopTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.hour(), self.minute())
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

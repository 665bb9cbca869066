//! Tram line identifier type.

use std::fmt;

/// Error returned when parsing an invalid line number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line number: {reason}")]
pub struct InvalidLineId {
    reason: &'static str,
}

/// A tram line number.
///
/// Line numbers are unsigned decimal integers. The transcript grammar
/// accepts leading zeros, so `007` names the same line as `7`.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::LineId;
///
/// let line = LineId::parse("10").unwrap();
/// assert_eq!(line.as_u64(), 10);
///
/// // Leading zeros collapse to the same line
/// assert_eq!(LineId::parse("007").unwrap(), LineId::parse("7").unwrap());
///
/// // Non-digits are rejected
/// assert!(LineId::parse("1a").is_err());
/// assert!(LineId::parse("").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    /// The sentinel the query wire format attaches to the final stop:
    /// "destination reached, no further line boarded".
    pub const TERMINUS: LineId = LineId(0);

    /// Construct a line id from its number.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse a line number from decimal digits.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        if s.is_empty() {
            return Err(InvalidLineId {
                reason: "must not be empty",
            });
        }

        let mut value: u64 = 0;
        for &b in s.as_bytes() {
            if !b.is_ascii_digit() {
                return Err(InvalidLineId {
                    reason: "must be decimal digits",
                });
            }
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u64))
                .ok_or(InvalidLineId {
                    reason: "number too large",
                })?;
        }

        Ok(Self(value))
    }

    /// Returns the line number.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! Fare ticket types.
//!
//! Prices are held in integer cents to keep fare comparison exact; the
//! transcript writes them as "D.DD" decimal strings.

use std::fmt;

use chrono::Duration;

/// Error returned when parsing an invalid price.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid price: {reason}")]
pub struct PriceError {
    reason: &'static str,
}

/// A fare price in cents.
///
/// Ordered numerically; the ordering is what the ticket catalog's
/// price-ascending index sorts by.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::Price;
///
/// let p = Price::parse("10.20").unwrap();
/// assert_eq!(p.cents(), 1020);
/// assert_eq!(p.to_string(), "10.20");
///
/// // Exactly two decimal digits are required
/// assert!(Price::parse("10.2").is_err());
/// assert!(Price::parse("10").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(u64);

impl Price {
    /// Construct a price from cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Parse a price from "D.DD" format: integer digits, a dot, exactly
    /// two decimal digits.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let bytes = s.as_bytes();

        if bytes.len() < 4 {
            return Err(PriceError {
                reason: "expected D.DD format",
            });
        }

        let dot = bytes.len() - 3;
        if bytes[dot] != b'.' {
            return Err(PriceError {
                reason: "expected two digits after the decimal point",
            });
        }

        let mut cents: u64 = 0;
        for &b in bytes[..dot].iter().chain(&bytes[dot + 1..]) {
            if !b.is_ascii_digit() {
                return Err(PriceError {
                    reason: "expected decimal digits",
                });
            }
            cents = cents
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u64))
                .ok_or(PriceError {
                    reason: "price too large",
                })?;
        }

        Ok(Self(cents))
    }

    /// Returns the price in cents.
    pub fn cents(&self) -> u64 {
        self.0
    }

    /// Returns true if the price is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Sum of two prices, saturating at the representable maximum.
    pub fn saturating_add(&self, other: Price) -> Price {
        Price(self.0.saturating_add(other.0))
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Error returned when constructing an invalid ticket.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    /// Name is empty or contains a character outside letters and spaces
    #[error("invalid ticket name: {0:?}")]
    InvalidName(String),

    /// Tickets are never free
    #[error("ticket price must be positive")]
    ZeroPrice,

    /// A ticket valid for zero minutes covers nothing
    #[error("ticket validity must be positive")]
    ZeroValidity,
}

/// A fare ticket offering: a named price for a validity duration.
///
/// Immutable once constructed; the catalog enforces name uniqueness.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::{Price, Ticket};
///
/// let ticket = Ticket::new("day pass", Price::from_cents(1020), 720).unwrap();
/// assert_eq!(ticket.name(), "day pass");
/// assert_eq!(ticket.validity_minutes(), 720);
///
/// assert!(Ticket::new("", Price::from_cents(100), 60).is_err());
/// assert!(Ticket::new("free ride", Price::from_cents(0), 60).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    name: String,
    price: Price,
    validity_minutes: u64,
}

impl Ticket {
    /// Construct a ticket, validating name, price and validity.
    pub fn new(
        name: impl Into<String>,
        price: Price,
        validity_minutes: u64,
    ) -> Result<Self, TicketError> {
        let name = name.into();
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphabetic() || b == b' ') {
            return Err(TicketError::InvalidName(name));
        }
        if price.is_zero() {
            return Err(TicketError::ZeroPrice);
        }
        if validity_minutes == 0 {
            return Err(TicketError::ZeroValidity);
        }
        Ok(Self {
            name,
            price,
            validity_minutes,
        })
    }

    /// Returns the ticket name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Returns the validity in whole minutes.
    pub fn validity_minutes(&self) -> u64 {
        self.validity_minutes
    }

    /// Returns the validity as a duration.
    pub fn validity(&self) -> Duration {
        Duration::minutes(self.validity_minutes as i64)
    }
}

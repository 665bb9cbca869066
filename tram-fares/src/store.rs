//! The fact store: timetable and ticket catalog.
//!
//! Both collections are append-only. Entries are added as facts arrive on
//! the transcript and are never removed or mutated; the store only enforces
//! the cross-line invariants (unique line ids, unique ticket names), since
//! per-entry validity is guaranteed by the domain types.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::domain::{LineId, Price, Route, Ticket};

/// Error returned when a fact collides with one already stored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The line number is already in the timetable
    #[error("line {0} is already in the timetable")]
    DuplicateLine(LineId),

    /// A ticket with this name is already on sale
    #[error("ticket {0:?} is already on sale")]
    DuplicateTicketName(String),
}

/// The tram network timetable: one route per line number.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::{LineId, Route, Stop, StopTime};
/// use tram_fares::store::Timetable;
///
/// let route = Route::new(vec![
///     Stop::new("Center", StopTime::parse("10:00").unwrap()).unwrap(),
///     Stop::new("Market", StopTime::parse("10:10").unwrap()).unwrap(),
/// ])
/// .unwrap();
///
/// let mut timetable = Timetable::new();
/// timetable.add_route(LineId::new(3), route.clone()).unwrap();
///
/// // Re-adding the line is rejected regardless of content
/// assert!(timetable.add_route(LineId::new(3), route).is_err());
/// assert!(timetable.route(LineId::new(3)).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    lines: HashMap<LineId, Route>,
}

impl Timetable {
    /// Create an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line's route.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::DuplicateLine`] if the line already exists;
    /// the stored route is left untouched.
    pub fn add_route(&mut self, line: LineId, route: Route) -> Result<(), StoreError> {
        if self.lines.contains_key(&line) {
            return Err(StoreError::DuplicateLine(line));
        }
        debug!(%line, stops = route.len(), "route added");
        self.lines.insert(line, route);
        Ok(())
    }

    /// Returns the route of `line`, if the line exists.
    pub fn route(&self, line: LineId) -> Option<&Route> {
        self.lines.get(&line)
    }

    /// Returns true if `line` is in the timetable.
    pub fn contains(&self, line: LineId) -> bool {
        self.lines.contains_key(&line)
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no lines have been added.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One catalog entry as seen by the fare search: a borrowed view into the
/// price-ascending index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FareOffer<'a> {
    /// Ticket name.
    pub name: &'a str,
    /// Ticket price.
    pub price: Price,
    /// Validity in whole minutes.
    pub validity_minutes: u64,
}

/// The fare ticket catalog.
///
/// Keeps two views over one ticket set: a name index for O(1) duplicate
/// checks, and a `(price, name)`-ordered index that the fare search
/// traverses from cheapest to most expensive.
#[derive(Debug, Clone, Default)]
pub struct TicketCatalog {
    prices: HashMap<String, Price>,
    by_price: BTreeMap<(Price, String), u64>,
}

impl TicketCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a ticket on sale.
    ///
    /// # Errors
    ///
    /// Fails with [`StoreError::DuplicateTicketName`] if a ticket with the
    /// same name is already on sale, whatever its price or validity.
    pub fn add(&mut self, ticket: Ticket) -> Result<(), StoreError> {
        if self.prices.contains_key(ticket.name()) {
            return Err(StoreError::DuplicateTicketName(ticket.name().to_string()));
        }
        debug!(
            name = ticket.name(),
            price = %ticket.price(),
            validity = ticket.validity_minutes(),
            "ticket added"
        );
        self.prices
            .insert(ticket.name().to_string(), ticket.price());
        self.by_price.insert(
            (ticket.price(), ticket.name().to_string()),
            ticket.validity_minutes(),
        );
        Ok(())
    }

    /// Returns the price of the named ticket, if on sale.
    pub fn price_of(&self, name: &str) -> Option<Price> {
        self.prices.get(name).copied()
    }

    /// Returns true if a ticket with this name is on sale.
    pub fn contains(&self, name: &str) -> bool {
        self.prices.contains_key(name)
    }

    /// Returns the offers from cheapest to most expensive, names breaking
    /// price ties in ascending order.
    pub fn offers(&self) -> impl Iterator<Item = FareOffer<'_>> {
        self.by_price
            .iter()
            .map(|((price, name), &validity_minutes)| FareOffer {
                name,
                price: *price,
                validity_minutes,
            })
    }

    /// Returns the number of tickets on sale.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no tickets have been added.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// Everything the transcript has established so far: the timetable and the
/// ticket catalog. Owned by the session loop for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct FactStore {
    timetable: Timetable,
    catalog: TicketCatalog,
}

impl FactStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line's route. See [`Timetable::add_route`].
    pub fn add_route(&mut self, line: LineId, route: Route) -> Result<(), StoreError> {
        self.timetable.add_route(line, route)
    }

    /// Put a ticket on sale. See [`TicketCatalog::add`].
    pub fn add_ticket(&mut self, ticket: Ticket) -> Result<(), StoreError> {
        self.catalog.add(ticket)
    }

    /// Returns the timetable view.
    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    /// Returns the catalog view.
    pub fn catalog(&self) -> &TicketCatalog {
        &self.catalog
    }
}

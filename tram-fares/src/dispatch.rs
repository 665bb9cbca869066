//! Request dispatch: one transcript line in, one outcome out.
//!
//! The dispatcher owns the fact store and routes each parsed request to
//! it or to the planner. Every failure path is an outcome value; nothing
//! here panics or propagates an error past the line boundary.

use tracing::debug;

use crate::domain::{LineId, Query, Route, Ticket};
use crate::planner::{JourneyOutcome, cheapest_cover, evaluate};
use crate::store::FactStore;

/// One parsed transcript line, as handed over by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// A new line's route.
    AddRoute { line: LineId, route: Route },

    /// A new ticket offering.
    AddTicket(Ticket),

    /// A passenger itinerary to price.
    Query(Query),

    /// A blank line; acknowledged silently.
    Ignore,

    /// A line that failed to parse or validate.
    Invalid,
}

/// The answer to one transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fact accepted (or blank line); nothing to report.
    NoResponse,

    /// Fact rejected: duplicate line number or ticket name.
    DuplicateError,

    /// The line was not valid transcript grammar.
    ParseError,

    /// The cheapest covering ticket set, in discovery order.
    Found(Vec<String>),

    /// The itinerary requires waiting at this stop.
    Wait(String),

    /// The itinerary is infeasible, or no ticket set covers it.
    NotFound,
}

/// Routes requests into the fact store and the planner.
///
/// # Examples
///
/// ```
/// use tram_fares::dispatch::{Dispatcher, Outcome, Request};
/// use tram_fares::domain::{LineId, Route, Stop, StopTime};
///
/// let route = Route::new(vec![
///     Stop::new("Center", StopTime::parse("10:00").unwrap()).unwrap(),
///     Stop::new("Market", StopTime::parse("10:10").unwrap()).unwrap(),
/// ])
/// .unwrap();
///
/// let mut dispatcher = Dispatcher::new();
/// let request = Request::AddRoute { line: LineId::new(3), route };
///
/// assert_eq!(dispatcher.handle(request.clone()), Outcome::NoResponse);
/// assert_eq!(dispatcher.handle(request), Outcome::DuplicateError);
/// ```
#[derive(Debug, Default)]
pub struct Dispatcher {
    store: FactStore,
}

impl Dispatcher {
    /// Create a dispatcher over an empty fact store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one request, producing exactly one outcome.
    pub fn handle(&mut self, request: Request) -> Outcome {
        match request {
            Request::AddRoute { line, route } => match self.store.add_route(line, route) {
                Ok(()) => Outcome::NoResponse,
                Err(err) => {
                    debug!(%err, "fact rejected");
                    Outcome::DuplicateError
                }
            },
            Request::AddTicket(ticket) => match self.store.add_ticket(ticket) {
                Ok(()) => Outcome::NoResponse,
                Err(err) => {
                    debug!(%err, "fact rejected");
                    Outcome::DuplicateError
                }
            },
            Request::Query(query) => self.answer(&query),
            Request::Ignore => Outcome::NoResponse,
            Request::Invalid => Outcome::ParseError,
        }
    }

    /// Price one itinerary: evaluate it, then select tickets for the
    /// riding time.
    fn answer(&self, query: &Query) -> Outcome {
        match evaluate(self.store.timetable(), query) {
            Ok(JourneyOutcome::Completed(minutes)) => {
                match cheapest_cover(self.store.catalog(), minutes as u64) {
                    Some(selection) => Outcome::Found(selection.into_names()),
                    None => Outcome::NotFound,
                }
            }
            Ok(JourneyOutcome::Wait(stop)) => Outcome::Wait(stop),
            Err(err) => {
                debug!(%err, "itinerary infeasible");
                Outcome::NotFound
            }
        }
    }

    /// Returns a view of the accumulated facts.
    pub fn store(&self) -> &FactStore {
        &self.store
    }
}

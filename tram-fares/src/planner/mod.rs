//! Journey pricing: itinerary evaluation and fare selection.
//!
//! This module answers the transcript's queries in two steps: walk the
//! itinerary against the timetable to find the total riding time, then
//! search the catalog for the cheapest ticket combination covering it.

mod fares;
mod journey;

pub use fares::{FareSelection, MAX_TICKETS_PER_JOURNEY, cheapest_cover};
pub use journey::{JourneyError, JourneyOutcome, evaluate};

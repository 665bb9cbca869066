//! Itinerary evaluation against the timetable.
//!
//! Walks a query's legs in order, carrying the arrival time from leg to
//! leg. A transfer only works when the next tram departs exactly when the
//! passenger arrives; an earlier departure is a missed connection, a later
//! one means waiting at the stop, which ends the journey right there.

use tracing::{debug, trace};

use crate::domain::{Leg, LineId, Query, StopTime};
use crate::store::Timetable;

/// Error from itinerary evaluation: the itinerary cannot be ridden.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    /// The named line is not in the timetable
    #[error("line {0} is not in the timetable")]
    LineNotFound(LineId),

    /// The line does not call at a stop the itinerary names
    #[error("line {line} does not call at {stop}")]
    StopNotOnLine { line: LineId, stop: String },

    /// The itinerary rides the line against its driving direction
    #[error("line {line} reaches {to} before {from}")]
    StopsOutOfOrder {
        line: LineId,
        from: String,
        to: String,
    },

    /// The connecting tram departs before the passenger arrives
    #[error("the tram on line {line} leaves {stop} before the passenger arrives")]
    MissedConnection { line: LineId, stop: String },
}

/// Successful evaluation of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyOutcome {
    /// Every connection holds; total riding time in minutes.
    Completed(u32),

    /// The passenger reaches this stop before the connecting tram departs
    /// and must wait there. Later legs are not evaluated.
    Wait(String),
}

impl JourneyOutcome {
    /// Returns the riding time of a completed journey, `None` for a wait.
    pub fn completed_duration(&self) -> Option<chrono::Duration> {
        match self {
            JourneyOutcome::Completed(minutes) => Some(chrono::Duration::minutes(*minutes as i64)),
            JourneyOutcome::Wait(_) => None,
        }
    }
}

/// Evaluate an itinerary against the timetable.
///
/// Legs are checked in travel order; evaluation stops at the first wait or
/// failure. Evaluation is read-only: the same query against an unchanged
/// timetable always yields the same result.
///
/// # Errors
///
/// Returns a [`JourneyError`] naming the first leg that cannot be ridden.
pub fn evaluate(timetable: &Timetable, query: &Query) -> Result<JourneyOutcome, JourneyError> {
    let mut start_time: Option<StopTime> = None;
    let mut arrival: Option<StopTime> = None;

    for leg in query.legs() {
        let (board, alight) = leg_times(timetable, &leg)?;
        trace!(line = %leg.line, from = leg.from, to = leg.to, %board, %alight, "leg");

        match arrival {
            // First leg: the boarding time starts the clock
            None => start_time = Some(board),
            Some(carried) if carried == board => {}
            Some(carried) if carried < board => {
                debug!(stop = leg.from, %carried, departs = %board, "wait at stop");
                return Ok(JourneyOutcome::Wait(leg.from.to_string()));
            }
            Some(_) => {
                return Err(JourneyError::MissedConnection {
                    line: leg.line,
                    stop: leg.from.to_string(),
                });
            }
        }
        arrival = Some(alight);
    }

    match (start_time, arrival) {
        (Some(start), Some(end)) => {
            let minutes =
                (end.minutes_since_midnight() - start.minutes_since_midnight()) as u32;
            debug!(%start, %end, minutes, "journey completed");
            Ok(JourneyOutcome::Completed(minutes))
        }
        // A constructed query always carries at least one leg
        _ => Ok(JourneyOutcome::Completed(0)),
    }
}

/// Resolve one leg to its scheduled boarding and alighting times.
fn leg_times(timetable: &Timetable, leg: &Leg<'_>) -> Result<(StopTime, StopTime), JourneyError> {
    let route = timetable
        .route(leg.line)
        .ok_or(JourneyError::LineNotFound(leg.line))?;

    let board = route
        .departure_at(leg.from)
        .ok_or_else(|| JourneyError::StopNotOnLine {
            line: leg.line,
            stop: leg.from.to_string(),
        })?;
    let alight = route
        .departure_at(leg.to)
        .ok_or_else(|| JourneyError::StopNotOnLine {
            line: leg.line,
            stop: leg.to.to_string(),
        })?;

    // Route times strictly increase, so time order is driving order
    if board > alight {
        return Err(JourneyError::StopsOutOfOrder {
            line: leg.line,
            from: leg.from.to_string(),
            to: leg.to.to_string(),
        });
    }

    Ok((board, alight))
}

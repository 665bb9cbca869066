//! Passenger itinerary queries.

use super::LineId;
use super::route::is_stop_name;

/// Error returned when constructing an invalid query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// An itinerary needs a start and a destination
    #[error("query must name at least two stops")]
    TooFewStops,

    /// Stop name is empty or contains a character outside `[A-Za-z_^]`
    #[error("invalid stop name: {0:?}")]
    InvalidStopName(String),
}

/// One entry of a query: a stop, and the line boarded there toward the
/// next stop. The final waypoint carries [`LineId::TERMINUS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waypoint {
    stop: String,
    line: LineId,
}

impl Waypoint {
    /// Returns the stop name.
    pub fn stop(&self) -> &str {
        &self.stop
    }

    /// Returns the line boarded at this stop.
    pub fn line(&self) -> LineId {
        self.line
    }
}

/// One leg of an itinerary: a ride on `line` from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg<'a> {
    /// Boarding stop.
    pub from: &'a str,
    /// Line ridden.
    pub line: LineId,
    /// Alighting stop.
    pub to: &'a str,
}

/// A passenger itinerary: an ordered list of waypoints.
///
/// Validated at construction: at least two stops, every stop name
/// well-formed. The terminus sentinel on the last waypoint is carried as
/// parsed but never interpreted as a rideable line.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::{LineId, Query};
///
/// let query = Query::new(vec![
///     ("Center".into(), LineId::new(3)),
///     ("Market".into(), LineId::TERMINUS),
/// ])
/// .unwrap();
///
/// let legs: Vec<_> = query.legs().collect();
/// assert_eq!(legs.len(), 1);
/// assert_eq!(legs[0].from, "Center");
/// assert_eq!(legs[0].line, LineId::new(3));
/// assert_eq!(legs[0].to, "Market");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    waypoints: Vec<Waypoint>,
}

impl Query {
    /// Construct a query from (stop, line) pairs in travel order.
    pub fn new(waypoints: Vec<(String, LineId)>) -> Result<Self, QueryError> {
        if waypoints.len() < 2 {
            return Err(QueryError::TooFewStops);
        }

        let waypoints = waypoints
            .into_iter()
            .map(|(stop, line)| {
                if !is_stop_name(&stop) {
                    return Err(QueryError::InvalidStopName(stop));
                }
                Ok(Waypoint { stop, line })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { waypoints })
    }

    /// Returns the waypoints in travel order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Returns the itinerary legs: each consecutive waypoint pair, on the
    /// line named at the boarding stop.
    pub fn legs(&self) -> impl Iterator<Item = Leg<'_>> {
        self.waypoints.windows(2).map(|pair| Leg {
            from: pair[0].stop(),
            line: pair[0].line(),
            to: pair[1].stop(),
        })
    }

    /// Returns the boarding stop of the whole itinerary.
    pub fn origin(&self) -> &str {
        self.waypoints[0].stop()
    }

    /// Returns the final destination.
    pub fn destination(&self) -> &str {
        // Non-empty by construction
        self.waypoints[self.waypoints.len() - 1].stop()
    }
}

//! Tram route types.
//!
//! A `Route` is the published schedule of one tram line: the stops it calls
//! at, in driving order, each with its departure time. Routes are validated
//! at construction and immutable afterwards, so code that receives a `Route`
//! can trust that times strictly increase and stop names are distinct.

use std::collections::HashMap;
use std::fmt;

use super::StopTime;

/// Error returned when constructing an invalid stop or route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Stop name is empty or contains a character outside `[A-Za-z_^]`
    #[error("invalid stop name: {0:?}")]
    InvalidStopName(String),

    /// A route needs at least two stops to be rideable
    #[error("route must have at least two stops")]
    TooFewStops,

    /// Departure times must strictly increase along the route
    #[error("departure at {stop} does not follow the previous stop")]
    TimesNotIncreasing { stop: String },

    /// The same stop appears twice on one route
    #[error("stop {0} appears twice on the route")]
    DuplicateStop(String),
}

/// Returns true if `s` is a well-formed stop name.
///
/// Stop names are non-empty and drawn from letters, underscore and caret.
pub(crate) fn is_stop_name(s: &str) -> bool {
    !s.is_empty()
        && s.bytes()
            .all(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'^')
}

/// A named stop with its scheduled departure time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stop {
    name: String,
    departure: StopTime,
}

impl Stop {
    /// Construct a stop, validating the name.
    pub fn new(name: impl Into<String>, departure: StopTime) -> Result<Self, RouteError> {
        let name = name.into();
        if !is_stop_name(&name) {
            return Err(RouteError::InvalidStopName(name));
        }
        Ok(Self { name, departure })
    }

    /// Returns the stop name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the scheduled departure time.
    pub fn departure(&self) -> StopTime {
        self.departure
    }
}

/// The schedule of one tram line.
///
/// # Examples
///
/// ```
/// use tram_fares::domain::{Route, Stop, StopTime};
///
/// let route = Route::new(vec![
///     Stop::new("Center", StopTime::parse("10:00").unwrap()).unwrap(),
///     Stop::new("Market", StopTime::parse("10:10").unwrap()).unwrap(),
/// ])
/// .unwrap();
///
/// assert_eq!(route.len(), 2);
/// assert_eq!(
///     route.departure_at("Market"),
///     Some(StopTime::parse("10:10").unwrap()),
/// );
/// assert_eq!(route.departure_at("Harbor"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    stops: Vec<Stop>,
    // Name -> position in `stops`, for O(1) schedule lookup
    index: HashMap<String, usize>,
}

impl Route {
    /// Construct a route from stops in driving order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - fewer than two stops are given
    /// - departure times do not strictly increase
    /// - a stop name appears more than once
    pub fn new(stops: Vec<Stop>) -> Result<Self, RouteError> {
        if stops.len() < 2 {
            return Err(RouteError::TooFewStops);
        }

        let mut index = HashMap::with_capacity(stops.len());
        let mut previous: Option<StopTime> = None;

        for (pos, stop) in stops.iter().enumerate() {
            if let Some(prev) = previous {
                if stop.departure <= prev {
                    return Err(RouteError::TimesNotIncreasing {
                        stop: stop.name.clone(),
                    });
                }
            }
            previous = Some(stop.departure);

            if index.insert(stop.name.clone(), pos).is_some() {
                return Err(RouteError::DuplicateStop(stop.name.clone()));
            }
        }

        Ok(Self { stops, index })
    }

    /// Returns the scheduled departure at `stop`, if the route calls there.
    pub fn departure_at(&self, stop: &str) -> Option<StopTime> {
        self.index.get(stop).map(|&pos| self.stops[pos].departure)
    }

    /// Returns true if the route calls at `stop`.
    pub fn calls_at(&self, stop: &str) -> bool {
        self.index.contains_key(stop)
    }

    /// Returns the stops in driving order.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Returns the number of stops on the route.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns true if the route has no stops. Always false for a
    /// constructed route; present for collection-interface symmetry.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stop) in self.stops.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{} {}", stop.departure, stop.name)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{SERVICE_DAY_END, SERVICE_DAY_START};
    use proptest::prelude::*;

    /// Strategy: a list of distinct stop names with strictly increasing times.
    fn valid_stops() -> impl Strategy<Value = Vec<Stop>> {
        proptest::collection::btree_set(
            (SERVICE_DAY_START..=SERVICE_DAY_END, 0usize..10_000),
            2..12,
        )
        .prop_map(|set| {
            set.into_iter()
                .enumerate()
                .map(|(i, (minutes, salt))| {
                    // Distinct names derived from position and salt
                    let name = format!("Stop_{}_{}", letters(i), letters(salt));
                    Stop::new(name, StopTime::from_minutes(minutes).unwrap()).unwrap()
                })
                .collect()
        })
    }

    fn letters(mut n: usize) -> String {
        let mut s = String::new();
        loop {
            s.push((b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
        }
        s
    }

    proptest! {
        /// Strictly increasing, distinct-name stop lists always construct.
        #[test]
        fn valid_always_constructs(stops in valid_stops()) {
            // btree_set keys are distinct minute counts, so times strictly increase
            prop_assume!(stops.windows(2).all(|w| w[0].departure() < w[1].departure()));
            prop_assert!(Route::new(stops).is_ok());
        }

        /// Every declared stop is found with its declared time.
        #[test]
        fn lookup_matches_declaration(stops in valid_stops()) {
            prop_assume!(stops.windows(2).all(|w| w[0].departure() < w[1].departure()));
            let route = Route::new(stops.clone()).unwrap();
            for s in &stops {
                prop_assert_eq!(route.departure_at(s.name()), Some(s.departure()));
            }
        }

        /// Swapping two adjacent stops breaks the time ordering.
        #[test]
        fn swapped_times_rejected(stops in valid_stops(), pivot in 0usize..10) {
            prop_assume!(stops.windows(2).all(|w| w[0].departure() < w[1].departure()));
            let mut stops = stops;
            let i = pivot % (stops.len() - 1);
            stops.swap(i, i + 1);
            prop_assert!(Route::new(stops).is_err());
        }
    }
}

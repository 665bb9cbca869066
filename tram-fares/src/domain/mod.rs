//! Domain types for the tram fare processor.
//!
//! This module contains the core domain model types that represent
//! validated transcript data. All types enforce their invariants at
//! construction time, so code that receives these types can trust their
//! validity.

mod line;
mod query;
mod route;
mod ticket;
mod time;

pub use line::{InvalidLineId, LineId};
pub use query::{Leg, Query, QueryError, Waypoint};
pub use route::{Route, RouteError, Stop};
pub use ticket::{Price, PriceError, Ticket, TicketError};
pub use time::{SERVICE_DAY_END, SERVICE_DAY_START, StopTime, TimeError};

//! Domain types for stops and departures.

mod departure;
mod stop;

pub use departure::Departure;
pub use stop::{EmptyStopName, StopId, StopName};

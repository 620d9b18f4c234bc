//! MTD developer API client.
//!
//! The Champaign-Urbana MTD API serves real-time predictions for every
//! stop in the network. This crate consumes two of its methods:
//! - `getdeparturesbystop`: upcoming departures at one stop, looked ahead
//!   `pt` minutes
//! - `getstops`: the full stop listing, used to build the name → id index

mod client;
mod error;
mod mock;
mod source;
mod types;

pub use client::{MtdClient, MtdConfig};
pub use error::MtdError;
pub use mock::MockDepartureSource;
pub use source::{DepartureQuery, DepartureSource};
pub use types::{DepartureDto, DeparturesResponse, StopDto, StopsResponse};

//! Stop directory and its on-disk data.
//!
//! Provides the stop name → provider id lookup used to resolve departure
//! requests, loaded from the stop data directory at startup.

mod directory;
mod error;
mod store;

pub use directory::StopDirectory;
pub use error::{StopError, UnknownStop};
pub use store::{DEFAULT_DATA_DIR, StopStore};

//! Real-time bus departures from the Champaign-Urbana MTD API.
//!
//! Resolves stop names to provider ids, fetches upcoming departures, and
//! caches them behind a global cool-down so the API is hit at most once a
//! minute.

pub mod cache;
pub mod clock;
pub mod config;
pub mod domain;
pub mod mtd;
pub mod pretty;
pub mod stops;

//! Stop name → stop id resolution.

use std::collections::HashMap;

use crate::domain::{StopId, StopName};
use crate::mtd::StopDto;

use super::error::UnknownStop;

/// Read-only mapping from rider-facing stop names to provider ids.
///
/// Lookups are exact. Loaded once at startup and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopDirectory {
    ids: HashMap<StopName, StopId>,
}

impl StopDirectory {
    /// Build a directory from an existing name → id map.
    pub fn new(ids: HashMap<StopName, StopId>) -> Self {
        Self { ids }
    }

    /// Derive the directory from a raw stop listing.
    ///
    /// When a name appears more than once the last entry wins. Entries
    /// with an empty name are skipped.
    pub fn from_listing(stops: impl IntoIterator<Item = StopDto>) -> Self {
        let ids = stops
            .into_iter()
            .filter_map(|s| StopName::parse(s.stop_name).ok().map(|name| (name, s.stop_id)))
            .collect();
        Self { ids }
    }

    /// Look up the provider id for a stop name.
    pub fn resolve(&self, name: &StopName) -> Result<&StopId, UnknownStop> {
        self.ids.get(name).ok_or_else(|| UnknownStop(name.clone()))
    }

    pub fn contains(&self, name: &StopName) -> bool {
        self.ids.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// The underlying map, for persisting.
    pub fn as_map(&self) -> &HashMap<StopName, StopId> {
        &self.ids
    }
}

impl FromIterator<(StopName, StopId)> for StopDirectory {
    fn from_iter<I: IntoIterator<Item = (StopName, StopId)>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

//! Stop identity types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an empty stop name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stop name must not be empty")]
pub struct EmptyStopName;

/// A stop name as shown to riders, e.g. "Fourth and Chalmers".
///
/// Stop names are matched exactly: no trimming, case folding or fuzzy
/// matching. The only invariant is that the name is non-empty.
///
/// # Examples
///
/// ```
/// use mtd_departures::domain::StopName;
///
/// let stop = StopName::parse("Fourth and Chalmers").unwrap();
/// assert_eq!(stop.as_str(), "Fourth and Chalmers");
///
/// assert!(StopName::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StopName(String);

impl StopName {
    /// Parse a stop name, rejecting the empty string.
    pub fn parse(s: impl Into<String>) -> Result<Self, EmptyStopName> {
        let s = s.into();
        if s.is_empty() {
            return Err(EmptyStopName);
        }
        Ok(StopName(s))
    }

    /// Returns the stop name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StopName {
    type Error = EmptyStopName;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        StopName::parse(s)
    }
}

impl From<StopName> for String {
    fn from(name: StopName) -> Self {
        name.0
    }
}

impl fmt::Debug for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopName({:?})", self.0)
    }
}

impl fmt::Display for StopName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider-assigned stop identifier (e.g. `"IT"`, `"GRNCHMPL"`).
///
/// Opaque to this crate: it is only ever passed back to the provider.
/// Deserialises from a JSON string or number; numbers keep their JSON
/// spelling and are written back as strings.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawStopId", into = "String")]
pub struct StopId(String);

/// Wire forms a stop id arrives in.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStopId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

impl From<RawStopId> for StopId {
    fn from(raw: RawStopId) -> Self {
        match raw {
            RawStopId::Text(s) => StopId(s),
            RawStopId::Unsigned(n) => StopId(n.to_string()),
            RawStopId::Signed(n) => StopId(n.to_string()),
            RawStopId::Float(n) => StopId(n.to_string()),
        }
    }
}

impl From<StopId> for String {
    fn from(id: StopId) -> Self {
        id.0
    }
}

impl StopId {
    pub fn new(id: impl Into<String>) -> Self {
        StopId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopId({})", self.0)
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

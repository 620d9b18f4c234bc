//! Departure predictions.

use serde::{Serialize, Serializer};

/// A predicted upcoming bus departure at a stop.
///
/// Serialises as a two-element array `[headsign, expected_mins]`, which is
/// the shape printed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Route and destination, e.g. "22S Illini".
    pub headsign: String,

    /// Expected minutes until departure.
    pub expected_mins: i64,
}

impl Departure {
    pub fn new(headsign: impl Into<String>, expected_mins: i64) -> Self {
        Self {
            headsign: headsign.into(),
            expected_mins,
        }
    }
}

impl Serialize for Departure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.headsign, self.expected_mins).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_pair() {
        let departure = Departure::new("Yellow Line", 7);
        let json = serde_json::to_string(&departure).unwrap();
        assert_eq!(json, r#"["Yellow Line",7]"#);
    }
}

//! MTD API response DTOs.
//!
//! Only the fields this crate consumes are modelled; serde ignores the
//! rest of the (much larger) provider payloads.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{Departure, StopId};

/// Response from `getdeparturesbystop`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeparturesResponse {
    /// Upcoming departures, in the order the provider ranks them.
    pub departures: Vec<DepartureDto>,
}

/// One entry of the `departures` array.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DepartureDto {
    pub headsign: String,
    #[serde(deserialize_with = "whole_minutes")]
    pub expected_mins: i64,
}

/// Accept any JSON number for an ETA, rounding fractions to the nearest
/// minute.
fn whole_minutes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Minutes {
        Whole(i64),
        Fraction(f64),
    }

    match Minutes::deserialize(deserializer)? {
        Minutes::Whole(n) => Ok(n),
        Minutes::Fraction(f) if f.is_finite() => Ok(f.round() as i64),
        Minutes::Fraction(f) => Err(serde::de::Error::custom(format!(
            "expected_mins is not finite: {f}"
        ))),
    }
}

impl From<DepartureDto> for Departure {
    fn from(dto: DepartureDto) -> Self {
        Departure::new(dto.headsign, dto.expected_mins)
    }
}

impl DeparturesResponse {
    /// Convert to domain departures, preserving provider order.
    pub fn into_departures(self) -> Vec<Departure> {
        self.departures.into_iter().map(Departure::from).collect()
    }
}

/// Response from `getstops`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopsResponse {
    pub stops: Vec<StopDto>,
}

/// Minimal DTO for a stop: we only need its id and name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopDto {
    pub stop_id: StopId,
    pub stop_name: String,
}

//! The seam between the departure gateway and whatever answers
//! `getdeparturesbystop`.

use std::future::Future;

use crate::domain::StopId;

use super::error::MtdError;
use super::types::DeparturesResponse;

/// Parameters of a `getdeparturesbystop` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureQuery {
    pub stop_id: StopId,

    /// Provider changeset token. Never populated from responses, so this
    /// is always `None` today and is left off the query string.
    pub changeset_id: Option<String>,

    /// Look-ahead window in minutes.
    pub pt: u32,
}

/// Something that can answer departure requests.
///
/// Implemented by [`MtdClient`](super::MtdClient) for the live API and by
/// [`MockDepartureSource`](super::MockDepartureSource) for tests.
pub trait DepartureSource: Send + Sync {
    /// Fetch departures for a stop.
    ///
    /// Non-200 responses must be reported as [`MtdError::Api`] and
    /// unparseable 200 bodies as [`MtdError::Malformed`].
    fn get_departures_by_stop(
        &self,
        query: &DepartureQuery,
    ) -> impl Future<Output = Result<DeparturesResponse, MtdError>> + Send;
}

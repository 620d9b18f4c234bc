//! Mock departure source for testing without API access.
//!
//! Serves canned responses keyed by stop id and counts every request, so
//! tests can assert exactly when the gateway went to the network.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;

use crate::domain::{Departure, StopId};

use super::error::MtdError;
use super::source::{DepartureQuery, DepartureSource};
use super::types::{DepartureDto, DeparturesResponse};

/// Canned answer for one stop.
#[derive(Debug, Clone)]
enum MockResponse {
    Departures(Vec<DepartureDto>),
    Status(u16),
    Body(String),
}

/// Mock departure source backed by an in-memory table.
///
/// Clones share the same table and counters.
#[derive(Clone, Default)]
pub struct MockDepartureSource {
    responses: Arc<RwLock<HashMap<StopId, MockResponse>>>,
    queries: Arc<RwLock<Vec<DepartureQuery>>>,
    calls: Arc<AtomicUsize>,
}

impl MockDepartureSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests for `stop_id` with 200 and these departures.
    pub async fn respond_with(&self, stop_id: StopId, departures: Vec<Departure>) {
        let dtos = departures
            .into_iter()
            .map(|d| DepartureDto {
                headsign: d.headsign,
                expected_mins: d.expected_mins,
            })
            .collect();
        self.responses
            .write()
            .await
            .insert(stop_id, MockResponse::Departures(dtos));
    }

    /// Answer requests for `stop_id` with a non-200 status.
    pub async fn respond_with_status(&self, stop_id: StopId, status: u16) {
        self.responses
            .write()
            .await
            .insert(stop_id, MockResponse::Status(status));
    }

    /// Answer requests for `stop_id` with 200 and a raw body, which is
    /// parsed the way the live client parses it.
    pub async fn respond_with_body(&self, stop_id: StopId, body: impl Into<String>) {
        self.responses
            .write()
            .await
            .insert(stop_id, MockResponse::Body(body.into()));
    }

    /// Number of requests served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every query received, oldest first.
    pub async fn queries(&self) -> Vec<DepartureQuery> {
        self.queries.read().await.clone()
    }
}

impl DepartureSource for MockDepartureSource {
    async fn get_departures_by_stop(
        &self,
        query: &DepartureQuery,
    ) -> Result<DeparturesResponse, MtdError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.write().await.push(query.clone());

        let responses = self.responses.read().await;

        match responses.get(&query.stop_id) {
            Some(MockResponse::Departures(departures)) => Ok(DeparturesResponse {
                departures: departures.clone(),
            }),
            Some(MockResponse::Status(status)) => Err(MtdError::Api {
                status: *status,
                message: format!("mock status for {}", query.stop_id),
            }),
            Some(MockResponse::Body(body)) => {
                serde_json::from_str(body).map_err(|e| MtdError::Malformed {
                    message: e.to_string(),
                    body: Some(body.clone()),
                })
            }
            None => Err(MtdError::Api {
                status: 404,
                message: format!("No mock data for stop {}", query.stop_id),
            }),
        }
    }
}

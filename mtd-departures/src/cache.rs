//! Caching layer for MTD departure lookups.
//!
//! A single "last fetch" instant, shared by every stop, gates access to the
//! API: within the cool-down after any successful fetch, lookups are served
//! from the cache only, whichever stop they ask for. Once it lapses the next
//! lookup goes to the network and restarts the cool-down.
//!
//! Inside the cool-down a stop with no cached entry is a
//! [`GatewayError::CacheMiss`] rather than a network call.

use std::collections::HashMap;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::domain::{Departure, StopName};
use crate::mtd::{DepartureQuery, DepartureSource, MtdError};
use crate::stops::{StopDirectory, UnknownStop};

/// Configuration for the gateway.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long after a successful fetch the API is left alone.
    pub cool_down: Duration,

    /// Look-ahead window sent as `pt`, in minutes.
    pub pt: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cool_down: Duration::seconds(60),
            pt: 60,
        }
    }
}

/// Errors from departure lookups.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Stop name not in the directory
    #[error(transparent)]
    UnknownStop(#[from] UnknownStop),

    /// Favourite stop rejected because it is not in the directory
    #[error("invalid stop name: {0}")]
    InvalidStop(StopName),

    /// Cool-down active and nothing cached for this stop
    #[error("no cached departures for {stop}; retry in {}s", retry_after.as_secs())]
    CacheMiss {
        stop: StopName,
        retry_after: StdDuration,
    },

    /// Favourite lookup requested before a favourite was set
    #[error("no favourite stop set")]
    NoFavoriteStop,

    /// The departure source failed
    #[error(transparent)]
    Source(#[from] MtdError),
}

/// Most recent departures per stop.
///
/// Entries are replaced wholesale on refresh and never expire on their own.
#[derive(Debug, Default)]
pub struct DepartureCache {
    entries: HashMap<StopName, Vec<Departure>>,
}

impl DepartureCache {
    pub fn get(&self, stop: &StopName) -> Option<&Vec<Departure>> {
        self.entries.get(stop)
    }

    /// Replace the entry for `stop`.
    pub fn insert(&mut self, stop: StopName, departures: Vec<Departure>) {
        self.entries.insert(stop, departures);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Everything the gateway mutates, guarded by one lock.
#[derive(Debug, Default)]
struct GatewayState {
    cache: DepartureCache,

    /// Last successful fetch for any stop. `None` until the first one.
    last_fetch: Option<DateTime<Utc>>,

    favorite: Option<StopName>,

    /// Sent as `changeset_id`. Nothing ever sets it.
    changeset_id: Option<String>,
}

impl GatewayState {
    /// Time left in the cool-down at `now`, if it is still running.
    fn cool_down_remaining(&self, now: DateTime<Utc>, cool_down: Duration) -> Option<Duration> {
        let elapsed = now - self.last_fetch?;
        (elapsed < cool_down).then(|| cool_down - elapsed)
    }
}

/// Departure lookups over a [`DepartureSource`], with caching.
pub struct DepartureGateway<S, C = SystemClock> {
    source: S,
    directory: StopDirectory,
    config: CacheConfig,
    clock: C,
    state: Mutex<GatewayState>,
}

impl<S: DepartureSource> DepartureGateway<S> {
    /// Create a gateway on the system clock, with an empty cache and no
    /// previous fetch.
    pub fn new(source: S, directory: StopDirectory, config: CacheConfig) -> Self {
        Self::with_clock(source, directory, config, SystemClock)
    }
}

impl<S: DepartureSource, C: Clock> DepartureGateway<S, C> {
    /// Create a gateway that reads time from `clock`.
    pub fn with_clock(source: S, directory: StopDirectory, config: CacheConfig, clock: C) -> Self {
        Self {
            source,
            directory,
            config,
            clock,
            state: Mutex::new(GatewayState::default()),
        }
    }

    /// The directory stop names are resolved against.
    pub fn directory(&self) -> &StopDirectory {
        &self.directory
    }

    /// Get departures for a stop.
    ///
    /// Transport failures and non-200 responses yield an empty list and
    /// leave the cache and cool-down untouched, so an empty result does not
    /// distinguish "nothing due" from "API down". Use
    /// [`try_get_departures`](Self::try_get_departures) to tell them apart.
    pub async fn get_departures(&self, stop: &StopName) -> Result<Vec<Departure>, GatewayError> {
        match self.try_get_departures(stop).await {
            Err(GatewayError::Source(e)) if e.is_unavailable() => {
                warn!(stop = %stop, error = %e, "departure fetch failed, returning empty result");
                Ok(Vec::new())
            }
            result => result,
        }
    }

    /// Get departures for a stop, reporting source failures as errors.
    pub async fn try_get_departures(
        &self,
        stop: &StopName,
    ) -> Result<Vec<Departure>, GatewayError> {
        // Held across the fetch so concurrent callers cannot both miss.
        let mut state = self.state.lock().await;

        let now = self.clock.now();
        if let Some(remaining) = state.cool_down_remaining(now, self.config.cool_down) {
            return match state.cache.get(stop) {
                Some(cached) => {
                    debug!(stop = %stop, "departure cache hit");
                    Ok(cached.clone())
                }
                None => Err(GatewayError::CacheMiss {
                    stop: stop.clone(),
                    retry_after: remaining.to_std().unwrap_or_default(),
                }),
            };
        }

        let stop_id = self.directory.resolve(stop)?;
        let query = DepartureQuery {
            stop_id: stop_id.clone(),
            changeset_id: state.changeset_id.clone(),
            pt: self.config.pt,
        };

        let departures = self
            .source
            .get_departures_by_stop(&query)
            .await?
            .into_departures();

        info!(stop = %stop, count = departures.len(), "new departure cache entry");
        state.cache.insert(stop.clone(), departures.clone());
        // The cool-down runs from when the fetch completed.
        state.last_fetch = Some(self.clock.now());

        Ok(departures)
    }

    /// Set the favourite stop.
    ///
    /// Fails without changing the current favourite if the name is not in
    /// the directory.
    pub async fn set_favorite_stop(&self, stop: StopName) -> Result<(), GatewayError> {
        if !self.directory.contains(&stop) {
            return Err(GatewayError::InvalidStop(stop));
        }
        self.state.lock().await.favorite = Some(stop);
        Ok(())
    }

    pub async fn favorite_stop(&self) -> Option<StopName> {
        self.state.lock().await.favorite.clone()
    }

    /// Departures for the favourite stop.
    pub async fn get_favorite_departures(&self) -> Result<Vec<Departure>, GatewayError> {
        let stop = self
            .favorite_stop()
            .await
            .ok_or(GatewayError::NoFavoriteStop)?;
        self.get_departures(&stop).await
    }

    /// When the last successful fetch happened, if any.
    pub async fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.last_fetch
    }

    /// Currently cached departures for a stop.
    pub async fn cached(&self, stop: &StopName) -> Option<Vec<Departure>> {
        self.state.lock().await.cache.get(stop).cloned()
    }

    /// Number of stops with a cache entry.
    pub async fn cache_entry_count(&self) -> usize {
        self.state.lock().await.cache.len()
    }
}

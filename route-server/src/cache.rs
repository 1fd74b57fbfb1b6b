//! Caching layer for provider responses.
//!
//! Transit itineraries, point-to-point driving estimates and station
//! searches are idempotent over a short horizon. Station searches and
//! station-to-destination itineraries recur across requests that start or
//! end near each other. Keys are coordinates snapped to a ~1 m grid.
//!
//! Batch ETAs are not cached: their inputs are whole station lists, which
//! rarely repeat exactly. Failures are never cached, so an outage stops
//! affecting results as soon as the provider recovers.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::{BatchEta, DrivingEta, Itinerary, Station};
use crate::geo::quantize;
use crate::planner::RouteProviders;

/// Cache key for an origin/destination pair.
type PairKey = (i64, i64, i64, i64);

/// Cache key for a station search: (x, y, radius).
type StationKey = (i64, i64, u32);

fn pair_key(ox: f64, oy: f64, dx: f64, dy: f64) -> PairKey {
    (quantize(ox), quantize(oy), quantize(dx), quantize(dy))
}

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per response kind.
    pub max_capacity: u64,
}

impl CacheConfig {
    /// Config with the given TTL and default capacity.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(120),
            max_capacity: 10_000,
        }
    }
}

/// Providers with caching.
///
/// Wraps any `RouteProviders` and caches successful responses.
pub struct CachedProviders<P> {
    inner: P,
    itineraries: MokaCache<PairKey, Vec<Itinerary>>,
    driving: MokaCache<PairKey, DrivingEta>,
    stations: MokaCache<StationKey, Vec<Station>>,
}

impl<P: RouteProviders> CachedProviders<P> {
    /// Create a new cached provider set.
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        Self {
            inner,
            itineraries: build(config),
            driving: build(config),
            stations: build(config),
        }
    }

    #[cfg(test)]
    fn inner(&self) -> &P {
        &self.inner
    }
}

fn build<K, V>(config: &CacheConfig) -> MokaCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    MokaCache::builder()
        .time_to_live(config.ttl)
        .max_capacity(config.max_capacity)
        .build()
}

impl<P: RouteProviders> RouteProviders for CachedProviders<P> {
    async fn fetch_transit_itineraries(
        &self,
        origin_x: f64,
        origin_y: f64,
        dest_x: f64,
        dest_y: f64,
    ) -> Option<Vec<Itinerary>> {
        let key = pair_key(origin_x, origin_y, dest_x, dest_y);

        if let Some(cached) = self.itineraries.get(&key).await {
            return Some(cached);
        }

        let fetched = self
            .inner
            .fetch_transit_itineraries(origin_x, origin_y, dest_x, dest_y)
            .await?;
        self.itineraries.insert(key, fetched.clone()).await;
        Some(fetched)
    }

    async fn fetch_driving_eta(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<DrivingEta> {
        let key = pair_key(origin_lng, origin_lat, dest_lng, dest_lat);

        if let Some(cached) = self.driving.get(&key).await {
            return Some(cached);
        }

        let fetched = self
            .inner
            .fetch_driving_eta(origin_lng, origin_lat, dest_lng, dest_lat)
            .await?;
        self.driving.insert(key, fetched).await;
        Some(fetched)
    }

    async fn fetch_batch_eta_to_destinations(
        &self,
        origin_lng: f64,
        origin_lat: f64,
        destinations: &[Station],
    ) -> Option<Vec<Option<BatchEta>>> {
        self.inner
            .fetch_batch_eta_to_destinations(origin_lng, origin_lat, destinations)
            .await
    }

    async fn fetch_batch_eta_from_origins(
        &self,
        origins: &[Station],
        dest_lng: f64,
        dest_lat: f64,
    ) -> Option<Vec<Option<BatchEta>>> {
        self.inner
            .fetch_batch_eta_from_origins(origins, dest_lng, dest_lat)
            .await
    }

    async fn fetch_nearby_stations(&self, x: f64, y: f64, radius_m: u32) -> Vec<Station> {
        let key = (quantize(x), quantize(y), radius_m);

        if let Some(cached) = self.stations.get(&key).await {
            return cached;
        }

        let fetched = self.inner.fetch_nearby_stations(x, y, radius_m).await;
        // An empty list may be a failed search
        if !fetched.is_empty() {
            self.stations.insert(key, fetched.clone()).await;
        }
        fetched
    }
}

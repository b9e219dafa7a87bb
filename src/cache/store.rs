//! In-memory memoization store shared by the retrieval clients

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::data::{ParkSite, PlacesResponse};

/// Lowercases and trims a site-detail cache key.
///
/// Both the lookup and the store path go through this function, so a detail
/// URL hits the same entry regardless of the casing a caller used.
pub fn normalize_site_key(detail_url: &str) -> String {
    detail_url.trim().to_lowercase()
}

/// One cached value and when it was inserted
#[derive(Debug, Clone)]
struct Entry<T> {
    value: T,
    cached_at: DateTime<Utc>,
}

impl<T> Entry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            cached_at: Utc::now(),
        }
    }
}

/// Hit and miss totals per namespace
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub site_hits: u64,
    pub site_misses: u64,
    pub places_hits: u64,
    pub places_misses: u64,
}

#[derive(Default)]
struct Inner {
    sites: HashMap<String, Entry<ParkSite>>,
    places: HashMap<String, Entry<PlacesResponse>>,
    stats: CacheStats,
}

/// Session-lifetime cache for site details and nearby-places documents.
///
/// Site entries are keyed by normalized detail URL, places entries by the
/// verbatim postal code. The two namespaces are separate maps, so a key in
/// one can never shadow a key in the other. Entries are never evicted or
/// expired; the cache lives exactly as long as the interactive session.
///
/// An internal mutex makes the cache safe to share across the bounded
/// number of detail fetches in flight while a state listing loads.
pub struct SessionCache {
    inner: Mutex<Inner>,
}

impl SessionCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Looks up a site record by detail URL
    pub fn get_site(&self, detail_url: &str) -> Option<ParkSite> {
        let key = normalize_site_key(detail_url);
        let mut inner = self.inner.lock().unwrap();
        let hit = inner
            .sites
            .get(&key)
            .map(|entry| (entry.value.clone(), entry.cached_at));
        match hit {
            Some((value, cached_at)) => {
                inner.stats.site_hits += 1;
                debug!(
                    "site cache hit for {} ({}s old)",
                    key,
                    (Utc::now() - cached_at).num_seconds()
                );
                Some(value)
            }
            None => {
                inner.stats.site_misses += 1;
                None
            }
        }
    }

    /// Stores a site record under its detail URL
    pub fn put_site(&self, detail_url: &str, record: ParkSite) {
        let key = normalize_site_key(detail_url);
        let mut inner = self.inner.lock().unwrap();
        inner.sites.insert(key, Entry::new(record));
    }

    /// Looks up a nearby-places document by postal code
    pub fn get_places(&self, postal_code: &str) -> Option<PlacesResponse> {
        let mut inner = self.inner.lock().unwrap();
        let hit = inner
            .places
            .get(postal_code)
            .map(|entry| (entry.value.clone(), entry.cached_at));
        match hit {
            Some((value, cached_at)) => {
                inner.stats.places_hits += 1;
                debug!(
                    "places cache hit for {} ({}s old)",
                    postal_code,
                    (Utc::now() - cached_at).num_seconds()
                );
                Some(value)
            }
            None => {
                inner.stats.places_misses += 1;
                None
            }
        }
    }

    /// Stores a nearby-places document under a verbatim postal code
    pub fn put_places(&self, postal_code: &str, document: PlacesResponse) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .places
            .insert(postal_code.to_string(), Entry::new(document));
    }

    /// Snapshot of the hit/miss counters
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().unwrap().stats
    }
}

impl Default for SessionCache {
    fn default() -> Self {
        Self::new()
    }
}

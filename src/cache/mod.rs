//! In-memory cache for retrieval results
//!
//! One [`SessionCache`] instance is created per interactive session and
//! handed to the site and places clients. It memoizes per-site detail
//! fetches (keyed by normalized detail URL) and nearby-places lookups
//! (keyed by verbatim postal code) in two separate namespaces. Nothing is
//! persisted: the cache starts empty and is dropped with the process.

mod store;

pub use store::{normalize_site_key, CacheStats, SessionCache};

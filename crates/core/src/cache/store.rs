//! In-memory TTL cache with stale-on-error fallback.
//!
//! Entries are fresh while `now < fetched_at + ttl`. Expiry is evaluated
//! lazily on read; there is no sweeper. When the cache is full, admitting a
//! new key evicts the entry with the oldest `fetched_at` (a linear scan, the
//! cache is small).
//!
//! Concurrent callers for the same key queue on a per-key async lock, so only
//! one upstream fetch runs per key at a time and the queued callers reuse its
//! result. A failed fetch is shared the same way: callers queued behind it take
//! the stale fallback with that error instead of calling upstream again. The
//! entry map lock is held only for short, non-async sections and never across
//! a fetch.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

use super::key::CacheKey;
use crate::Error;

/// Default maximum number of distinct keys.
pub const DEFAULT_CAPACITY: usize = 500;

/// Freshness of a value returned by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    /// Fetched within its TTL.
    Fresh,
    /// Last-known-good data served because a refetch failed.
    Stale,
}

/// A value tagged with its freshness, so callers can label degraded data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cached<T> {
    pub value: T,
    pub freshness: Freshness,
}

impl<T> Cached<T> {
    pub fn fresh(value: T) -> Self {
        Self { value, freshness: Freshness::Fresh }
    }

    pub fn stale(value: T) -> Self {
        Self { value, freshness: Freshness::Stale }
    }

    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }

    /// Transform the value, keeping the freshness tag.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Cached<U> {
        Cached { value: f(self.value), freshness: self.freshness }
    }

    /// Fallible [`Cached::map`].
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U, Error>) -> Result<Cached<U>, Error> {
        Ok(Cached { value: f(self.value)?, freshness: self.freshness })
    }
}

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub stale_served: u64,
    pub evictions: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    stale_served: AtomicU64,
    evictions: AtomicU64,
}

impl Counters {
    fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

struct CacheEntry<V> {
    value: Arc<V>,
    fetched_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        match self.fetched_at.checked_add(self.ttl) {
            Some(deadline) => now < deadline,
            None => true,
        }
    }
}

/// Lock callers for one key queue on. It holds the error of the last failed
/// fetch in this flight, if any.
type Turn = Arc<tokio::sync::Mutex<Option<Error>>>;

/// Per-key fetch slot: the lock callers queue on, and how many hold it.
struct Flight {
    turn: Turn,
    waiters: usize,
}

type FlightMap = Mutex<HashMap<CacheKey, Flight>>;

/// Registration in a key's fetch slot. Dropping it (including on
/// cancellation) releases the slot once the last waiter leaves.
struct FlightLease<'a> {
    flights: &'a FlightMap,
    key: CacheKey,
    turn: Turn,
}

impl Drop for FlightLease<'_> {
    fn drop(&mut self) {
        let mut flights = lock(self.flights);
        if let Some(flight) = flights.get_mut(&self.key) {
            flight.waiters = flight.waiters.saturating_sub(1);
            if flight.waiters == 0 {
                flights.remove(&self.key);
            }
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Bounded TTL cache shared by all provider adapters.
pub struct TtlCache<V> {
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
    flights: FlightMap,
    capacity: usize,
    counters: Counters,
}

impl<V> Default for TtlCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

impl<V> TtlCache<V> {
    /// Create a cache holding at most `capacity` keys (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            flights: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
            counters: Counters::default(),
        }
    }

    /// Return the cached value for `key`, fetching it when missing or expired.
    ///
    /// - A fresh entry is returned without calling `fetch`.
    /// - On a successful fetch the value is stored and returned as fresh.
    /// - On a failed fetch the previous value, if any, is returned as stale;
    ///   otherwise the call fails with [`Error::ProviderUnavailable`].
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` for a zero `ttl` and
    /// `Error::ProviderUnavailable` when nothing can be served.
    pub async fn get_or_fetch<F, Fut>(&self, key: &CacheKey, ttl: Duration, fetch: F) -> Result<Cached<Arc<V>>, Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, Error>>,
    {
        if ttl.is_zero() {
            return Err(Error::InvalidInput("cache ttl must be greater than zero".into()));
        }

        if let Some(value) = self.lookup_fresh(key) {
            Counters::bump(&self.counters.hits);
            tracing::debug!(key = %key, "cache hit");
            return Ok(Cached::fresh(value));
        }

        let lease = self.join_flight(key);
        let mut turn = lease.turn.lock().await;

        // The caller ahead of us in this slot may have refreshed the entry.
        if let Some(value) = self.lookup_fresh(key) {
            Counters::bump(&self.counters.hits);
            tracing::debug!(key = %key, "cache hit after waiting on in-flight fetch");
            return Ok(Cached::fresh(value));
        }

        // ...or failed, in which case we share its outcome.
        if let Some(err) = turn.as_ref() {
            tracing::debug!(key = %key, "in-flight fetch failed, not refetching");
            return self.fall_back(key, err);
        }

        Counters::bump(&self.counters.misses);
        tracing::debug!(key = %key, "cache miss");

        match fetch().await {
            Ok(value) => {
                let value = Arc::new(value);
                self.admit(key, Arc::clone(&value), ttl);
                Ok(Cached::fresh(value))
            }
            Err(err) => {
                let result = self.fall_back(key, &err);
                *turn = Some(err);
                result
            }
        }
    }

    /// Serve the stale entry for `key` after a failed fetch, if there is one.
    fn fall_back(&self, key: &CacheKey, err: &Error) -> Result<Cached<Arc<V>>, Error> {
        match self.lookup_any(key) {
            Some(value) => {
                Counters::bump(&self.counters.stale_served);
                tracing::warn!(key = %key, error = %err, "refetch failed, serving stale entry");
                Ok(Cached::stale(value))
            }
            None => {
                tracing::warn!(key = %key, error = %err, "fetch failed with nothing cached");
                Err(Error::ProviderUnavailable(err.to_string()))
            }
        }
    }

    fn join_flight(&self, key: &CacheKey) -> FlightLease<'_> {
        let mut flights = lock(&self.flights);
        let flight = flights
            .entry(key.clone())
            .or_insert_with(|| Flight { turn: Arc::new(tokio::sync::Mutex::new(None)), waiters: 0 });
        flight.waiters += 1;
        FlightLease { flights: &self.flights, key: key.clone(), turn: Arc::clone(&flight.turn) }
    }

    fn lookup_fresh(&self, key: &CacheKey) -> Option<Arc<V>> {
        let entries = lock(&self.entries);
        entries
            .get(key)
            .filter(|entry| entry.is_fresh(Instant::now()))
            .map(|entry| Arc::clone(&entry.value))
    }

    fn lookup_any(&self, key: &CacheKey) -> Option<Arc<V>> {
        lock(&self.entries).get(key).map(|entry| Arc::clone(&entry.value))
    }

    /// Store `value`, evicting the oldest-fetched entry first when a new key
    /// would exceed capacity.
    fn admit(&self, key: &CacheKey, value: Arc<V>, ttl: Duration) {
        let mut entries = lock(&self.entries);

        if !entries.contains_key(key) && entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.fetched_at)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
                Counters::bump(&self.counters.evictions);
                tracing::debug!(evicted = %oldest, "cache at capacity, evicted oldest entry");
            }
        }

        entries.insert(key.clone(), CacheEntry { value, fetched_at: Instant::now(), ttl });
    }

    /// Freshness of the entry for `key`, or `None` when absent.
    pub fn freshness(&self, key: &CacheKey) -> Option<Freshness> {
        let entries = lock(&self.entries);
        entries.get(key).map(|entry| {
            if entry.is_fresh(Instant::now()) { Freshness::Fresh } else { Freshness::Stale }
        })
    }

    pub fn contains_key(&self, key: &CacheKey) -> bool {
        lock(&self.entries).contains_key(key)
    }

    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every entry. In-flight fetches still complete and store.
    pub fn clear(&self) {
        lock(&self.entries).clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            stale_served: self.counters.stale_served.load(Ordering::Relaxed),
            evictions: self.counters.evictions.load(Ordering::Relaxed),
        }
    }
}

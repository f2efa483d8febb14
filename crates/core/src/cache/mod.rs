//! In-memory response cache for upstream provider documents.
//!
//! This module provides a bounded, concurrency-safe TTL cache used by every
//! provider adapter. It supports:
//!
//! - Canonical request fingerprints (SHA-256 over URL + sorted params)
//! - Lazy freshness evaluation at read time
//! - Stale-on-error fallback to last-known-good data
//! - Oldest-fetch eviction at capacity
//! - One in-flight fetch per key

pub mod key;
pub mod store;

pub use crate::Error;

pub use key::CacheKey;
pub use store::{CacheStats, Cached, DEFAULT_CAPACITY, Freshness, TtlCache};

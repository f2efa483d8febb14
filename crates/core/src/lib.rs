//! Core types and shared functionality for the minbar content gateway.
//!
//! This crate provides:
//! - In-memory TTL cache with stale fallback and per-key single flight
//! - Unified error types
//! - Layered configuration
//! - Deterministic daily index selection
//! - Qibla geodesy

pub mod cache;
pub mod config;
pub mod daily;
pub mod error;
pub mod geodesy;

pub use cache::{CacheKey, Cached, Freshness, TtlCache};
pub use config::{AppConfig, ConfigError};
pub use error::Error;

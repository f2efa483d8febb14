//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Largest accepted cache capacity.
const MAX_CACHE_CAPACITY: usize = 100_000;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid { field: field.into(), reason: reason.into() }
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `max_bytes` is 0 or exceeds 50MB
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_retries` exceeds 10
    /// - `cache_capacity` is 0 or exceeds 100000
    /// - any TTL is 0
    /// - any provider URL is not an absolute http(s) URL
    /// - `user_agent` or a default edition is empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bytes == 0 {
            return Err(invalid("max_bytes", "must be greater than 0"));
        }
        if self.max_bytes > 50 * 1024 * 1024 {
            return Err(invalid("max_bytes", "must not exceed 50MB"));
        }

        if self.timeout_ms < 100 {
            return Err(invalid("timeout_ms", "must be at least 100ms"));
        }
        if self.timeout_ms > 300_000 {
            return Err(invalid("timeout_ms", "must not exceed 5 minutes (300000ms)"));
        }

        if self.max_retries > 10 {
            return Err(invalid("max_retries", "must not exceed 10"));
        }

        if self.cache_capacity == 0 {
            return Err(invalid("cache_capacity", "must be greater than 0"));
        }
        if self.cache_capacity > MAX_CACHE_CAPACITY {
            return Err(invalid("cache_capacity", "must not exceed 100000"));
        }

        let ttls = [
            ("ttl.text_secs", self.ttl.text_secs),
            ("ttl.reference_secs", self.ttl.reference_secs),
            ("ttl.search_secs", self.ttl.search_secs),
            ("ttl.prayer_secs", self.ttl.prayer_secs),
            ("ttl.geo_secs", self.ttl.geo_secs),
        ];
        for (field, secs) in ttls {
            if secs == 0 {
                return Err(invalid(field, "must be greater than 0"));
            }
        }

        let urls = [
            ("providers.quran", &self.providers.quran),
            ("providers.hadith", &self.providers.hadith),
            ("providers.prayer", &self.providers.prayer),
            ("providers.geo", &self.providers.geo),
            ("providers.audio_cdn", &self.providers.audio_cdn),
        ];
        for (field, raw) in urls {
            match url::Url::parse(raw) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(_) => return Err(invalid(field, "scheme must be http or https")),
                Err(e) => return Err(invalid(field, &e.to_string())),
            }
        }

        if self.user_agent.is_empty() {
            return Err(invalid("user_agent", "must not be empty"));
        }
        if self.default_reciter.is_empty() {
            return Err(invalid("default_reciter", "must not be empty"));
        }
        if self.default_translation.is_empty() {
            return Err(invalid("default_translation", "must not be empty"));
        }

        if self.ttl.prayer_secs > self.ttl.text_secs {
            tracing::warn!(
                prayer_secs = self.ttl.prayer_secs,
                text_secs = self.ttl.text_secs,
                "prayer times outlive verse text in the cache; \
                 date-dependent timings may be served for the wrong day"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_bytes_zero() {
        let config = AppConfig { max_bytes: 0, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_max_bytes_exceeds_limit() {
        let config = AppConfig { max_bytes: 51 * 1024 * 1024, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_bytes"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_too_many_retries() {
        let config = AppConfig { max_retries: 11, ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_retries"));
    }

    #[test]
    fn test_validate_cache_capacity_bounds() {
        let config = AppConfig { cache_capacity: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "cache_capacity"));

        let config = AppConfig { cache_capacity: 100_001, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field, .. }) if field == "cache_capacity"));
    }

    #[test]
    fn test_validate_zero_ttl() {
        let mut config = AppConfig::default();
        config.ttl.geo_secs = 0;
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "ttl.geo_secs"));
    }

    #[test]
    fn test_validate_provider_url() {
        let mut config = AppConfig::default();
        config.providers.hadith = "not a url".into();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "providers.hadith"));

        let mut config = AppConfig::default();
        config.providers.prayer = "ftp://aladhan.com".into();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "providers.prayer"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { max_bytes: 1, timeout_ms: 100, max_retries: 0, cache_capacity: 1, ..Default::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_values() {
        let config = AppConfig {
            max_bytes: 50 * 1024 * 1024,
            timeout_ms: 300_000,
            max_retries: 10,
            cache_capacity: 100_000,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}

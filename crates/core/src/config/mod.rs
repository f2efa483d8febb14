//! Gateway configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MINBAR_*)
//! 2. TOML config file (if MINBAR_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Gateway configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MINBAR_*, nested keys split on `__`)
/// 2. TOML config file (if MINBAR_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent string for outbound requests.
    ///
    /// Set via MINBAR_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in milliseconds.
    ///
    /// Set via MINBAR_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum response body size in bytes.
    ///
    /// Set via MINBAR_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Retries after the first attempt for transient transport failures.
    ///
    /// Set via MINBAR_MAX_RETRIES environment variable.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential retry backoff in milliseconds.
    ///
    /// Set via MINBAR_RETRY_BACKOFF_MS environment variable.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Maximum number of distinct keys held by the response cache.
    ///
    /// Set via MINBAR_CACHE_CAPACITY environment variable.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Upstream base URLs.
    #[serde(default)]
    pub providers: ProviderUrls,

    /// Freshness windows per content class.
    #[serde(default)]
    pub ttl: TtlConfig,

    /// Reciter edition used when the caller does not choose one.
    #[serde(default = "default_reciter")]
    pub default_reciter: String,

    /// Translation edition used when the caller does not choose one.
    #[serde(default = "default_translation")]
    pub default_translation: String,

    /// Aladhan calculation method (4 = Umm Al-Qura).
    #[serde(default = "default_prayer_method")]
    pub prayer_method: u8,
}

/// Base URLs for every upstream provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderUrls {
    /// Quran text, translation, search, audio and tafsir API.
    #[serde(default = "default_quran_url")]
    pub quran: String,

    /// Hadith editions JSON tree.
    #[serde(default = "default_hadith_url")]
    pub hadith: String,

    /// Prayer-times-by-coordinate API.
    #[serde(default = "default_prayer_url")]
    pub prayer: String,

    /// IP geolocation API.
    #[serde(default = "default_geo_url")]
    pub geo: String,

    /// Verse audio CDN (bitrate directory).
    #[serde(default = "default_audio_cdn_url")]
    pub audio_cdn: String,
}

/// Freshness windows in seconds, one per content class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtlConfig {
    /// Verse text, translations, audio links and hadith text.
    #[serde(default = "default_text_secs")]
    pub text_secs: u64,

    /// Tafsir and the small hadith search corpus.
    #[serde(default = "default_reference_secs")]
    pub reference_secs: u64,

    /// Quran search results.
    #[serde(default = "default_search_secs")]
    pub search_secs: u64,

    /// Prayer times (date and location dependent).
    #[serde(default = "default_prayer_secs")]
    pub prayer_secs: u64,

    /// IP geolocation lookups.
    #[serde(default = "default_geo_secs")]
    pub geo_secs: u64,
}

fn default_user_agent() -> String {
    "minbar/0.1".into()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_bytes() -> usize {
    10_485_760 // 10MB, a full juz with metadata is a few hundred KB
}

fn default_max_retries() -> u32 {
    2
}

fn default_retry_backoff_ms() -> u64 {
    200
}

fn default_cache_capacity() -> usize {
    500
}

fn default_reciter() -> String {
    "ar.alafasy".into()
}

fn default_translation() -> String {
    "en.sahih".into()
}

fn default_prayer_method() -> u8 {
    4
}

fn default_quran_url() -> String {
    "https://api.alquran.cloud/v1".into()
}

fn default_hadith_url() -> String {
    "https://cdn.jsdelivr.net/gh/fawazahmed0/hadith-api@1".into()
}

fn default_prayer_url() -> String {
    "https://api.aladhan.com/v1".into()
}

fn default_geo_url() -> String {
    "http://ipwho.is".into()
}

fn default_audio_cdn_url() -> String {
    "https://cdn.islamic.network/quran/audio/128".into()
}

fn default_text_secs() -> u64 {
    86_400
}

fn default_reference_secs() -> u64 {
    604_800
}

fn default_search_secs() -> u64 {
    3_600
}

fn default_prayer_secs() -> u64 {
    1_800
}

fn default_geo_secs() -> u64 {
    3_600
}

impl Default for ProviderUrls {
    fn default() -> Self {
        Self {
            quran: default_quran_url(),
            hadith: default_hadith_url(),
            prayer: default_prayer_url(),
            geo: default_geo_url(),
            audio_cdn: default_audio_cdn_url(),
        }
    }
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            text_secs: default_text_secs(),
            reference_secs: default_reference_secs(),
            search_secs: default_search_secs(),
            prayer_secs: default_prayer_secs(),
            geo_secs: default_geo_secs(),
        }
    }
}

impl TtlConfig {
    pub fn text(&self) -> Duration {
        Duration::from_secs(self.text_secs)
    }

    pub fn reference(&self) -> Duration {
        Duration::from_secs(self.reference_secs)
    }

    pub fn search(&self) -> Duration {
        Duration::from_secs(self.search_secs)
    }

    pub fn prayer(&self) -> Duration {
        Duration::from_secs(self.prayer_secs)
    }

    pub fn geo(&self) -> Duration {
        Duration::from_secs(self.geo_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            cache_capacity: default_cache_capacity(),
            providers: ProviderUrls::default(),
            ttl: TtlConfig::default(),
            default_reciter: default_reciter(),
            default_translation: default_translation(),
            prayer_method: default_prayer_method(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Retry backoff base as Duration.
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MINBAR_`
    /// 2. TOML file from `MINBAR_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MINBAR_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MINBAR_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

//! The gateway: one fetcher, one cache, and the adapters built on them.

use std::sync::Arc;

use serde::Deserialize;
use serde::de::{DeserializeOwned, Deserializer};
use serde_json::{Value, json};

use minbar_core::{AppConfig, Cached, Error, TtlCache};

use crate::calendar::{CalendarAdapter, HijriConverter};
use crate::endpoint::Endpoint;
use crate::fetch::{FetchClient, FetchConfig, JsonFetcher};
use crate::geo::GeoAdapter;
use crate::hadith::HadithAdapter;
use crate::prayer::PrayerAdapter;
use crate::quran::QuranAdapter;

/// Shape a provider document must have before it is cached.
///
/// A document that fails its check is a `MalformedResponse`, so it never
/// overwrites a good cached copy and takes the stale-fallback path instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Envelope {
    /// `{"code": 200, "data": ...}` (alquran.cloud, aladhan.com).
    Status,
    /// Like `Status`, but "nothing found" (HTTP or body code 404) is an empty match list.
    Search,
    /// `{"success": true, ...}` (ipwho.is).
    SuccessFlag,
    /// Any JSON object (hadith-api).
    Document,
}

impl Envelope {
    fn accept(self, value: Value) -> Result<Value, Error> {
        match self {
            Envelope::Status => {
                check_status(&value)?;
                Ok(value)
            }
            Envelope::Search => {
                if value.get("code").and_then(Value::as_u64) == Some(404) {
                    return Ok(empty_search());
                }
                check_status(&value)?;
                Ok(value)
            }
            Envelope::SuccessFlag => {
                if value.get("success").and_then(Value::as_bool) == Some(true) {
                    Ok(value)
                } else {
                    let message = value.get("message").and_then(Value::as_str).unwrap_or("success flag not set");
                    Err(Error::MalformedResponse(format!("provider rejected request: {message}")))
                }
            }
            Envelope::Document => {
                if value.is_object() {
                    Ok(value)
                } else {
                    Err(Error::MalformedResponse("expected a JSON object".into()))
                }
            }
        }
    }
}

fn check_status(value: &Value) -> Result<(), Error> {
    match value.get("code").and_then(Value::as_u64) {
        Some(200) if value.get("data").is_some_and(|d| !d.is_null()) => Ok(()),
        Some(200) => Err(Error::MalformedResponse("envelope has no data".into())),
        Some(code) => Err(Error::MalformedResponse(format!("envelope status {code}"))),
        None => Err(Error::MalformedResponse("envelope has no status code".into())),
    }
}

fn empty_search() -> Value {
    json!({"code": 200, "data": {"count": 0, "matches": []}})
}

/// Decode a provider document into a response shape.
pub(crate) fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, Error> {
    Ok(T::deserialize(value)?)
}

/// `deserialize_with` for optional provider fields: a value of the wrong type
/// reads as `None` instead of failing the whole document.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Caching gateway over every content provider.
///
/// Cloning is cheap; clones share the fetcher and the cache.
#[derive(Clone)]
pub struct Gateway {
    fetcher: Arc<dyn JsonFetcher>,
    cache: Arc<TtlCache<Value>>,
    config: Arc<AppConfig>,
    hijri: Option<Arc<dyn HijriConverter>>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("cache", &self.cache)
            .field("hijri", &self.hijri.is_some())
            .finish_non_exhaustive()
    }
}

impl Gateway {
    /// Build a gateway that talks HTTP through a [`FetchClient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let client = FetchClient::new(FetchConfig::from(&config))?;
        Ok(Self::with_fetcher(config, Arc::new(client)))
    }

    /// Build a gateway over any [`JsonFetcher`].
    pub fn with_fetcher(config: AppConfig, fetcher: Arc<dyn JsonFetcher>) -> Self {
        let cache = Arc::new(TtlCache::new(config.cache_capacity));
        Self { fetcher, cache, config: Arc::new(config), hijri: None }
    }

    /// Install a Gregorian→Hijri converter for the calendar adapter.
    pub fn with_hijri(mut self, converter: Arc<dyn HijriConverter>) -> Self {
        self.hijri = Some(converter);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The shared response cache.
    pub fn cache(&self) -> &TtlCache<Value> {
        &self.cache
    }

    pub fn quran(&self) -> QuranAdapter<'_> {
        QuranAdapter::new(self)
    }

    pub fn hadith(&self) -> HadithAdapter<'_> {
        HadithAdapter::new(self)
    }

    pub fn prayer(&self) -> PrayerAdapter<'_> {
        PrayerAdapter::new(self)
    }

    pub fn geo(&self) -> GeoAdapter<'_> {
        GeoAdapter::new(self)
    }

    pub fn calendar(&self) -> CalendarAdapter<'_> {
        CalendarAdapter::new(self.hijri.as_deref())
    }

    /// Fetch `endpoint` through the cache and normalize it.
    ///
    /// A fetched document is stored only once it has passed `envelope` and
    /// `normalize`, so a document that cannot be normalized never replaces a
    /// good entry; it takes the stale-fallback path like any failed fetch.
    pub(crate) async fn load<T>(
        &self, endpoint: &Endpoint, envelope: Envelope, normalize: impl Fn(&Value) -> Result<T, Error>,
    ) -> Result<Cached<T>, Error> {
        let request = endpoint.request(&self.config)?;
        let key = request.cache_key();
        let fetcher = Arc::clone(&self.fetcher);
        let normalize = &normalize;

        let mut fetched = None;
        let slot = &mut fetched;
        let cached = self
            .cache
            .get_or_fetch(&key, request.ttl, || async move {
                let value = match fetcher.fetch_json(&request.url, &request.params, None).await {
                    Err(Error::ProviderError { status: 404 }) if envelope == Envelope::Search => empty_search(),
                    other => other?,
                };
                let value = envelope.accept(value)?;
                *slot = Some(normalize(&value)?);
                Ok(value)
            })
            .await?;

        match fetched {
            Some(value) if !cached.is_stale() => Ok(Cached::fresh(value)),
            _ => cached.try_map(|value| normalize(value.as_ref())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_envelope() {
        assert!(Envelope::Status.accept(json!({"code": 200, "data": {"a": 1}})).is_ok());
        assert!(matches!(
            Envelope::Status.accept(json!({"code": 400, "data": "bad"})),
            Err(Error::MalformedResponse(msg)) if msg.contains("400")
        ));
        assert!(matches!(Envelope::Status.accept(json!({"code": 200})), Err(Error::MalformedResponse(_))));
        assert!(matches!(Envelope::Status.accept(json!([1, 2])), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_search_envelope_not_found_is_empty() {
        let value = Envelope::Search
            .accept(json!({"code": 404, "status": "NOT FOUND", "data": "Nothing found"}))
            .unwrap();
        assert_eq!(value["data"]["matches"], json!([]));
    }

    #[test]
    fn test_success_flag_envelope() {
        assert!(Envelope::SuccessFlag.accept(json!({"success": true, "latitude": 1.0})).is_ok());
        assert!(matches!(
            Envelope::SuccessFlag.accept(json!({"success": false, "message": "Reserved range"})),
            Err(Error::MalformedResponse(msg)) if msg.contains("Reserved range")
        ));
        assert!(Envelope::SuccessFlag.accept(json!({})).is_err());
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "lenient")]
        count: Option<u32>,
        #[serde(deserialize_with = "lenient")]
        label: Option<String>,
    }

    #[test]
    fn test_lenient_fields() {
        let sample: Sample = decode(&json!({"count": "three", "label": "ok"})).unwrap();
        assert_eq!(sample.count, None);
        assert_eq!(sample.label.as_deref(), Some("ok"));

        let sample: Sample = decode(&json!({"count": 3, "label": null})).unwrap();
        assert_eq!(sample.count, Some(3));
        assert_eq!(sample.label, None);
    }

    #[test]
    fn test_document_envelope() {
        assert!(Envelope::Document.accept(json!({"metadata": {}})).is_ok());
        assert!(Envelope::Document.accept(json!("text")).is_err());
    }

    #[test]
    fn test_gateway_uses_configured_capacity() {
        let config = AppConfig { cache_capacity: 7, ..Default::default() };
        let gateway = Gateway::new(config).unwrap();
        assert_eq!(gateway.cache().capacity(), 7);
        assert!(gateway.cache().is_empty());
    }
}

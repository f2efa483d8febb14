//! Prayer-times adapter over aladhan.com.
//!
//! `{prayer}/timings?latitude=..&longitude=..&method=..`, cached for 30 minutes.
//! The default method is 4 (Umm al-Qura).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use minbar_core::{Cached, Error};

use crate::endpoint::Endpoint;
use crate::gateway::{Envelope, Gateway, decode, lenient};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTimingsEnvelope {
    data: RawTimingsData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTimingsData {
    #[serde(deserialize_with = "lenient")]
    timings: Option<Map<String, Value>>,
    #[serde(deserialize_with = "lenient")]
    date: Option<RawDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDate {
    #[serde(deserialize_with = "lenient")]
    readable: Option<String>,
    #[serde(deserialize_with = "lenient")]
    hijri: Option<RawHijri>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHijri {
    day: Option<Value>,
    #[serde(deserialize_with = "lenient")]
    month: Option<RawHijriMonth>,
    year: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHijriMonth {
    #[serde(deserialize_with = "lenient")]
    ar: Option<String>,
}

/// One named prayer time, as `HH:MM` local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrayerTime {
    pub name: String,
    pub time: String,
}

/// Prayer timings for a position on the provider's current date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerTimes {
    pub latitude: f64,
    pub longitude: f64,
    pub method: u8,
    /// Timings in provider order.
    pub timings: Vec<PrayerTime>,
    /// Hijri date as `day month year`, with the Arabic month name.
    pub hijri: Option<String>,
    pub gregorian: Option<String>,
}

impl RawTimingsData {
    fn into_times(self, latitude: f64, longitude: f64, method: u8) -> PrayerTimes {
        let timings = self
            .timings
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, time)| Some(PrayerTime { name, time: time.as_str()?.to_string() }))
            .collect();

        let (gregorian, hijri) = match self.date {
            Some(date) => (date.readable, date.hijri.and_then(RawHijri::formatted)),
            None => (None, None),
        };

        PrayerTimes { latitude, longitude, method, timings, hijri, gregorian }
    }
}

impl RawHijri {
    fn formatted(self) -> Option<String> {
        let month = self.month.and_then(|m| m.ar)?;
        Some(format!("{} {month} {}", scalar(self.day?)?, scalar(self.year?)?))
    }
}

/// aladhan sends day and year as strings; accept bare numbers too.
fn scalar(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Prayer timings through the gateway cache.
#[derive(Debug, Clone, Copy)]
pub struct PrayerAdapter<'a> {
    gateway: &'a Gateway,
}

impl<'a> PrayerAdapter<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Timings for `(lat, lng)`; `None` method uses the configured default.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCoordinates` before any network call when the
    /// position is invalid.
    pub async fn times(&self, lat: f64, lng: f64, method: Option<u8>) -> Result<Cached<PrayerTimes>, Error> {
        let method = method.unwrap_or(self.gateway.config().prayer_method);
        let endpoint = Endpoint::PrayerTimes { lat, lng, method };
        self.gateway
            .load(&endpoint, Envelope::Status, |value| {
                Ok(decode::<RawTimingsEnvelope>(value)?.data.into_times(lat, lng, method))
            })
            .await
    }
}

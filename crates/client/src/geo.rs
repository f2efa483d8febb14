//! IP geolocation adapter over ipwho.is.
//!
//! The client address is taken from the first forwarded-for entry, else the
//! direct connection. Private, loopback and unparseable addresses are not
//! forwarded; the provider then locates the gateway's own egress address.

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use minbar_core::{Cached, Error};

use crate::endpoint::Endpoint;
use crate::fetch::resolve_client_ip;
use crate::gateway::{Envelope, Gateway, decode, lenient};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLocation {
    #[serde(deserialize_with = "lenient")]
    ip: Option<String>,
    #[serde(deserialize_with = "lenient")]
    latitude: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    longitude: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    city: Option<String>,
    #[serde(deserialize_with = "lenient")]
    country: Option<String>,
    #[serde(deserialize_with = "lenient")]
    country_code: Option<String>,
    #[serde(deserialize_with = "lenient")]
    timezone: Option<RawTimezone>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTimezone {
    #[serde(deserialize_with = "lenient")]
    id: Option<String>,
}

/// Approximate position of a client address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub ip: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub timezone: Option<String>,
}

impl TryFrom<RawLocation> for GeoLocation {
    type Error = Error;

    fn try_from(raw: RawLocation) -> Result<Self, Error> {
        let (Some(latitude), Some(longitude)) = (raw.latitude, raw.longitude) else {
            return Err(Error::MalformedResponse("geolocation without coordinates".into()));
        };
        Ok(Self {
            latitude,
            longitude,
            ip: raw.ip,
            city: raw.city,
            country: raw.country,
            country_code: raw.country_code,
            timezone: raw.timezone.and_then(|tz| tz.id),
        })
    }
}

/// IP geolocation through the gateway cache.
#[derive(Debug, Clone, Copy)]
pub struct GeoAdapter<'a> {
    gateway: &'a Gateway,
}

impl<'a> GeoAdapter<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Locate a client from its `X-Forwarded-For` value and connection address.
    pub async fn locate(
        &self, forwarded_for: Option<&str>, remote_addr: Option<IpAddr>,
    ) -> Result<Cached<GeoLocation>, Error> {
        let ip = resolve_client_ip(forwarded_for, remote_addr);
        if ip.is_none() {
            tracing::debug!(?forwarded_for, ?remote_addr, "no public client address, locating without hint");
        }
        self.locate_ip(ip).await
    }

    /// Locate a public address, or the caller's own egress address for `None`.
    pub async fn locate_ip(&self, ip: Option<IpAddr>) -> Result<Cached<GeoLocation>, Error> {
        self.gateway
            .load(&Endpoint::IpGeo { ip }, Envelope::SuccessFlag, |value| {
                GeoLocation::try_from(decode::<RawLocation>(value)?)
            })
            .await
    }
}

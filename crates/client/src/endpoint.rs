//! Provider endpoints and the requests built from them.
//!
//! Every upstream call starts as an [`Endpoint`] variant. Turning it into a
//! [`ProviderRequest`] validates the inputs, fills in the configured base URL
//! and picks the TTL for that class of content.

use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use url::Url;

use minbar_core::config::TtlConfig;
use minbar_core::geodesy::Coordinates;
use minbar_core::{AppConfig, CacheKey, Error};

use crate::catalog;
use crate::fetch::{canonicalize, split_query};

/// Shortest accepted search query, in characters.
pub const MIN_QUERY_CHARS: usize = 2;

/// Longest accepted search query, in characters.
pub const MAX_QUERY_CHARS: usize = 200;

/// Fixed-width script edition used for juz listings.
pub const JUZ_EDITION: &str = "quran-uthmani";

/// Simplified tafsir edition.
pub const TAFSIR_EDITION: &str = "ar.muyassar";

const JUZ_COUNT: u8 = 30;

static EDITION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{2,3}\.[a-z0-9-]+$").expect("edition pattern is a valid regex"));

static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,32}$").expect("section pattern is a valid regex"));

/// One upstream call, by meaning rather than by URL.
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// Whole surah; Arabic text when `edition` is `None`, else that edition.
    Surah { surah: u16, edition: Option<String> },
    /// One juz in the Uthmani script.
    Juz { juz: u8 },
    /// One ayah; text when `edition` is `None`, else that edition (e.g. a reciter).
    Ayah { surah: u16, ayah: u16, edition: Option<String> },
    /// Simplified tafsir for one ayah.
    Tafsir { surah: u16, ayah: u16 },
    /// Full-text search over the Arabic text.
    QuranSearch { query: String },
    /// Section index of a hadith collection.
    HadithCollection { collection: String },
    /// Hadiths of one section of a collection.
    HadithSection { collection: String, section: String },
    /// The whole collection scanned by hadith search.
    HadithSearchCorpus,
    /// Daily prayer timings for a position.
    PrayerTimes { lat: f64, lng: f64, method: u8 },
    /// Geolocation of `ip`, or of the caller's egress address when `None`.
    IpGeo { ip: Option<IpAddr> },
}

/// A validated upstream request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Canonical URL without query string.
    pub url: Url,
    /// Query parameters, sorted.
    pub params: BTreeMap<String, String>,
    /// How long a successful response stays fresh.
    pub ttl: Duration,
}

impl ProviderRequest {
    /// Canonicalize `url` and fold its query string into `params`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the URL is empty, unparseable or not http(s),
    /// and `Error::InvalidInput` for a zero TTL.
    pub fn new(url: &str, params: BTreeMap<String, String>, ttl: Duration) -> Result<Self, Error> {
        if ttl.is_zero() {
            return Err(Error::InvalidInput("request ttl must be greater than zero".into()));
        }
        let (url, params) = split_query(canonicalize(url)?, params);
        Ok(Self { url, params, ttl })
    }

    /// Cache key for this request.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::new(self.url.as_str(), &self.params)
    }
}

impl Endpoint {
    /// Check the endpoint's inputs without building a URL.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidInput` for out-of-range surah/ayah/juz numbers,
    ///   unknown collections, or malformed edition and section identifiers
    /// - `Error::InvalidCoordinates` for an invalid prayer-times position
    /// - `Error::QueryTooShort` / `Error::QueryTooLong` for search queries
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Endpoint::Surah { surah, edition } => {
                check_surah(*surah)?;
                edition.as_deref().map_or(Ok(()), check_edition)
            }
            Endpoint::Juz { juz } => {
                if (1..=JUZ_COUNT).contains(juz) {
                    Ok(())
                } else {
                    Err(Error::InvalidInput(format!("juz {juz} outside 1..={JUZ_COUNT}")))
                }
            }
            Endpoint::Ayah { surah, ayah, edition } => {
                check_ayah(*surah, *ayah)?;
                edition.as_deref().map_or(Ok(()), check_edition)
            }
            Endpoint::Tafsir { surah, ayah } => check_ayah(*surah, *ayah),
            Endpoint::QuranSearch { query } => check_query(query),
            Endpoint::HadithCollection { collection } => check_collection(collection),
            Endpoint::HadithSection { collection, section } => {
                check_collection(collection)?;
                if SECTION_PATTERN.is_match(section) {
                    Ok(())
                } else {
                    Err(Error::InvalidInput(format!("invalid section id {section:?}")))
                }
            }
            Endpoint::HadithSearchCorpus => Ok(()),
            Endpoint::PrayerTimes { lat, lng, .. } => Coordinates::new(*lat, *lng).map(|_| ()),
            Endpoint::IpGeo { .. } => Ok(()),
        }
    }

    /// Freshness window for this class of content.
    pub fn ttl(&self, ttl: &TtlConfig) -> Duration {
        match self {
            Endpoint::Surah { .. }
            | Endpoint::Juz { .. }
            | Endpoint::Ayah { .. }
            | Endpoint::HadithCollection { .. }
            | Endpoint::HadithSection { .. } => ttl.text(),
            Endpoint::Tafsir { .. } | Endpoint::HadithSearchCorpus => ttl.reference(),
            Endpoint::QuranSearch { .. } => ttl.search(),
            Endpoint::PrayerTimes { .. } => ttl.prayer(),
            Endpoint::IpGeo { .. } => ttl.geo(),
        }
    }

    /// Validate and build the upstream request.
    ///
    /// # Errors
    ///
    /// Everything [`Endpoint::validate`] reports, plus `Error::InvalidUrl`
    /// when a configured base URL cannot be extended.
    pub fn request(&self, config: &AppConfig) -> Result<ProviderRequest, Error> {
        self.validate()?;

        let providers = &config.providers;
        let mut params = BTreeMap::new();

        let url = match self {
            Endpoint::Surah { surah, edition } => {
                let surah = surah.to_string();
                match edition {
                    Some(edition) => join(&providers.quran, &["surah", &surah, edition])?,
                    None => join(&providers.quran, &["surah", &surah])?,
                }
            }
            Endpoint::Juz { juz } => join(&providers.quran, &["juz", &juz.to_string(), JUZ_EDITION])?,
            Endpoint::Ayah { surah, ayah, edition } => {
                let reference = format!("{surah}:{ayah}");
                match edition {
                    Some(edition) => join(&providers.quran, &["ayah", &reference, edition])?,
                    None => join(&providers.quran, &["ayah", &reference])?,
                }
            }
            Endpoint::Tafsir { surah, ayah } => {
                join(&providers.quran, &["ayah", &format!("{surah}:{ayah}"), TAFSIR_EDITION])?
            }
            Endpoint::QuranSearch { query } => join(&providers.quran, &["search", query, "all", "ar"])?,
            Endpoint::HadithCollection { collection } => {
                join(&providers.hadith, &["editions", &format!("{collection}.json")])?
            }
            Endpoint::HadithSection { collection, section } => {
                join(&providers.hadith, &["editions", collection, &format!("{section}.json")])?
            }
            Endpoint::HadithSearchCorpus => {
                join(&providers.hadith, &["editions", &format!("{}.json", catalog::SEARCH_COLLECTION)])?
            }
            Endpoint::PrayerTimes { lat, lng, method } => {
                params.insert("latitude".to_string(), lat.to_string());
                params.insert("longitude".to_string(), lng.to_string());
                params.insert("method".to_string(), method.to_string());
                join(&providers.prayer, &["timings"])?
            }
            Endpoint::IpGeo { ip: Some(ip) } => join(&providers.geo, &[&ip.to_string()])?,
            Endpoint::IpGeo { ip: None } => join(&providers.geo, &[])?,
        };

        ProviderRequest::new(url.as_str(), params, self.ttl(&config.ttl))
    }
}

/// Append path segments to a base URL, percent-encoding each one.
fn join(base: &str, segments: &[&str]) -> Result<Url, Error> {
    let mut url = Url::parse(base).map_err(|e| Error::InvalidUrl(format!("{base}: {e}")))?;
    if !segments.is_empty() {
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(format!("{base} cannot be a base URL")))?
            .pop_if_empty()
            .extend(segments);
    }
    Ok(url)
}

fn check_surah(surah: u16) -> Result<&'static catalog::SurahMeta, Error> {
    catalog::surah(surah).ok_or_else(|| Error::InvalidInput(format!("surah {surah} outside 1..=114")))
}

fn check_ayah(surah: u16, ayah: u16) -> Result<(), Error> {
    let meta = check_surah(surah)?;
    if (1..=meta.verses).contains(&ayah) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "ayah {ayah} outside 1..={} for surah {surah}",
            meta.verses
        )))
    }
}

fn check_edition(edition: &str) -> Result<(), Error> {
    if EDITION_PATTERN.is_match(edition) {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("invalid edition identifier {edition:?}")))
    }
}

fn check_collection(collection: &str) -> Result<(), Error> {
    match catalog::hadith_collection(collection) {
        Some(_) => Ok(()),
        None => Err(Error::InvalidInput(format!("unknown hadith collection {collection:?}"))),
    }
}

fn check_query(query: &str) -> Result<(), Error> {
    let len = query.chars().count();
    if len < MIN_QUERY_CHARS {
        return Err(Error::QueryTooShort { len, min: MIN_QUERY_CHARS });
    }
    if len > MAX_QUERY_CHARS {
        return Err(Error::QueryTooLong { len, max: MAX_QUERY_CHARS });
    }
    Ok(())
}

//! Provider adapters for the minbar content gateway.
//!
//! A [`Gateway`] owns one [`JsonFetcher`] and one response cache; the
//! adapters it hands out (Quran, hadith, prayer times, geolocation,
//! calendar) turn provider documents into the types re-exported here.

pub mod calendar;
pub mod catalog;
pub mod endpoint;
pub mod fetch;
pub mod gateway;
pub mod geo;
pub mod hadith;
pub mod prayer;
pub mod quran;

pub use calendar::{CalendarAdapter, HijriConverter, HijriDate, HijriDay, TabularHijri};
pub use endpoint::{Endpoint, ProviderRequest};
pub use fetch::{FetchClient, FetchConfig, JsonFetcher};
pub use gateway::Gateway;
pub use geo::{GeoAdapter, GeoLocation};
pub use hadith::{Hadith, HadithAdapter, HadithSearchHit, HadithSection, SectionContent};
pub use prayer::{PrayerAdapter, PrayerTime, PrayerTimes};
pub use quran::{JuzSurah, JuzVerse, QuranAdapter, SearchMatch, Tafsir, Verse, VerseOfTheDay};

pub use minbar_core::{AppConfig, Cached, Error, Freshness};

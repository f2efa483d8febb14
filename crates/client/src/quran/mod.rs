//! Quran adapter: text, translations, juz listings, audio, search, tafsir and
//! the verse of the day.
//!
//! ### Upstream
//!
//! - **Text**: `{quran}/surah/{n}` and `{quran}/ayah/{s}:{a}` (24h)
//! - **Translation**: `{quran}/surah/{n}/{edition}` (24h)
//! - **Audio**: `{quran}/ayah/{s}:{a}/{reciter}` (24h)
//! - **Juz**: `{quran}/juz/{n}/quran-uthmani` (24h)
//! - **Search**: `{quran}/search/{q}/all/ar` (1h), at most 50 matches
//! - **Tafsir**: `{quran}/ayah/{s}:{a}/ar.muyassar` (7d)

pub mod response;

pub use response::{JuzSurah, JuzVerse, SearchMatch, Tafsir, Verse, VerseOfTheDay};

use chrono::NaiveDate;

use minbar_core::{Cached, Error, daily};

use crate::catalog;
use crate::endpoint::{Endpoint, MAX_QUERY_CHARS, MIN_QUERY_CHARS};
use crate::gateway::{Envelope, Gateway, decode};
use response::{ApiEnvelope, AyahList, MatchList, RawAyah};

/// Most matches returned by [`QuranAdapter::search`].
pub const MAX_SEARCH_RESULTS: usize = 50;

/// Display name of the tafsir edition.
pub const TAFSIR_SOURCE: &str = "تفسير الميسر";

/// Quran content through the gateway cache.
#[derive(Debug, Clone, Copy)]
pub struct QuranAdapter<'a> {
    gateway: &'a Gateway,
}

impl<'a> QuranAdapter<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Arabic text of a whole surah.
    pub async fn surah_text(&self, surah: u16) -> Result<Cached<Vec<Verse>>, Error> {
        self.surah_edition(surah, None).await
    }

    /// A translation of a whole surah; `None` uses the configured default edition.
    pub async fn translation(&self, surah: u16, edition: Option<&str>) -> Result<Cached<Vec<Verse>>, Error> {
        let edition = edition.unwrap_or(&self.gateway.config().default_translation);
        self.surah_edition(surah, Some(edition.to_string())).await
    }

    async fn surah_edition(&self, surah: u16, edition: Option<String>) -> Result<Cached<Vec<Verse>>, Error> {
        let endpoint = Endpoint::Surah { surah, edition };
        self.gateway
            .load(&endpoint, Envelope::Status, |value| {
                Ok(decode::<ApiEnvelope<AyahList>>(value)?.data.into_verses())
            })
            .await
    }

    /// The verses of a juz grouped by surah, each with a CDN audio URL.
    pub async fn juz(&self, juz: u8) -> Result<Cached<Vec<JuzSurah>>, Error> {
        let config = self.gateway.config();
        self.gateway
            .load(&Endpoint::Juz { juz }, Envelope::Status, |value| {
                let list = decode::<ApiEnvelope<AyahList>>(value)?.data;
                Ok(list.into_juz(&config.providers.audio_cdn, &config.default_reciter))
            })
            .await
    }

    /// Arabic text of one ayah.
    pub async fn ayah(&self, surah: u16, ayah: u16) -> Result<Cached<Verse>, Error> {
        let endpoint = Endpoint::Ayah { surah, ayah, edition: None };
        self.gateway
            .load(&endpoint, Envelope::Status, |value| {
                let raw = decode::<ApiEnvelope<RawAyah>>(value)?.data;
                Ok(Verse { number: raw.number_in_surah.unwrap_or(ayah), text: raw.text.unwrap_or_default() })
            })
            .await
    }

    /// Recitation URL for one ayah; `None` reciter uses the configured default.
    ///
    /// Prefers `audio`, then the first `audioSecondary` entry. `None` when the
    /// provider lists neither.
    pub async fn audio_url(
        &self, surah: u16, ayah: u16, reciter: Option<&str>,
    ) -> Result<Cached<Option<String>>, Error> {
        let reciter = reciter.unwrap_or(&self.gateway.config().default_reciter);
        let endpoint = Endpoint::Ayah { surah, ayah, edition: Some(reciter.to_string()) };
        self.gateway
            .load(&endpoint, Envelope::Status, |value| Ok(decode::<ApiEnvelope<RawAyah>>(value)?.data.audio_url()))
            .await
    }

    /// Search the Arabic text.
    ///
    /// The query is trimmed and cut to 200 characters. Anything shorter than
    /// two characters returns no matches without calling the provider.
    pub async fn search(&self, query: &str) -> Result<Cached<Vec<SearchMatch>>, Error> {
        let query: String = query.trim().chars().take(MAX_QUERY_CHARS).collect();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Cached::fresh(Vec::new()));
        }

        self.gateway
            .load(&Endpoint::QuranSearch { query }, Envelope::Search, |value| {
                let matches = decode::<ApiEnvelope<MatchList>>(value)?.data.matches;
                Ok(matches.into_iter().take(MAX_SEARCH_RESULTS).map(SearchMatch::from).collect())
            })
            .await
    }

    /// Simplified tafsir for one ayah.
    pub async fn tafsir(&self, surah: u16, ayah: u16) -> Result<Cached<Tafsir>, Error> {
        self.gateway
            .load(&Endpoint::Tafsir { surah, ayah }, Envelope::Status, |value| {
                let raw = decode::<ApiEnvelope<RawAyah>>(value)?.data;
                Ok(Tafsir { surah, ayah, text: raw.text.filter(|t| !t.is_empty()), source: TAFSIR_SOURCE })
            })
            .await
    }

    /// The verse selected for `date`, with its Arabic text.
    ///
    /// The surah comes from the daily selector over all 114 surahs, the ayah
    /// from the selector over that surah's verse count.
    pub async fn verse_of_the_day(&self, date: NaiveDate) -> Result<Cached<VerseOfTheDay>, Error> {
        let (meta, ayah) = daily_pick(date)?;
        let verse = self.ayah(meta.id, ayah).await?;
        Ok(verse.map(|verse| VerseOfTheDay {
            date,
            surah: meta.id,
            surah_name: meta.name,
            surah_name_en: meta.name_en,
            ayah,
            text: verse.text,
        }))
    }
}

/// Surah and 1-based ayah selected for `date`.
pub fn daily_pick(date: NaiveDate) -> Result<(&'static catalog::SurahMeta, u16), Error> {
    let surah_index = daily::select_index(date, catalog::SURAH_COUNT)?;
    let meta = &catalog::SURAHS[surah_index];
    let ayah_index = daily::select_index(date, usize::from(meta.verses))?;
    // ayah_index < verses, which is a u16
    Ok((meta, ayah_index as u16 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_pick_known_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let (meta, ayah) = daily_pick(date).unwrap();
        // selector gives 103 for 114 surahs: surah 104 (Al-Humazah, 9 verses)
        assert_eq!(meta.id, 104);
        assert!((1..=meta.verses).contains(&ayah));
        assert_eq!(daily_pick(date).unwrap(), (meta, ayah));
    }

    #[test]
    fn test_daily_pick_always_valid() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for offset in 0..366 {
            let (meta, ayah) = daily_pick(start + chrono::Days::new(offset)).unwrap();
            assert!(ayah >= 1 && ayah <= meta.verses, "{} {ayah}", meta.id);
        }
    }
}

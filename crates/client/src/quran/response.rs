//! alquran.cloud response types and normalization.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::gateway::lenient;

/// `{"code": 200, "data": ...}` wrapper.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub data: T,
}

/// Surah or juz payload: both carry an `ayahs` list.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct AyahList {
    pub ayahs: Vec<RawAyah>,
}

/// Search payload.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct MatchList {
    pub matches: Vec<RawAyah>,
}

/// One ayah as alquran.cloud returns it. Every field is optional, and a
/// field of the wrong type reads as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawAyah {
    #[serde(deserialize_with = "lenient")]
    pub number: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(rename = "numberInSurah", deserialize_with = "lenient")]
    pub number_in_surah: Option<u16>,
    #[serde(deserialize_with = "lenient")]
    pub surah: Option<RawSurahRef>,
    #[serde(deserialize_with = "lenient")]
    pub audio: Option<String>,
    #[serde(rename = "audioSecondary", deserialize_with = "lenient")]
    pub audio_secondary: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawSurahRef {
    #[serde(deserialize_with = "lenient")]
    pub number: Option<u16>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(rename = "englishName", deserialize_with = "lenient")]
    pub english_name: Option<String>,
}

/// A verse within its surah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    pub number: u16,
    pub text: String,
}

/// A verse inside a juz listing, with its recitation URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JuzVerse {
    pub number: u16,
    pub text: String,
    pub global_number: Option<u32>,
    pub audio: Option<String>,
}

/// The verses of one surah that fall inside a juz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JuzSurah {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    pub verses: Vec<JuzVerse>,
}

/// One Quran search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchMatch {
    pub number: Option<u32>,
    pub text: String,
    pub surah: Option<u16>,
    pub surah_name: Option<String>,
    pub surah_english_name: Option<String>,
    pub number_in_surah: Option<u16>,
}

/// Commentary for one ayah.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tafsir {
    pub surah: u16,
    pub ayah: u16,
    pub text: Option<String>,
    pub source: &'static str,
}

/// The verse picked for a calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseOfTheDay {
    pub date: chrono::NaiveDate,
    pub surah: u16,
    pub surah_name: &'static str,
    pub surah_name_en: &'static str,
    pub ayah: u16,
    pub text: String,
}

impl AyahList {
    /// Verses in provider order; a missing in-surah number falls back to position.
    pub(crate) fn into_verses(self) -> Vec<Verse> {
        self.ayahs
            .into_iter()
            .enumerate()
            .map(|(index, ayah)| Verse {
                number: ayah
                    .number_in_surah
                    .unwrap_or_else(|| u16::try_from(index + 1).unwrap_or(u16::MAX)),
                text: ayah.text.unwrap_or_default(),
            })
            .collect()
    }

    /// Group a juz's verses by surah in order of first appearance.
    ///
    /// Verses without a surah number cannot be placed and are skipped.
    pub(crate) fn into_juz(self, audio_base: &str, reciter: &str) -> Vec<JuzSurah> {
        let mut groups: Vec<JuzSurah> = Vec::new();

        for ayah in self.ayahs {
            let Some(surah_ref) = ayah.surah else {
                tracing::debug!(number = ?ayah.number, "juz verse without surah reference skipped");
                continue;
            };
            let Some(surah_number) = surah_ref.number else {
                continue;
            };

            let position = match groups.iter().position(|g| g.number == surah_number) {
                Some(position) => position,
                None => {
                    groups.push(JuzSurah {
                        number: surah_number,
                        name: surah_ref.name.unwrap_or_default(),
                        english_name: surah_ref.english_name.unwrap_or_default(),
                        verses: Vec::new(),
                    });
                    groups.len() - 1
                }
            };

            let audio = ayah
                .number
                .map(|global| format!("{}/{reciter}/{global}.mp3", audio_base.trim_end_matches('/')));
            groups[position].verses.push(JuzVerse {
                number: ayah.number_in_surah.unwrap_or_default(),
                text: ayah.text.unwrap_or_default(),
                global_number: ayah.number,
                audio,
            });
        }

        groups
    }
}

impl RawAyah {
    /// Primary audio URL, else the first secondary one.
    pub(crate) fn audio_url(self) -> Option<String> {
        self.audio
            .filter(|url| !url.is_empty())
            .or_else(|| {
                self.audio_secondary?
                    .into_iter()
                    .find_map(|url| url.as_str().filter(|url| !url.is_empty()).map(str::to_string))
            })
    }
}

impl From<RawAyah> for SearchMatch {
    fn from(ayah: RawAyah) -> Self {
        let (surah, surah_name, surah_english_name) = match ayah.surah {
            Some(s) => (s.number, s.name, s.english_name),
            None => (None, None, None),
        };
        Self {
            number: ayah.number,
            text: ayah.text.unwrap_or_default(),
            surah,
            surah_name,
            surah_english_name,
            number_in_surah: ayah.number_in_surah,
        }
    }
}

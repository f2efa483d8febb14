//! Static reference data: surahs, hadith collections, translations and reciters.

pub mod sections;
pub mod surahs;

use serde::Serialize;

pub use sections::{arabic_section_name, translate_section_name};
pub use surahs::{Revelation, SURAH_COUNT, SURAHS, SurahMeta, surah};

/// A hadith collection available from the hadith API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HadithCollection {
    pub id: &'static str,
    pub name: &'static str,
    pub name_en: &'static str,
    pub author: &'static str,
    pub count: u32,
}

/// A translation edition served by the Quran API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Translation {
    pub id: &'static str,
    pub label: &'static str,
}

/// A reciter edition with per-ayah audio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reciter {
    pub id: &'static str,
    pub name: &'static str,
    pub name_en: &'static str,
}

/// Collection searched by hadith search; small enough to scan in memory.
pub const SEARCH_COLLECTION: &str = "ara-nawawi";

/// Display name of [`SEARCH_COLLECTION`].
pub const SEARCH_COLLECTION_NAME: &str = "الأربعين النووية";

pub static HADITH_COLLECTIONS: &[HadithCollection] = &[
    HadithCollection {
        id: "ara-bukhari",
        name: "صحيح البخاري",
        name_en: "Sahih al-Bukhari",
        author: "الإمام البخاري",
        count: 7563,
    },
    HadithCollection {
        id: "ara-muslim",
        name: "صحيح مسلم",
        name_en: "Sahih Muslim",
        author: "الإمام مسلم",
        count: 5362,
    },
    HadithCollection {
        id: "ara-abudawud",
        name: "سنن أبي داود",
        name_en: "Sunan Abu Dawud",
        author: "أبو داود",
        count: 4590,
    },
    HadithCollection {
        id: "ara-tirmidhi",
        name: "جامع الترمذي",
        name_en: "Jami at-Tirmidhi",
        author: "الإمام الترمذي",
        count: 3891,
    },
    HadithCollection {
        id: "ara-nasai",
        name: "سنن النسائي",
        name_en: "Sunan an-Nasa'i",
        author: "الإمام النسائي",
        count: 5662,
    },
    HadithCollection {
        id: "ara-ibnmajah",
        name: "سنن ابن ماجه",
        name_en: "Sunan Ibn Majah",
        author: "ابن ماجه",
        count: 4332,
    },
];

pub static TRANSLATIONS: &[Translation] = &[
    Translation { id: "en.sahih", label: "English — Saheeh International" },
    Translation { id: "en.hilali", label: "English — Hilali & Khan" },
    Translation { id: "fr.hamidullah", label: "Français — Hamidullah" },
    Translation { id: "ur.jalandhry", label: "اردو — Jalandhry" },
    Translation { id: "tr.diyanet", label: "Türkçe — Diyanet" },
    Translation { id: "id.indonesian", label: "Bahasa Indonesia" },
    Translation { id: "de.bubenheim", label: "Deutsch — Bubenheim" },
    Translation { id: "es.cortes", label: "Español — Cortes" },
    Translation { id: "ru.kuliev", label: "Русский — Kuliev" },
    Translation { id: "bn.bengali", label: "বাংলা — Bengali" },
];

pub static RECITERS: &[Reciter] = &[
    Reciter { id: "ar.alafasy", name: "مشاري العفاسي", name_en: "Mishary Rashid Alafasy" },
    Reciter { id: "ar.abdulbasitmurattal", name: "عبد الباسط عبد الصمد", name_en: "Abdul Basit (Murattal)" },
    Reciter { id: "ar.abdullahbasfar", name: "عبدالله بصفر", name_en: "Abdullah Basfar" },
    Reciter { id: "ar.hudhaify", name: "الحذيفي", name_en: "Ali Al-Hudhaifi" },
    Reciter { id: "ar.husary", name: "محمود خليل الحصري", name_en: "Mahmoud Khalil Al-Husary" },
    Reciter { id: "ar.mahermuaiqly", name: "ماهر المعيقلي", name_en: "Maher Al Muaiqly" },
    Reciter { id: "ar.abdurrahmaansudais", name: "عبدالرحمن السديس", name_en: "Abdurrahmaan As-Sudais" },
    Reciter { id: "ar.saoodshuraym", name: "سعود الشريم", name_en: "Saood Ash-Shuraym" },
];

/// Look up a hadith collection by id.
pub fn hadith_collection(id: &str) -> Option<&'static HadithCollection> {
    HADITH_COLLECTIONS.iter().find(|c| c.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_lookup() {
        assert_eq!(hadith_collection("ara-bukhari").map(|c| c.count), Some(7563));
        assert!(hadith_collection("ara-unknown").is_none());
    }

    #[test]
    fn test_search_collection_is_not_listed() {
        assert!(hadith_collection(SEARCH_COLLECTION).is_none());
    }

    #[test]
    fn test_catalogue_ids_are_unique() {
        let mut ids: Vec<&str> = TRANSLATIONS.iter().map(|t| t.id).chain(RECITERS.iter().map(|r| r.id)).collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}

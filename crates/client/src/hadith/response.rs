//! hadith-api response types and normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::catalog::translate_section_name;
use crate::gateway::lenient;

/// Collection document, read only for its section index.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawCollectionIndex {
    pub metadata: RawMetadata,
}

/// Section or whole-collection document with its hadiths.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawEdition {
    pub metadata: RawMetadata,
    #[serde(deserialize_with = "lenient")]
    pub hadiths: Option<Vec<RawHadith>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawMetadata {
    /// Section id → English title, for a whole collection.
    #[serde(deserialize_with = "lenient")]
    pub sections: Option<Map<String, Value>>,
    /// Section id → English title, for a single section.
    #[serde(deserialize_with = "lenient")]
    pub section: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawHadith {
    #[serde(deserialize_with = "lenient")]
    pub hadithnumber: Option<Number>,
    #[serde(deserialize_with = "lenient")]
    pub arabicnumber: Option<Number>,
    #[serde(deserialize_with = "lenient")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub grades: Option<Vec<HadithGrade>>,
    #[serde(deserialize_with = "lenient")]
    pub reference: Option<HadithReference>,
}

/// A section (book) of a hadith collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HadithSection {
    pub id: String,
    /// Arabic title when known, otherwise the English title.
    pub name: String,
    pub name_en: String,
}

/// One hadith.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hadith {
    pub number: Option<Number>,
    pub arabic_number: Option<Number>,
    pub text: String,
    pub grades: Vec<HadithGrade>,
    pub reference: Option<HadithReference>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HadithGrade {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub grade: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HadithReference {
    #[serde(deserialize_with = "lenient")]
    pub book: Option<Number>,
    #[serde(deserialize_with = "lenient")]
    pub hadith: Option<Number>,
}

/// The hadiths of one section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionContent {
    pub collection: &'static str,
    pub section_id: String,
    pub section_name: String,
    pub hadiths: Vec<Hadith>,
}

/// A hadith search hit and the collection it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HadithSearchHit {
    pub collection_id: &'static str,
    pub collection_name: &'static str,
    #[serde(flatten)]
    pub hadith: Hadith,
}

impl From<RawHadith> for Hadith {
    fn from(raw: RawHadith) -> Self {
        Self {
            number: raw.hadithnumber,
            arabic_number: raw.arabicnumber,
            text: raw.text.unwrap_or_default(),
            grades: raw.grades.unwrap_or_default(),
            reference: raw.reference,
        }
    }
}

impl RawMetadata {
    /// Section list with translated titles.
    ///
    /// Empty titles are dropped. When every id is numeric the list is sorted
    /// numerically; otherwise provider order is kept.
    pub(crate) fn into_sections(self) -> Vec<HadithSection> {
        let mut sections: Vec<HadithSection> = self
            .sections
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(id, title)| {
                let title = title.as_str()?.trim();
                if title.is_empty() {
                    return None;
                }
                Some(HadithSection { id, name: translate_section_name(title).to_string(), name_en: title.to_string() })
            })
            .collect();

        let numeric: Option<Vec<u64>> = sections.iter().map(|s| s.id.parse().ok()).collect();
        if let Some(ids) = numeric {
            let mut keyed: Vec<(u64, HadithSection)> = ids.into_iter().zip(sections).collect();
            keyed.sort_by_key(|(id, _)| *id);
            sections = keyed.into_iter().map(|(_, section)| section).collect();
        }

        sections
    }

    /// Title of `section_id` from a section document, if present.
    pub(crate) fn section_title(&self, section_id: &str) -> Option<String> {
        self.section
            .as_ref()?
            .get(section_id)?
            .as_str()
            .map(str::trim)
            .filter(|title| !title.is_empty())
            .map(|title| translate_section_name(title).to_string())
    }
}

//! Hadith adapter over the fawazahmed0 hadith-api (served from jsDelivr).
//!
//! ### Upstream
//!
//! - **Sections**: `{hadith}/editions/{collection}.json` (24h)
//! - **Section**: `{hadith}/editions/{collection}/{section}.json` (24h)
//! - **Search**: `{hadith}/editions/ara-nawawi.json` (7d), scanned in memory

pub mod response;

pub use response::{Hadith, HadithGrade, HadithReference, HadithSearchHit, HadithSection, SectionContent};

use minbar_core::{Cached, Error};

use crate::catalog::{self, HadithCollection};
use crate::endpoint::{Endpoint, MAX_QUERY_CHARS, MIN_QUERY_CHARS};
use crate::gateway::{Envelope, Gateway, decode};
use response::{RawCollectionIndex, RawEdition};

/// Most hits returned by [`HadithAdapter::search`].
pub const MAX_SEARCH_RESULTS: usize = 20;

/// Hadith content through the gateway cache.
#[derive(Debug, Clone, Copy)]
pub struct HadithAdapter<'a> {
    gateway: &'a Gateway,
}

impl<'a> HadithAdapter<'a> {
    pub(crate) fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// The collections that can be browsed.
    pub fn collections(&self) -> &'static [HadithCollection] {
        catalog::HADITH_COLLECTIONS
    }

    /// Sections (books) of a collection, titles translated to Arabic where known.
    pub async fn sections(&self, collection: &str) -> Result<Cached<Vec<HadithSection>>, Error> {
        let endpoint = Endpoint::HadithCollection { collection: collection.to_string() };
        self.gateway
            .load(&endpoint, Envelope::Document, |value| {
                Ok(decode::<RawCollectionIndex>(value)?.metadata.into_sections())
            })
            .await
    }

    /// The hadiths of one section.
    pub async fn section(&self, collection: &str, section_id: &str) -> Result<Cached<SectionContent>, Error> {
        let endpoint = Endpoint::HadithSection { collection: collection.to_string(), section: section_id.to_string() };
        // the endpoint validates the collection, so an unknown id never reaches the closure
        let collection_id = catalog::hadith_collection(collection).map_or("", |c| c.id);

        self.gateway
            .load(&endpoint, Envelope::Document, |value| {
                let edition = decode::<RawEdition>(value)?;
                let section_name = edition
                    .metadata
                    .section_title(section_id)
                    .unwrap_or_else(|| format!("القسم {section_id}"));
                Ok(SectionContent {
                    collection: collection_id,
                    section_id: section_id.to_string(),
                    section_name,
                    hadiths: edition.hadiths.unwrap_or_default().into_iter().map(Into::into).collect(),
                })
            })
            .await
    }

    /// Substring search over the Forty Hadith of an-Nawawi.
    ///
    /// The query is trimmed; fewer than two characters returns no hits
    /// without calling the provider.
    ///
    /// # Errors
    ///
    /// Returns `Error::QueryTooLong` for a query over 200 characters.
    pub async fn search(&self, query: &str) -> Result<Cached<Vec<HadithSearchHit>>, Error> {
        let query = query.trim();
        let len = query.chars().count();
        if len < MIN_QUERY_CHARS {
            return Ok(Cached::fresh(Vec::new()));
        }
        if len > MAX_QUERY_CHARS {
            return Err(Error::QueryTooLong { len, max: MAX_QUERY_CHARS });
        }

        self.gateway
            .load(&Endpoint::HadithSearchCorpus, Envelope::Document, |value| {
                let edition = decode::<RawEdition>(value)?;
                Ok(edition
                    .hadiths
                    .unwrap_or_default()
                    .into_iter()
                    .filter(|h| h.text.as_deref().is_some_and(|text| text.contains(query)))
                    .take(MAX_SEARCH_RESULTS)
                    .map(|h| HadithSearchHit {
                        collection_id: catalog::SEARCH_COLLECTION,
                        collection_name: catalog::SEARCH_COLLECTION_NAME,
                        hadith: h.into(),
                    })
                    .collect())
            })
            .await
    }
}

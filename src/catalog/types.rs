//! Records produced by the scrape pipeline
//!
//! A [`Candidate`] comes from the search results page, [`DetailFields`] from
//! a detail page, and [`FullRecord`] is the two merged. A candidate whose
//! detail page failed becomes a `FullRecord` with no enrichment fields.

use crate::config::CatalogConfig;
use std::collections::BTreeMap;

/// The catalog provider a record was scraped from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Provider key (e.g. `audioteka`)
    pub id: String,

    /// Human-readable provider name
    pub description: String,

    /// Provider home page
    pub link: String,
}

impl From<&CatalogConfig> for Source {
    fn from(catalog: &CatalogConfig) -> Self {
        Self {
            id: catalog.id.clone(),
            description: catalog.name.clone(),
            link: catalog.base_url.clone(),
        }
    }
}

/// A book as listed on the search results page
///
/// Only entries with a title, a detail URL and at least one author become
/// candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Catalog id, from the entry's data attribute or the URL's last segment
    pub id: String,

    pub title: String,

    /// Never empty
    pub authors: Vec<String>,

    /// Absolute URL of the detail page
    pub url: String,

    pub cover: Option<String>,

    /// Rating on the site's own scale
    pub rating: Option<f64>,

    pub source: Source,
}

/// Fields scraped from a detail page
///
/// Each field is extracted independently; a missing row leaves its field
/// empty without affecting the others.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub narrator: String,

    /// Free-form, as displayed by the site (e.g. "5 godz. 30 min")
    pub duration: String,

    pub publisher: String,

    /// Product type (audiobook, podcast, ...)
    pub kind: String,

    pub genres: Vec<String>,

    /// First series the book belongs to
    pub series: Option<String>,

    pub rating: Option<f64>,

    pub cover: Option<String>,
}

/// A candidate merged with its detail page fields
///
/// When the detail page could not be fetched or parsed, every enrichment field
/// is `None` and the record carries exactly the candidate's data.
#[derive(Debug, Clone, PartialEq)]
pub struct FullRecord {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub url: String,
    pub cover: Option<String>,
    pub rating: Option<f64>,
    pub source: Source,

    pub narrator: Option<String>,
    pub duration: Option<String>,
    pub publisher: Option<String>,
    pub kind: Option<String>,
    pub genres: Option<Vec<String>>,
    pub series: Option<String>,
    pub languages: Option<Vec<String>>,

    /// Provider key to provider-specific id
    pub identifiers: Option<BTreeMap<String, String>>,
}

impl FullRecord {
    /// Merges a candidate with the fields scraped from its detail page
    ///
    /// Cover and rating from the detail page win when present; the candidate's
    /// values are kept otherwise.
    pub fn merge(candidate: Candidate, details: DetailFields, language: &str) -> Self {
        let identifiers = BTreeMap::from([(candidate.source.id.clone(), candidate.id.clone())]);

        Self {
            cover: details.cover.or(candidate.cover),
            rating: details.rating.or(candidate.rating),
            narrator: Some(details.narrator),
            duration: Some(details.duration),
            publisher: Some(details.publisher),
            kind: Some(details.kind),
            genres: Some(details.genres),
            series: details.series,
            languages: Some(vec![language.to_string()]),
            identifiers: Some(identifiers),
            id: candidate.id,
            title: candidate.title,
            authors: candidate.authors,
            url: candidate.url,
            source: candidate.source,
        }
    }

    /// Whether detail page fields were merged into this record
    pub fn is_enriched(&self) -> bool {
        self.identifiers.is_some()
    }
}

impl From<Candidate> for FullRecord {
    fn from(candidate: Candidate) -> Self {
        Self {
            id: candidate.id,
            title: candidate.title,
            authors: candidate.authors,
            url: candidate.url,
            cover: candidate.cover,
            rating: candidate.rating,
            source: candidate.source,
            narrator: None,
            duration: None,
            publisher: None,
            kind: None,
            genres: None,
            series: None,
            languages: None,
            identifiers: None,
        }
    }
}

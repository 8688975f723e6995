//! Response shape expected by the cataloging client
//!
//! Absent values are left out of the JSON rather than sent as `null`. Empty
//! strings count as absent.

use crate::catalog::FullRecord;
use serde::Serialize;

/// Body of a successful `/search` response
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<ResponseRecord>,
}

/// One book in the client's metadata format
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// All authors joined with ", "
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<SeriesEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

/// Series membership; the catalog never exposes the position in the series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesEntry {
    pub series: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl From<&FullRecord> for ResponseRecord {
    fn from(record: &FullRecord) -> Self {
        let identifier = |key: &str| {
            record
                .identifiers
                .as_ref()
                .and_then(|ids| ids.get(key))
                .cloned()
                .and_then(non_empty)
        };

        Self {
            title: record.title.clone(),
            subtitle: None,
            author: record.authors.join(", "),
            narrator: record.narrator.clone().and_then(non_empty),
            publisher: record.publisher.clone().and_then(non_empty),
            published_year: None,
            description: None,
            cover: record.cover.clone().and_then(non_empty),
            isbn: identifier("isbn"),
            asin: identifier("asin"),
            genres: record.genres.clone(),
            tags: None,
            series: record
                .series
                .clone()
                .and_then(non_empty)
                .map(|series| vec![SeriesEntry { series, sequence: None }]),
            language: record
                .languages
                .as_ref()
                .and_then(|languages| languages.first())
                .cloned()
                .and_then(non_empty),
            duration: record.duration.clone().and_then(non_empty),
        }
    }
}

impl SearchResponse {
    /// Formats lookup results, keeping their order
    pub fn from_records(records: &[FullRecord]) -> Self {
        Self {
            matches: records.iter().map(ResponseRecord::from).collect(),
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

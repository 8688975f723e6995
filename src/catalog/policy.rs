//! Extraction policy: how catalog markup becomes records
//!
//! The pipeline only talks to [`ExtractionPolicy`]. [`SelectorPolicy`] is the
//! implementation for the current Audioteka front-end and is driven entirely
//! by the `[selectors]` configuration table.

use crate::catalog::detail::{parse_detail_page, DetailSelectorSet};
use crate::catalog::search::{parse_search_results, SearchSelectorSet};
use crate::catalog::types::{Candidate, DetailFields, Source};
use crate::config::Config;
use crate::ConfigError;

/// Turns catalog pages into candidates and detail fields
pub trait ExtractionPolicy: Send + Sync {
    /// Extracts every valid result entry from a search results page
    fn parse_search_results(&self, html: &str) -> Vec<Candidate>;

    /// Extracts the secondary fields from a detail page
    fn parse_detail_page(&self, html: &str) -> Result<DetailFields, String>;
}

/// CSS selector based extraction
#[derive(Debug, Clone)]
pub struct SelectorPolicy {
    search: SearchSelectorSet,
    detail: DetailSelectorSet,
    base_url: String,
    source: Source,
}

impl SelectorPolicy {
    /// Compiles the selector table from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(SelectorPolicy)` - All selectors compiled
    /// * `Err(ConfigError)` - A selector is empty or not valid CSS
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            search: SearchSelectorSet::compile(&config.selectors.search)?,
            detail: DetailSelectorSet::compile(&config.selectors.detail)?,
            base_url: config.catalog.base_url.clone(),
            source: Source::from(&config.catalog),
        })
    }
}

impl ExtractionPolicy for SelectorPolicy {
    fn parse_search_results(&self, html: &str) -> Vec<Candidate> {
        parse_search_results(html, &self.search, &self.base_url, &self.source)
    }

    fn parse_detail_page(&self, html: &str) -> Result<DetailFields, String> {
        parse_detail_page(html, &self.detail)
    }
}

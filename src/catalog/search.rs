//! Search results page parsing
//!
//! Turns the markup of a search results page into [`Candidate`]s. Entries
//! missing a title, a detail link or an author are skipped; they never fail
//! the whole page.

use crate::catalog::parser::{first_attr, first_text, parse_rating};
use crate::catalog::types::{Candidate, Source};
use crate::config::{compile_selector, SearchSelectors};
use crate::url::{detail_url, last_path_segment};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors for the search results page
#[derive(Debug, Clone)]
pub struct SearchSelectorSet {
    item: Selector,
    title: Selector,
    link: Selector,
    author: Selector,
    cover: Selector,
    rating: Selector,
    id_attribute: String,
}

impl SearchSelectorSet {
    /// Compiles the configured selector strings
    pub fn compile(selectors: &SearchSelectors) -> Result<Self, ConfigError> {
        Ok(Self {
            item: compile_selector(&selectors.item)?,
            title: compile_selector(&selectors.title)?,
            link: compile_selector(&selectors.link)?,
            author: compile_selector(&selectors.author)?,
            cover: compile_selector(&selectors.cover)?,
            rating: compile_selector(&selectors.rating)?,
            id_attribute: selectors.id_attribute.clone(),
        })
    }
}

/// Parses a search results page into candidates
///
/// # Arguments
///
/// * `html` - The search results page
/// * `selectors` - Compiled search selectors
/// * `base_url` - Catalog origin that relative detail links are appended to
/// * `source` - Provider descriptor attached to every candidate
///
/// # Returns
///
/// The valid entries, in page order. A page without entries yields an empty
/// vector.
pub fn parse_search_results(
    html: &str,
    selectors: &SearchSelectorSet,
    base_url: &str,
    source: &Source,
) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let entries: Vec<ElementRef<'_>> = document.select(&selectors.item).collect();

    tracing::debug!("Number of result entries found: {}", entries.len());

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let candidate = parse_entry(entry, selectors, base_url, source);
            if candidate.is_none() {
                tracing::debug!("Skipping incomplete result entry #{}", index);
            }
            candidate
        })
        .collect()
}

/// Extracts a single candidate from a result entry
fn parse_entry(
    entry: ElementRef<'_>,
    selectors: &SearchSelectorSet,
    base_url: &str,
    source: &Source,
) -> Option<Candidate> {
    let title = first_text(entry, &selectors.title).filter(|title| !title.is_empty())?;
    let url = detail_url(base_url, first_attr(entry, &selectors.link, "href"))?;
    let author = first_text(entry, &selectors.author).filter(|author| !author.is_empty())?;

    let cover = first_attr(entry, &selectors.cover, "src").map(str::to_string);
    let rating = first_text(entry, &selectors.rating).and_then(|text| parse_rating(&text));

    let id = entry
        .value()
        .attr(&selectors.id_attribute)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| last_path_segment(&url).to_string());

    Some(Candidate {
        id,
        title,
        authors: vec![author],
        url,
        cover,
        rating,
        source: source.clone(),
    })
}

//! Detail page parsing
//!
//! The detail page carries a details table whose rows are identified by a
//! label ("Głosy", "Długość", ...). Each field is looked up independently and
//! left empty when its row is missing.

use crate::catalog::parser::{element_text, first_attr, parse_rating};
use crate::catalog::types::DetailFields;
use crate::config::{compile_selector, DetailSelectors};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Compiled selectors and row labels for the detail page
#[derive(Debug, Clone)]
pub struct DetailSelectorSet {
    row: Selector,
    value: Selector,
    value_link: Selector,
    series: Selector,
    rating: Selector,
    cover: Selector,
    narrator_label: String,
    duration_label: String,
    publisher_label: String,
    type_label: String,
    genre_label: String,
}

impl DetailSelectorSet {
    /// Compiles the configured selector strings
    pub fn compile(selectors: &DetailSelectors) -> Result<Self, ConfigError> {
        Ok(Self {
            row: compile_selector(&selectors.row)?,
            value: compile_selector(&selectors.value)?,
            value_link: compile_selector(&selectors.value_link)?,
            series: compile_selector(&selectors.series)?,
            rating: compile_selector(&selectors.rating)?,
            cover: compile_selector(&selectors.cover)?,
            narrator_label: selectors.narrator_label.clone(),
            duration_label: selectors.duration_label.clone(),
            publisher_label: selectors.publisher_label.clone(),
            type_label: selectors.type_label.clone(),
            genre_label: selectors.genre_label.clone(),
        })
    }
}

/// Parses a detail page into its secondary fields
///
/// # Returns
///
/// * `Ok(DetailFields)` - The extracted fields, any of which may be empty
/// * `Err(String)` - The body is not a document at all
pub fn parse_detail_page(
    html: &str,
    selectors: &DetailSelectorSet,
) -> Result<DetailFields, String> {
    if html.trim().is_empty() {
        return Err("empty response body".to_string());
    }

    let document = Html::parse_document(html);
    let root = document.root_element();
    let rows: Vec<ElementRef<'_>> = root.select(&selectors.row).collect();
    let table = DetailsTable {
        rows: &rows,
        selectors,
    };

    let series = root
        .select(&selectors.series)
        .map(element_text)
        .find(|name| !name.is_empty());

    let rating = root
        .select(&selectors.rating)
        .next()
        .map(element_text)
        .and_then(|text| parse_rating(&text));

    Ok(DetailFields {
        narrator: table.link_texts(&selectors.narrator_label).join(", "),
        duration: table.value_text(&selectors.duration_label),
        publisher: table.link_texts(&selectors.publisher_label).join(", "),
        kind: table.value_text(&selectors.type_label),
        genres: table.link_texts(&selectors.genre_label),
        series,
        rating,
        cover: first_attr(root, &selectors.cover, "src").map(str::to_string),
    })
}

/// Label-keyed view over the rows of the details table
struct DetailsTable<'a, 'b> {
    rows: &'b [ElementRef<'a>],
    selectors: &'b DetailSelectorSet,
}

impl<'a, 'b> DetailsTable<'a, 'b> {
    /// Value cells of every row whose text contains `label`
    fn value_cells(&self, label: &str) -> Vec<ElementRef<'a>> {
        self.rows
            .iter()
            .filter(|row| element_text(**row).contains(label))
            .flat_map(|row| row.select(&self.selectors.value))
            .collect()
    }

    /// Text of the first matching value cell, or an empty string
    fn value_text(&self, label: &str) -> String {
        self.value_cells(label)
            .into_iter()
            .map(element_text)
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }

    /// Texts of the links inside the matching value cells, in page order
    fn link_texts(&self, label: &str) -> Vec<String> {
        self.value_cells(label)
            .into_iter()
            .flat_map(|cell| cell.select(&self.selectors.value_link).collect::<Vec<_>>())
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }
}

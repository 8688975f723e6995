//! Catalog scraping pipeline
//!
//! This module contains the core lookup logic:
//! - HTTP fetching of catalog pages
//! - Search results parsing into candidates
//! - Detail page parsing and merging into full records
//! - Concurrent enrichment with ordered results

mod coordinator;
mod detail;
mod fetcher;
mod parser;
mod policy;
mod search;
mod types;

pub use coordinator::Provider;
pub use detail::{parse_detail_page, DetailSelectorSet};
pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use parser::parse_rating;
pub use policy::{ExtractionPolicy, SelectorPolicy};
pub use search::{parse_search_results, SearchSelectorSet};
pub use types::{Candidate, DetailFields, FullRecord, Source};

//! Lookup coordinator - search, fan out enrichment, fan in
//!
//! A lookup is one search request followed by one detail request per
//! candidate. Detail requests overlap (bounded by a per-lookup semaphore) and
//! the results come back in candidate order. Scraping failures never escape:
//! a failed search is an empty result and a failed detail page leaves its
//! record unenriched.

use crate::catalog::fetcher::{build_http_client, fetch_page};
use crate::catalog::policy::{ExtractionPolicy, SelectorPolicy};
use crate::catalog::types::{Candidate, DetailFields, FullRecord, Source};
use crate::config::{CatalogConfig, Config};
use crate::url::build_search_url;
use crate::ProviderError;
use futures::future::join_all;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// The metadata provider
///
/// Holds no per-request state, so a single instance is shared by every
/// request handler.
pub struct Provider {
    client: Client,
    policy: Arc<dyn ExtractionPolicy>,
    catalog: CatalogConfig,
    max_concurrent_enrichments: usize,
}

impl Provider {
    /// Creates a provider using the configured selector table
    ///
    /// # Returns
    ///
    /// * `Ok(Provider)` - Ready to serve lookups
    /// * `Err(ProviderError)` - The HTTP client or a selector failed to build
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let policy = SelectorPolicy::new(config)?;
        Self::with_policy(config, Arc::new(policy))
    }

    /// Creates a provider with a custom extraction policy
    pub fn with_policy(
        config: &Config,
        policy: Arc<dyn ExtractionPolicy>,
    ) -> Result<Self, ProviderError> {
        let client = build_http_client(&config.http)?;

        Ok(Self {
            client,
            policy,
            catalog: config.catalog.clone(),
            max_concurrent_enrichments: config.http.max_concurrent_enrichments.max(1) as usize,
        })
    }

    /// The provider descriptor attached to every record
    pub fn source(&self) -> Source {
        Source::from(&self.catalog)
    }

    /// Searches the catalog
    ///
    /// The author is only logged; the catalog search is by query alone.
    ///
    /// # Returns
    ///
    /// The candidates in result page order. Any fetch failure yields an empty
    /// vector.
    pub async fn search(&self, query: &str, author: Option<&str>) -> Vec<Candidate> {
        tracing::info!(
            "Searching for: \"{}\" by \"{}\"",
            query,
            author.unwrap_or_default()
        );

        match self.try_search(query).await {
            Ok(candidates) => {
                tracing::info!("Search for \"{}\" found {} candidates", query, candidates.len());
                candidates
            }
            Err(e) => {
                tracing::warn!("Search for \"{}\" failed: {}", query, e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<Candidate>, ProviderError> {
        let url = build_search_url(&self.catalog.base_url, &self.catalog.search_path, query)?;
        tracing::debug!("Search URL: {}", url);

        let body = fetch_page(&self.client, url.as_str())
            .await
            .into_body(url.as_str())?;

        Ok(self.policy.parse_search_results(&body))
    }

    /// Enriches a candidate with its detail page
    ///
    /// # Returns
    ///
    /// The merged record, or the candidate as-is when the detail page cannot
    /// be fetched or parsed.
    pub async fn enrich(&self, candidate: Candidate) -> FullRecord {
        tracing::debug!("Fetching full metadata for: {}", candidate.title);

        match self.try_enrich(&candidate).await {
            Ok(details) => {
                let record = FullRecord::merge(candidate, details, &self.catalog.language);
                tracing::debug!("Full metadata for {}: {:?}", record.title, record);
                record
            }
            Err(e) => {
                tracing::warn!(
                    "Error fetching full metadata for {}: {}",
                    candidate.title,
                    e
                );
                FullRecord::from(candidate)
            }
        }
    }

    async fn try_enrich(&self, candidate: &Candidate) -> Result<DetailFields, ProviderError> {
        let body = fetch_page(&self.client, &candidate.url)
            .await
            .into_body(&candidate.url)?;

        self.policy
            .parse_detail_page(&body)
            .map_err(|message| ProviderError::HtmlParse {
                url: candidate.url.clone(),
                message,
            })
    }

    /// Runs a full lookup: search, then enrich every candidate
    ///
    /// Detail pages are fetched concurrently, at most
    /// `max-concurrent-enrichments` at a time. The output has one record per
    /// candidate, in candidate order, whatever order the fetches finish in.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use audioteka_provider::{Config, Provider};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let provider = Provider::new(&Config::default())?;
    /// for record in provider.lookup("Diuna", None).await {
    ///     println!("{} ({})", record.title, record.authors.join(", "));
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn lookup(&self, query: &str, author: Option<&str>) -> Vec<FullRecord> {
        let candidates = self.search(query, author).await;
        if candidates.is_empty() {
            return Vec::new();
        }

        let limiter = Semaphore::new(self.max_concurrent_enrichments);
        let limiter = &limiter;

        let enrichments = candidates.into_iter().map(|candidate| async move {
            // The semaphore is never closed, so acquire cannot fail
            let _permit = limiter.acquire().await.ok();
            self.enrich(candidate).await
        });

        let records = join_all(enrichments).await;

        tracing::info!(
            "Lookup for \"{}\" returned {} records ({} enriched)",
            query,
            records.len(),
            records.iter().filter(|r| r.is_enriched()).count()
        );

        records
    }
}

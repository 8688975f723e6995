use serde::Deserialize;

/// Main configuration structure for the provider
///
/// Every section is optional; missing sections and keys fall back to the
/// values the Audioteka site currently needs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
    pub selectors: SelectorConfig,
}

/// Inbound HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

/// The catalog site being scraped
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Provider key, used in the `source` descriptor and `identifiers` map
    pub id: String,

    /// Human-readable provider name
    pub name: String,

    /// Site origin; relative result links are appended to it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path of the search endpoint
    #[serde(rename = "search-path")]
    pub search_path: String,

    /// Language code reported for every record (the site has a single locale)
    pub language: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            id: "audioteka".to_string(),
            name: "Audioteka".to_string(),
            base_url: "https://audioteka.com".to_string(),
            search_path: "/pl/search".to_string(),
            language: "pol".to_string(),
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent to the catalog
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Total timeout per outbound request, in seconds. No timeout when unset.
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,

    /// Connect timeout per outbound request, in seconds. No timeout when unset.
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: Option<u64>,

    /// Maximum number of detail pages fetched at once for a single lookup
    #[serde(rename = "max-concurrent-enrichments")]
    pub max_concurrent_enrichments: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("audioteka-provider/{}", env!("CARGO_PKG_VERSION")),
            request_timeout_secs: None,
            connect_timeout_secs: None,
            max_concurrent_enrichments: 8,
        }
    }
}

/// Extraction table: every selector the scraper depends on
///
/// The class names are generated by the site's front-end build and change
/// whenever it is redeployed. Keep them here so a site change is a config
/// edit rather than a code change.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub search: SearchSelectors,
    pub detail: DetailSelectors,
}

/// Selectors for the search results page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSelectors {
    /// One node per result entry
    pub item: String,

    /// Title text, relative to an item
    pub title: String,

    /// Anchor whose `href` points at the detail page, relative to an item
    pub link: String,

    /// Author text, relative to an item
    pub author: String,

    /// Image whose `src` is the cover, relative to an item
    pub cover: String,

    /// Rating text, relative to an item
    pub rating: String,

    /// Attribute on the item node carrying the catalog id
    #[serde(rename = "id-attribute")]
    pub id_attribute: String,
}

impl Default for SearchSelectors {
    fn default() -> Self {
        Self {
            item: ".adtk-item.teaser_teaser__kRYek".to_string(),
            title: ".teaser_title__CZ9eq".to_string(),
            link: ".teaser_mainLink__YBhax".to_string(),
            author: ".teaser_author__BV8Ke".to_string(),
            cover: ".teaser_cover__2EVLn".to_string(),
            rating: ".teaser_rating__ksFn3".to_string(),
            id_attribute: "data-item-id".to_string(),
        }
    }
}

/// Selectors and row labels for the detail page
///
/// Most fields live in a details table where each row is identified by the
/// (Polish) label it contains.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    /// A details-table row
    pub row: String,

    /// The value cell of a row
    pub value: String,

    /// Links inside a value cell
    #[serde(rename = "value-link")]
    pub value_link: String,

    #[serde(rename = "narrator-label")]
    pub narrator_label: String,

    #[serde(rename = "duration-label")]
    pub duration_label: String,

    #[serde(rename = "publisher-label")]
    pub publisher_label: String,

    #[serde(rename = "type-label")]
    pub type_label: String,

    #[serde(rename = "genre-label")]
    pub genre_label: String,

    /// Series (collection) links; only the first is kept
    pub series: String,

    /// Rating label
    pub rating: String,

    /// Main cover image
    pub cover: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            row: "tr".to_string(),
            value: "td:last-child".to_string(),
            value_link: "a".to_string(),
            narrator_label: "Głosy".to_string(),
            duration_label: "Długość".to_string(),
            publisher_label: "Wydawca".to_string(),
            type_label: "Typ".to_string(),
            genre_label: "Kategoria".to_string(),
            series: ".Collections__CollectionList-sc-cd06413d-1 a".to_string(),
            rating: ".StarIcon__Label-sc-96b8391b-2".to_string(),
            cover: ".ProductTop-styled__Cover-sc-aae7c7ba-0".to_string(),
        }
    }
}

//! URL handling for the catalog site
//!
//! This module builds the search endpoint URL and turns the relative links
//! found in search results into absolute detail-page URLs.

use ::url::Url;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Escaped in the search phrase: everything but `A-Z a-z 0-9 - _ . ! ~ * ' ( )`
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Builds the search endpoint URL for a query
///
/// The query is percent-encoded as a URI component into the `query`
/// parameter of `{base_url}{search_path}`: spaces become `%20`, not `+`.
/// `Url` itself still escapes `'` in the query of http(s) URLs.
///
/// # Arguments
///
/// * `base_url` - The catalog origin (e.g. `https://audioteka.com`)
/// * `search_path` - The search endpoint path (e.g. `/pl/search`)
/// * `query` - The raw search phrase
///
/// # Returns
///
/// * `Ok(Url)` - The search URL
/// * `Err(url::ParseError)` - The base URL and path do not form a valid URL
///
/// # Examples
///
/// ```
/// use audioteka_provider::url::build_search_url;
///
/// let url = build_search_url("https://audioteka.com", "/pl/search", "Diuna").unwrap();
/// assert_eq!(url.as_str(), "https://audioteka.com/pl/search?query=Diuna");
/// ```
pub fn build_search_url(
    base_url: &str,
    search_path: &str,
    query: &str,
) -> Result<Url, ::url::ParseError> {
    let mut url = Url::parse(&concat_origin(base_url, search_path))?;
    let encoded = utf8_percent_encode(query, QUERY_COMPONENT);
    url.set_query(Some(&format!("query={}", encoded)));
    Ok(url)
}

/// Builds an absolute detail-page URL from a relative `href`
///
/// The href is appended to the catalog origin as-is, so only site-relative
/// paths produce meaningful URLs.
///
/// # Returns
///
/// * `Some(String)` - The absolute URL
/// * `None` - The href is missing or blank
pub fn detail_url(base_url: &str, href: Option<&str>) -> Option<String> {
    let href = href?.trim();
    if href.is_empty() {
        return None;
    }

    Some(concat_origin(base_url, href))
}

/// Returns the trailing path segment of a URL
///
/// This is the text after the last `/`, which is empty for URLs ending in a
/// slash.
pub fn last_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}

/// Joins an origin and a path without doubling the slash between them
fn concat_origin(base_url: &str, path: &str) -> String {
    match (base_url.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base_url, &path[1..]),
        (false, false) => format!("{}/{}", base_url, path),
        _ => format!("{}{}", base_url, path),
    }
}

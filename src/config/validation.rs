use crate::config::types::{
    CatalogConfig, Config, DetailSelectors, HttpConfig, SearchSelectors, ServerConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_catalog_config(&config.catalog)?;
    validate_http_config(&config.http)?;
    validate_search_selectors(&config.selectors.search)?;
    validate_detail_selectors(&config.selectors.detail)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.id.is_empty() {
        return Err(ConfigError::Validation(
            "catalog id cannot be empty".to_string(),
        ));
    }

    if config.language.is_empty() {
        return Err(ConfigError::Validation(
            "catalog language cannot be empty".to_string(),
        ));
    }

    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if !config.search_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "search-path must start with '/', got '{}'",
            config.search_path
        )));
    }

    Ok(())
}

/// Validates outbound HTTP configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.max_concurrent_enrichments < 1 || config.max_concurrent_enrichments > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-enrichments must be between 1 and 100, got {}",
            config.max_concurrent_enrichments
        )));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be >= 1 when set".to_string(),
        ));
    }

    if config.connect_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates the search results selectors
fn validate_search_selectors(selectors: &SearchSelectors) -> Result<(), ConfigError> {
    for selector in [
        &selectors.item,
        &selectors.title,
        &selectors.link,
        &selectors.author,
        &selectors.cover,
        &selectors.rating,
    ] {
        validate_selector(selector)?;
    }

    if selectors.id_attribute.trim().is_empty() {
        return Err(ConfigError::Validation(
            "id-attribute cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the detail page selectors and row labels
fn validate_detail_selectors(selectors: &DetailSelectors) -> Result<(), ConfigError> {
    for selector in [
        &selectors.row,
        &selectors.value,
        &selectors.value_link,
        &selectors.series,
        &selectors.rating,
        &selectors.cover,
    ] {
        validate_selector(selector)?;
    }

    for label in [
        &selectors.narrator_label,
        &selectors.duration_label,
        &selectors.publisher_label,
        &selectors.type_label,
        &selectors.genre_label,
    ] {
        if label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "detail row labels cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Checks that a CSS selector is non-empty and parses
pub(crate) fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    compile_selector(selector).map(|_| ())
}

/// Compiles a CSS selector, mapping parse failures to a config error
pub(crate) fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::InvalidSelector {
            selector: selector.to_string(),
            message: "selector cannot be empty".to_string(),
        });
    }

    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

//! Configuration module for the provider
//!
//! This module handles loading, parsing, and validating the TOML configuration
//! file. Every key has a default, so the service also runs with no file at all.
//!
//! # Example
//!
//! ```no_run
//! use audioteka_provider::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("provider.toml")).unwrap();
//! println!("Scraping {}", config.catalog.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CatalogConfig, Config, DetailSelectors, HttpConfig, SearchSelectors, SelectorConfig,
    ServerConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

pub(crate) use validation::compile_selector;

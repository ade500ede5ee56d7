pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::HttpProductSource;
pub use api::{app, AppState};
pub use config::toml_config::{SelectorConfig, ServiceConfig, UpstreamConfig};
pub use crate::core::{extractor::Extractor, search::SearchService};
pub use utils::error::{Result, ScraperError};

use std::sync::Arc;

/// Wires the upstream client, extractor and router from a resolved config.
pub fn build_app(config: &ServiceConfig) -> Result<axum::Router> {
    let extractor = Extractor::new(&config.selectors)?;
    let source = Arc::new(HttpProductSource::new(config.upstream.clone()));
    let search = SearchService::new(source, extractor);

    Ok(app(AppState { search }))
}

use crate::core::extractor::Extractor;
use crate::core::ProductSource;
use crate::domain::model::SearchResponse;
use crate::utils::error::Result;
use std::sync::Arc;

/// Fetches the upstream results page for a query and turns it into a
/// [`SearchResponse`].
#[derive(Clone)]
pub struct SearchService {
    source: Arc<dyn ProductSource>,
    extractor: Arc<Extractor>,
}

impl SearchService {
    pub fn new(source: Arc<dyn ProductSource>, extractor: Extractor) -> Self {
        Self {
            source,
            extractor: Arc::new(extractor),
        }
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse> {
        tracing::debug!("Fetching results page for query `{}`", query);
        let html = self.source.fetch_listing(query).await?;
        tracing::debug!("Received {} bytes of HTML", html.len());

        let products = self.extractor.extract(&html)?;
        tracing::info!("🔎 Query `{}` returned {} products", query, products.len());

        Ok(SearchResponse { products })
    }
}

use crate::core::{ConfigProvider, ProductSource};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use reqwest::Client;

/// Posts the search form to the upstream site, the way a browser would.
pub struct HttpProductSource<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpProductSource<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> ProductSource for HttpProductSource<C> {
    async fn fetch_listing(&self, query: &str) -> Result<String> {
        let endpoint = self.config.upstream_endpoint();
        tracing::debug!("Making upstream POST to: {}", endpoint);

        let mut request = self
            .client
            .post(endpoint)
            .form(&[(self.config.form_field(), query)]);

        for (key, value) in self.config.headers() {
            request = request.header(key, value);
        }

        if let Some(cookie) = self.config.cookie_header() {
            request = request.header(COOKIE, cookie);
        }

        if let Some(timeout) = self.config.timeout() {
            request = request.timeout(timeout);
        }

        let response = request.send().await.inspect_err(|e| {
            tracing::warn!("❌ Upstream request failed: {}", e);
        })?;

        tracing::debug!("Upstream response status: {}", response.status());

        let response = response.error_for_status().inspect_err(|e| {
            tracing::warn!("❌ Upstream returned an error status: {}", e);
        })?;

        Ok(response.text().await?)
    }
}

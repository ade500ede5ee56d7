use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

pub trait ConfigProvider: Send + Sync {
    fn upstream_endpoint(&self) -> &str;
    fn form_field(&self) -> &str;
    fn headers(&self) -> &BTreeMap<String, String>;
    fn cookies(&self) -> &BTreeMap<String, String>;
    fn timeout(&self) -> Option<Duration>;

    /// All cookies joined into one `Cookie` header value, `None` when there are none.
    fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies();
        if cookies.is_empty() {
            return None;
        }
        Some(
            cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Fetches the raw search-results page for a query.
#[async_trait]
pub trait ProductSource: Send + Sync {
    async fn fetch_listing(&self, query: &str) -> Result<String>;
}

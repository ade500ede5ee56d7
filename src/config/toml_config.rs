use crate::core::ConfigProvider;
use crate::utils::error::{Result, ScraperError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://wakeabc.com/search-results";
pub const DEFAULT_FORM_FIELD: &str = "productSearch";

const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:131.0) Gecko/20100101 Firefox/131.0",
    ),
    (
        "Accept",
        "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/png,image/svg+xml,*/*;q=0.8",
    ),
    ("Accept-Language", "en-US,en;q=0.5"),
    ("Origin", "https://wakeabc.com"),
    ("Referer", "https://wakeabc.com/search-results"),
    ("Upgrade-Insecure-Requests", "1"),
    ("Sec-Fetch-Dest", "document"),
    ("Sec-Fetch-Mode", "navigate"),
    ("Sec-Fetch-Site", "same-origin"),
    ("Sec-Fetch-User", "?1"),
    ("Priority", "u=0, i"),
];

const DEFAULT_COOKIES: &[(&str, &str)] = &[
    ("_ga_WQZZR5YKCY", "GS1.1.1728553989.2.1.1728554072.0.0.0"),
    ("_ga", "GA1.1.942739358.1728206527"),
    ("_gauges_unique_month", "1"),
    ("_gauges_unique_year", "1"),
    ("_gauges_unique", "1"),
    ("_gauges_unique_hour", "1"),
    ("_gauges_unique_day", "1"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub selectors: SelectorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Settings for the single outbound search request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub form_field: String,
    /// Unset means the client default (no timeout).
    pub timeout_seconds: Option<u64>,
    /// Replaces the built-in browser header set when present in the file.
    pub headers: BTreeMap<String, String>,
    pub cookies: BTreeMap<String, String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            form_field: DEFAULT_FORM_FIELD.to_string(),
            timeout_seconds: None,
            headers: to_map(DEFAULT_HEADERS),
            cookies: to_map(DEFAULT_COOKIES),
        }
    }
}

impl ConfigProvider for UpstreamConfig {
    fn upstream_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form_field(&self) -> &str {
        &self.form_field
    }

    fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    fn cookies(&self) -> &BTreeMap<String, String> {
        &self.cookies
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

/// CSS selectors describing the upstream search-results markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub product: String,
    pub name: String,
    pub price: String,
    pub size: String,
    pub plu_number: String,
    pub inventory_panel: String,
    pub inventory_entry: String,
    pub store_address: String,
    pub quantity: String,
    /// Literal removed from the quantity text, e.g. "5 in stock" -> "5".
    pub stock_suffix: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product: "div.wake-product".to_string(),
            name: "h4".to_string(),
            price: "span.price".to_string(),
            size: "span.size".to_string(),
            plu_number: "small".to_string(),
            inventory_panel: "div.inventory-collapse".to_string(),
            inventory_entry: "li".to_string(),
            store_address: "span.address".to_string(),
            quantity: "span.quantity".to_string(),
            stock_suffix: "in stock".to_string(),
        }
    }
}

impl SelectorConfig {
    pub(crate) fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("selectors.product", self.product.as_str()),
            ("selectors.name", self.name.as_str()),
            ("selectors.price", self.price.as_str()),
            ("selectors.size", self.size.as_str()),
            ("selectors.plu_number", self.plu_number.as_str()),
            ("selectors.inventory_panel", self.inventory_panel.as_str()),
            ("selectors.inventory_entry", self.inventory_entry.as_str()),
            ("selectors.store_address", self.store_address.as_str()),
            ("selectors.quantity", self.quantity.as_str()),
        ]
    }
}

fn to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl ServiceConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScraperError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScraperError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${UPSTREAM_ENDPOINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScraperError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_range("server.port", self.server.port, 1, u16::MAX)?;

        validation::validate_url("upstream.endpoint", &self.upstream.endpoint)?;
        validation::validate_non_empty_string("upstream.form_field", &self.upstream.form_field)?;
        if let Some(timeout) = self.upstream.timeout_seconds {
            validation::validate_range("upstream.timeout_seconds", timeout, 1, 300)?;
        }

        for (name, value) in &self.upstream.headers {
            validation::validate_header("upstream.headers", name, value)?;
        }
        if let Some(cookie) = self.upstream.cookie_header() {
            validation::validate_header("upstream.cookies", "Cookie", &cookie)?;
        }

        for (field, selector) in self.selectors.entries() {
            validation::validate_non_empty_string(field, selector)?;
        }

        Ok(())
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("Failed to fetch data: {0}")]
    UpstreamError(#[from] reqwest::Error),

    #[error("Missing `{field}` in product #{product_index}")]
    ExtractionError { product_index: usize, field: String },

    #[error("Invalid selector `{selector}`: {message}")]
    SelectorError { selector: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for `{field}` ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl ScraperError {
    pub fn is_upstream(&self) -> bool {
        matches!(self, ScraperError::UpstreamError(_))
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ScraperError::UpstreamError(_) => {
                "Check network connectivity and that the upstream site is reachable"
            }
            ScraperError::ExtractionError { .. } => {
                "The upstream markup may have changed; review the [selectors] section"
            }
            ScraperError::SelectorError { .. } => "Fix the CSS selector syntax in [selectors]",
            ScraperError::IoError(_) => "Check that the file exists and is readable",
            ScraperError::ConfigError { .. }
            | ScraperError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ScraperError>;

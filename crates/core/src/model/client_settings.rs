use thiserror::Error;
use url::Url;

use crate::scoring::DEFAULT_REVIEW_THRESHOLD;

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Validated client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientSettings {
    api_base_url: Url,
    review_threshold: u32,
}

#[derive(Clone, Debug, Default)]
pub struct ClientSettingsDraft {
    pub api_base_url: Option<String>,
    pub review_threshold: Option<u32>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ClientSettingsError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("base URL must use http or https: {0}")]
    UnsupportedScheme(String),
    #[error("review threshold must be between 1 and 100, got {0}")]
    InvalidReviewThreshold(u32),
}

impl ClientSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into usable settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientSettingsError` if the base URL cannot be parsed, is not
    /// http(s), or the review threshold is out of range.
    pub fn validate(self) -> Result<ClientSettings, ClientSettingsError> {
        let raw = self
            .api_base_url
            .map(|val| val.trim().trim_end_matches('/').to_string())
            .filter(|val| !val.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let api_base_url =
            Url::parse(&raw).map_err(|_| ClientSettingsError::InvalidBaseUrl(raw.clone()))?;
        if !matches!(api_base_url.scheme(), "http" | "https") {
            return Err(ClientSettingsError::UnsupportedScheme(raw));
        }

        let review_threshold = self.review_threshold.unwrap_or(DEFAULT_REVIEW_THRESHOLD);
        if !(1..=100).contains(&review_threshold) {
            return Err(ClientSettingsError::InvalidReviewThreshold(review_threshold));
        }

        Ok(ClientSettings {
            api_base_url,
            review_threshold,
        })
    }
}

impl ClientSettings {
    #[must_use]
    pub fn api_base_url(&self) -> &Url {
        &self.api_base_url
    }

    #[must_use]
    pub fn review_threshold(&self) -> u32 {
        self.review_threshold
    }

    /// Joins a path below the base URL, keeping any base path segment.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default base URL is valid"),
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

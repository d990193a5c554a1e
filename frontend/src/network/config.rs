use std::time::Duration;

use url::Url;

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_PIPELINE_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_MS,
};
use crate::error::ApiError;

/// Endpoint configuration for one `ApiClient`.
///
/// Two of these coexist at runtime: the primary client that talks to the
/// management/analysis blueprints and the pipeline client used by the crawler
/// and pipeline screens. They may point at the same host but are configured
/// independently.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    base_url: String,
    timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_url(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Primary client. `API_BASE_URL` set at build time wins over the default.
    pub fn primary() -> Self {
        Self::from_url(option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL))
    }

    /// Pipeline/crawler client, overridable via `PIPELINE_API_BASE_URL`.
    pub fn pipeline() -> Self {
        Self::from_url(
            option_env!("PIPELINE_API_BASE_URL").unwrap_or(DEFAULT_PIPELINE_API_BASE_URL),
        )
    }

    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for `path` with `query` appended as percent-encoded pairs.
    pub fn url(&self, path: &str, query: &[(String, String)]) -> Result<String, ApiError> {
        let joined = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&joined)
            .map_err(|e| ApiError::Encode(format!("invalid URL {}: {}", joined, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash_and_joins_path() {
        let config = ApiConfig::from_url("http://localhost:5000/");
        assert_eq!(config.base_url(), "http://localhost:5000");
        assert_eq!(
            config.url("/api/manage/topics", &[]).unwrap(),
            "http://localhost:5000/api/manage/topics"
        );
    }

    #[test]
    fn encodes_query_pairs() {
        let config = ApiConfig::from_url("http://localhost:5000");
        let query = vec![
            ("topic_id".to_string(), "3".to_string()),
            ("keyword".to_string(), "春节 快乐".to_string()),
        ];
        let url = config.url("/api/manage/data/query", &query).unwrap();
        assert_eq!(
            url,
            "http://localhost:5000/api/manage/data/query?topic_id=3&keyword=%E6%98%A5%E8%8A%82+%E5%BF%AB%E4%B9%90"
        );
    }

    #[test]
    fn default_timeout_is_sized_for_pipeline_runs() {
        assert_eq!(ApiConfig::default().timeout(), Duration::from_secs(300));
        let short = ApiConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(short.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn rejects_unparseable_base() {
        let config = ApiConfig::from_url("not a url");
        assert!(matches!(config.url("/api", &[]), Err(ApiError::Encode(_))));
    }
}

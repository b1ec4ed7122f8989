use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::error::{SkError, SkResult};
use super::models::*;

const DEFAULT_USER_AGENT: &str = "Musicsite/0.1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of release data consumed by the release cache
#[async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetch the full list of published releases
    async fn fetch_releases(&self) -> SkResult<Vec<ReleaseSummary>>;

    /// Fetch one release; `Ok(None)` when the service reports it missing
    async fn fetch_release(&self, id: ReleaseId) -> SkResult<Option<ReleaseDetail>>;
}

/// Prefix a scheme when missing and make sure the path ends with `/`, so
/// relative joins append to the base instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> String {
    let lower = raw.to_ascii_lowercase();
    let with_protocol = if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        format!("https://{}", raw)
    };

    if with_protocol.ends_with('/') {
        with_protocol
    } else {
        format!("{}/", with_protocol)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// SongKeeper release catalog API client
///
/// Missing settings are accepted at construction and reported as
/// [`SkError::Config`] by the first request.
#[derive(Clone)]
pub struct SongKeeperClient {
    client: Client,
    api_url: Option<String>,
    access_key: Option<String>,
}

impl SongKeeperClient {
    /// Create a new SongKeeper client
    pub fn new(api_url: Option<String>, access_key: Option<String>) -> SkResult<Self> {
        Self::with_user_agent(DEFAULT_USER_AGENT, api_url, access_key)
    }

    /// Create a new SongKeeper client with a custom User-Agent
    pub fn with_user_agent(
        user_agent: &str,
        api_url: Option<String>,
        access_key: Option<String>,
    ) -> SkResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_url: non_blank(api_url),
            access_key: non_blank(access_key),
        })
    }

    /// Resolve `path` against the configured base URL
    fn endpoint(&self, path: &str) -> SkResult<(Url, &str)> {
        let api_url = self
            .api_url
            .as_deref()
            .ok_or_else(|| SkError::Config("SONGKEEPER_API_URL is not set".to_string()))?;
        let access_key = self
            .access_key
            .as_deref()
            .ok_or_else(|| SkError::Config("SONGKEEPER_ACCESS_KEY is not set".to_string()))?;

        let base = normalize_base_url(api_url.trim());
        let url = Url::parse(&base)
            .and_then(|b| b.join(path))
            .map_err(|e| SkError::InvalidBaseUrl(format!("{}: {}", api_url, e)))?;

        Ok((url, access_key))
    }

    /// Execute an authenticated GET; a 404 yields `Ok(None)`
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> SkResult<Option<T>> {
        let (url, access_key) = self.endpoint(path)?;

        debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(access_key)
            .send()
            .await?;
        let status = response.status();

        if status.is_success() {
            return response.json::<T>().await.map(Some).map_err(|e| {
                SkError::ParseError(format!("Failed to parse response from {}: {}", url, e))
            });
        }

        if status == StatusCode::NOT_FOUND {
            debug!("{} returned 404", url);
            return Ok(None);
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(SkError::ApiError {
            status: status.as_u16(),
            message,
        })
    }

    /// List all published releases
    pub async fn releases(&self) -> SkResult<Vec<ReleaseSummary>> {
        match self.get::<ReleasesResponse>("releases").await? {
            Some(body) => Ok(body.releases),
            None => Err(SkError::ApiError {
                status: StatusCode::NOT_FOUND.as_u16(),
                message: "release list endpoint not found".to_string(),
            }),
        }
    }

    /// Look up one release with tracks, credits and lyrics
    pub async fn release(&self, id: ReleaseId) -> SkResult<Option<ReleaseDetail>> {
        let path = format!("releases/{}", id);
        Ok(self
            .get::<ReleaseResponse>(&path)
            .await?
            .map(|body| body.release))
    }
}

#[async_trait]
impl ReleaseSource for SongKeeperClient {
    async fn fetch_releases(&self) -> SkResult<Vec<ReleaseSummary>> {
        self.releases().await
    }

    async fn fetch_release(&self, id: ReleaseId) -> SkResult<Option<ReleaseDetail>> {
        self.release(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SongKeeperClient::new(
            Some("api.songkeeper.test/v1".into()),
            Some("secret".into()),
        );
        assert!(client.is_ok());
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("api.example.com"), "https://api.example.com/");
        assert_eq!(normalize_base_url("http://api.example.com/v1"), "http://api.example.com/v1/");
        assert_eq!(normalize_base_url("HTTPS://api.example.com/"), "HTTPS://api.example.com/");
        assert_eq!(normalize_base_url("//api.example.com"), "https://api.example.com/");
    }

    #[test]
    fn test_endpoint_joins_under_base_path() {
        let client =
            SongKeeperClient::new(Some("api.example.com/v1".into()), Some("k".into())).unwrap();
        let (url, key) = client.endpoint("releases/12").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/releases/12");
        assert_eq!(key, "k");
    }

    #[test]
    fn test_blank_settings_are_missing() {
        let client = SongKeeperClient::new(Some("  ".into()), Some("k".into())).unwrap();
        assert!(matches!(client.endpoint("releases"), Err(SkError::Config(_))));
    }

    #[test]
    fn test_malformed_base_url() {
        let client = SongKeeperClient::new(Some("http://".into()), Some("k".into())).unwrap();
        assert!(matches!(
            client.endpoint("releases"),
            Err(SkError::InvalidBaseUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_configuration_fails_at_first_use() {
        let client = SongKeeperClient::new(None, Some("k".into())).unwrap();
        let result = client.releases().await;
        assert!(matches!(result, Err(SkError::Config(_))));

        let client = SongKeeperClient::new(Some("api.example.com".into()), None).unwrap();
        let result = client.release(1).await;
        assert!(matches!(result, Err(SkError::Config(_))));
    }

    #[tokio::test]
    #[ignore] // Requires network access and SONGKEEPER_* credentials
    async fn test_list_releases() {
        let client = SongKeeperClient::new(
            std::env::var("SONGKEEPER_API_URL").ok(),
            std::env::var("SONGKEEPER_ACCESS_KEY").ok(),
        )
        .unwrap();
        let result = client.releases().await;
        assert!(result.is_ok());
    }
}

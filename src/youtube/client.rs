use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::error::{YtError, YtResult};
use super::models::{PlaylistItem, PlaylistItemsResponse, Video};

const PLAYLIST_ITEMS_URL: &str = "https://www.googleapis.com/youtube/v3/playlistItems";
const MAX_RESULTS: u32 = 20;

/// YouTube Data API client for the site's video playlist
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    playlist_id: Option<String>,
}

impl YouTubeClient {
    pub fn new(api_key: Option<String>, playlist_id: Option<String>) -> YtResult<Self> {
        Self::with_base_url(PLAYLIST_ITEMS_URL, api_key, playlist_id)
    }

    /// Create a new client with custom endpoint URL (for testing)
    pub fn with_base_url(
        base_url: &str,
        api_key: Option<String>,
        playlist_id: Option<String>,
    ) -> YtResult<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            playlist_id: playlist_id.filter(|p| !p.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.playlist_id.is_some()
    }

    fn playlist_url(&self) -> YtResult<String> {
        let (Some(api_key), Some(playlist_id)) = (&self.api_key, &self.playlist_id) else {
            return Err(YtError::Config(
                "set YOUTUBE_API_KEY and YOUTUBE_PLAYLIST_ID".to_string(),
            ));
        };

        Ok(format!(
            "{}?part={}&playlistId={}&maxResults={}&key={}",
            self.base_url,
            urlencoding::encode("snippet,contentDetails"),
            urlencoding::encode(playlist_id),
            MAX_RESULTS,
            urlencoding::encode(api_key)
        ))
    }

    /// Videos in the configured playlist, in playlist order
    pub async fn playlist_videos(&self) -> YtResult<Vec<Video>> {
        let url = self.playlist_url()?;

        debug!("GET {}", self.base_url);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(YtError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body: PlaylistItemsResponse = response
            .json()
            .await
            .map_err(|e| YtError::ParseError(format!("Failed to parse playlist items: {}", e)))?;

        let videos: Vec<Video> = body
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(PlaylistItem::into_video)
            .collect();
        info!("Fetched {} playlist videos", videos.len());
        Ok(videos)
    }
}

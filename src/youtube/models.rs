use serde::{Deserialize, Serialize};

/// A video as shown on the videos page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub youtube_id: String,
    pub title: String,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub thumbnail_url: String,
}

impl Video {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.youtube_id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub maxres: Option<Thumbnail>,
    pub standard: Option<Thumbnail>,
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    pub default: Option<Thumbnail>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResourceId {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    pub title: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub resource_id: Option<ResourceId>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentDetails {
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlaylistItem {
    pub id: Option<String>,
    pub snippet: Option<Snippet>,
    pub content_details: Option<ContentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Option<Vec<PlaylistItem>>,
}

impl PlaylistItem {
    fn video_id(&self) -> Option<&str> {
        self.snippet
            .as_ref()
            .and_then(|s| s.resource_id.as_ref())
            .and_then(|r| r.video_id.as_deref())
            .or_else(|| {
                self.content_details
                    .as_ref()
                    .and_then(|c| c.video_id.as_deref())
            })
    }

    /// Largest available thumbnail
    fn best_thumbnail(&self) -> Option<&str> {
        let thumbnails = self.snippet.as_ref()?.thumbnails.as_ref()?;
        [
            &thumbnails.maxres,
            &thumbnails.standard,
            &thumbnails.high,
            &thumbnails.medium,
            &thumbnails.default,
        ]
        .into_iter()
        .find_map(|t| t.as_ref().and_then(|t| t.url.as_deref()))
    }

    /// Items without a resolvable video id are skipped
    pub fn into_video(self) -> Option<Video> {
        let youtube_id = self.video_id()?.to_string();
        let thumbnail_url = self
            .best_thumbnail()
            .map(str::to_string)
            .unwrap_or_else(|| format!("https://img.youtube.com/vi/{}/hqdefault.jpg", youtube_id));
        let snippet = self.snippet.unwrap_or_default();

        Some(Video {
            id: self.id.unwrap_or_else(|| youtube_id.clone()),
            youtube_id,
            title: snippet.title.unwrap_or_else(|| "Untitled video".to_string()),
            description: snippet.description,
            published_at: snippet.published_at,
            thumbnail_url,
        })
    }
}

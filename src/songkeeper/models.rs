use serde::{Deserialize, Deserializer, Serialize};

/// Numeric SongKeeper release identifier
pub type ReleaseId = u64;

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Streaming platform links for a release (each may be absent)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingLinks {
    pub spotify: Option<String>,
    pub apple_music: Option<String>,
    pub youtube: Option<String>,
    pub soundcloud: Option<String>,
    pub bandcamp: Option<String>,
}

impl StreamingLinks {
    /// Iterate over the platforms that have a non-empty link
    pub fn available(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("spotify", &self.spotify),
            ("appleMusic", &self.apple_music),
            ("youtube", &self.youtube),
            ("soundcloud", &self.soundcloud),
            ("bandcamp", &self.bandcamp),
        ]
        .into_iter()
        .filter_map(|(platform, url)| {
            url.as_deref()
                .filter(|u| !u.is_empty())
                .map(|u| (platform, u))
        })
    }
}

/// Track stub as listed on a release summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSummary {
    pub id: u64,
    pub track_number: u32,
    pub title: String,
    pub artist: String,
    /// Duration in milliseconds
    pub duration: Option<u64>,
    pub isrc: Option<String>,
}

/// One published release (single, EP, album)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSummary {
    pub id: ReleaseId,
    pub title: String,
    pub artist: String,
    #[serde(rename = "type")]
    pub release_type: String,
    pub release_date: Option<String>,
    pub upc: Option<String>,
    pub catalog_number: Option<String>,
    pub status: Option<String>,
    pub artwork_file_key: Option<String>,
    pub artwork_optimized_file_key: Option<String>,
    pub artwork_public_url: Option<String>,
    pub artwork_optimized_public_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streaming_links: StreamingLinks,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: Vec<TrackSummary>,
}

impl ReleaseSummary {
    /// Order tracks by track number
    pub fn normalize(&mut self) {
        self.tracks.sort_by_key(|t| t.track_number);
    }

    /// Best artwork URL, preferring the optimized rendition
    pub fn artwork_url(&self) -> Option<&str> {
        self.artwork_optimized_public_url
            .as_deref()
            .or(self.artwork_public_url.as_deref())
    }
}

/// A credit entry; all fields optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub name: Option<String>,
    pub role: Option<String>,
    pub contribution: Option<String>,
    pub percentage: Option<f64>,
}

/// A contributor is either a structured credit or a bare display string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contributor {
    Name(String),
    Detailed(Contribution),
}

impl Contributor {
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Contributor::Name(name) => Some(name.as_str()),
            Contributor::Detailed(c) => c.name.as_deref(),
        }
    }
}

/// Composition-level metadata for a track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub lyrics: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub songwriters: Vec<Contributor>,
    pub iswc: Option<String>,
    pub genre: Option<String>,
    pub language: Option<String>,
    pub work_type: Option<String>,
    pub copyright_year: Option<i32>,
    pub instrumental: Option<bool>,
}

/// Recording-level metadata for a track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    pub bpm: Option<f64>,
    pub key: Option<String>,
    pub time_signature: Option<String>,
    pub studio: Option<String>,
    pub recording_date: Option<String>,
    pub first_release_date: Option<String>,
    pub mastering_country: Option<String>,
    pub recording_country: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    pub explicit: Option<bool>,
    pub label: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub credits: Vec<Contributor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub master_owners: Vec<Contributor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub non_featured_performers: Vec<Contributor>,
}

/// Fully detailed track on a release detail record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDetail {
    pub id: u64,
    pub track_number: u32,
    pub title: String,
    pub artist: String,
    pub duration: Option<u64>,
    pub isrc: Option<String>,
    pub song: Option<Song>,
    pub recording: Option<Recording>,
}

/// Full release record fetched individually
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseDetail {
    pub id: ReleaseId,
    pub title: String,
    pub artist: String,
    #[serde(rename = "type")]
    pub release_type: String,
    pub release_date: Option<String>,
    pub upc: Option<String>,
    pub catalog_number: Option<String>,
    pub status: Option<String>,
    pub artwork_file_key: Option<String>,
    pub artwork_optimized_file_key: Option<String>,
    pub artwork_public_url: Option<String>,
    pub artwork_optimized_public_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streaming_links: StreamingLinks,
    pub distributor: Option<String>,
    pub distribution_date: Option<String>,
    pub release_label: Option<String>,
    pub version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub countries_of_first_release: Vec<String>,
    pub copyright_owner_country_of_nationality: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tracks: Vec<TrackDetail>,
}

impl ReleaseDetail {
    /// Order tracks by track number
    pub fn normalize(&mut self) {
        self.tracks.sort_by_key(|t| t.track_number);
    }
}

impl From<&TrackSummary> for TrackDetail {
    fn from(track: &TrackSummary) -> Self {
        Self {
            id: track.id,
            track_number: track.track_number,
            title: track.title.clone(),
            artist: track.artist.clone(),
            duration: track.duration,
            isrc: track.isrc.clone(),
            song: None,
            recording: None,
        }
    }
}

/// A detail record carrying only what the summary knows
impl From<&ReleaseSummary> for ReleaseDetail {
    fn from(summary: &ReleaseSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            artist: summary.artist.clone(),
            release_type: summary.release_type.clone(),
            release_date: summary.release_date.clone(),
            upc: summary.upc.clone(),
            catalog_number: summary.catalog_number.clone(),
            status: summary.status.clone(),
            artwork_file_key: summary.artwork_file_key.clone(),
            artwork_optimized_file_key: summary.artwork_optimized_file_key.clone(),
            artwork_public_url: summary.artwork_public_url.clone(),
            artwork_optimized_public_url: summary.artwork_optimized_public_url.clone(),
            streaming_links: summary.streaming_links.clone(),
            distributor: None,
            distribution_date: None,
            release_label: None,
            version: None,
            countries_of_first_release: Vec::new(),
            copyright_owner_country_of_nationality: None,
            tracks: summary.tracks.iter().map(TrackDetail::from).collect(),
        }
    }
}

/// Response wrapper for the release list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleasesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub releases: Vec<ReleaseSummary>,
}

/// Response wrapper for the release detail endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResponse {
    pub release: ReleaseDetail,
}

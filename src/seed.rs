//! Placeholder releases shown when the catalog service is unavailable.

use crate::songkeeper::models::{ReleaseId, ReleaseSummary, StreamingLinks, TrackSummary};

const SEED_ARTIST: &str = "Placeholder Artist";

fn artwork(shade: &str, label: &str) -> Option<String> {
    Some(format!(
        "https://placehold.co/400x400/{}/white?text={}",
        shade, label
    ))
}

fn link(url: &str) -> Option<String> {
    Some(url.to_string()).filter(|u| !u.is_empty())
}

fn track(id: u64, track_number: u32, title: &str, duration_ms: u64) -> TrackSummary {
    TrackSummary {
        id,
        track_number,
        title: title.to_string(),
        artist: SEED_ARTIST.to_string(),
        duration: Some(duration_ms),
        isrc: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn release(
    id: ReleaseId,
    title: &str,
    release_type: &str,
    release_date: &str,
    catalog_number: &str,
    shade: &str,
    streaming_links: StreamingLinks,
    tracks: Vec<TrackSummary>,
) -> ReleaseSummary {
    let label = match release_type {
        "ep" => "EP",
        "album" => "Album",
        _ => "Single",
    };
    ReleaseSummary {
        id,
        title: title.to_string(),
        artist: SEED_ARTIST.to_string(),
        release_type: release_type.to_string(),
        release_date: Some(release_date.to_string()),
        upc: None,
        catalog_number: Some(catalog_number.to_string()),
        status: Some("published".to_string()),
        artwork_file_key: artwork(shade, label),
        artwork_optimized_file_key: artwork(shade, label),
        artwork_public_url: artwork(shade, label),
        artwork_optimized_public_url: artwork(shade, label),
        streaming_links,
        tracks,
    }
}

/// Seed catalog, newest first
pub fn seed_releases() -> Vec<ReleaseSummary> {
    vec![
        release(
            2234234,
            "Latest Single",
            "single",
            "2024-01-01",
            "SEED-001",
            "1a1a1a",
            StreamingLinks {
                spotify: link("https://open.spotify.com"),
                apple_music: link("https://music.apple.com"),
                youtube: link("https://youtube.com"),
                soundcloud: None,
                bandcamp: None,
            },
            vec![track(1001, 1, "Latest Single", 210_000)],
        ),
        release(
            3453452,
            "Debut Album",
            "album",
            "2023-01-01",
            "SEED-002",
            "2a2a2a",
            StreamingLinks {
                spotify: link("https://open.spotify.com"),
                apple_music: link("https://music.apple.com"),
                ..StreamingLinks::default()
            },
            vec![
                track(2001, 1, "Opening Track", 180_000),
                track(2002, 2, "Second Song", 200_000),
                track(2003, 3, "Interlude", 90_000),
                track(2004, 4, "Best Track", 240_000),
            ],
        ),
        release(
            433,
            "Summer EP",
            "ep",
            "2023-06-01",
            "SEED-003",
            "3a3a3a",
            StreamingLinks {
                youtube: link("https://youtube.com"),
                ..StreamingLinks::default()
            },
            vec![
                track(3001, 1, "Summer Vibes", 195_000),
                track(3002, 2, "Beach Day", 210_000),
                track(3003, 3, "Sunset Drive", 220_000),
            ],
        ),
    ]
}

/// Seed release with the given id, if any
pub fn seed_release(id: ReleaseId) -> Option<ReleaseSummary> {
    seed_releases().into_iter().find(|r| r.id == id)
}

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use musicsite::site::tour;
use musicsite::{Catalog, Config, YouTubeClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    info!("Loading release catalog...");
    let catalog = Catalog::from_config(&config)?;
    let releases = catalog.releases().await?;
    info!("{} releases available", releases.len());
    for release in &releases {
        info!(
            "  [{}] {} - {} ({}, {} tracks)",
            release.id,
            release.artist,
            release.title,
            release.release_type,
            release.tracks.len()
        );
    }

    let youtube = YouTubeClient::new(
        config.youtube_api_key.clone(),
        config.youtube_playlist_id.clone(),
    )?;
    if youtube.is_configured() {
        match youtube.playlist_videos().await {
            Ok(videos) => info!("{} videos in playlist", videos.len()),
            Err(e) => warn!("Videos unavailable: {}", e),
        }
    } else {
        info!("YouTube playlist not configured, skipping videos");
    }

    if let Some(path) = &config.tour_dates_path {
        let dates = tour::load_tour_dates(path)?;
        let today = chrono::Local::now().date_naive();
        info!(
            "{} upcoming and {} past tour dates",
            tour::upcoming(&dates, today).len(),
            tour::past(&dates, today).len()
        );
    }

    Ok(())
}

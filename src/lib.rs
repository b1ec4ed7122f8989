//! Data layer for an artist portfolio site: a cached SongKeeper release
//! catalog, the YouTube video playlist, and contact form handling.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod seed;
pub mod site;
pub mod songkeeper;
pub mod youtube;

pub use cache::ReleaseCache;
pub use catalog::Catalog;
pub use config::Config;
pub use songkeeper::{SkError, SkResult, SongKeeperClient};
pub use youtube::{YouTubeClient, YtError, YtResult};

mod client;
mod error;
pub mod models;

pub use client::{normalize_base_url, ReleaseSource, SongKeeperClient};
pub use error::{SkError, SkResult};

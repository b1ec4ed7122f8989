mod client;
mod error;
pub mod models;

pub use client::YouTubeClient;
pub use error::{YtError, YtResult};

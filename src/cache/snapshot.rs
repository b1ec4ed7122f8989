use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::songkeeper::models::ReleaseSummary;

/// Last known-good release list as written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub saved_at: DateTime<Utc>,
    pub releases: Vec<ReleaseSummary>,
}

/// JSON file holding the most recent release list
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot; `Ok(None)` when no file has been written yet
    pub async fn load(&self) -> io::Result<Option<Snapshot>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let snapshot = serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(snapshot))
    }

    /// Replace the snapshot via a temp file and rename
    pub async fn save(&self, releases: &[ReleaseSummary], saved_at: DateTime<Utc>) -> io::Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).await?;
        }

        let snapshot = Snapshot {
            saved_at,
            releases: releases.to_vec(),
        };
        let content = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!(
            "Saved {} releases to snapshot {}",
            releases.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(id: u64) -> ReleaseSummary {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Release {}", id),
            "artist": "Luke Roes",
            "type": "single"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("releases.json"));
        let loaded = tokio_test::assert_ok!(store.load().await);
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("nested").join("releases.json"));
        let saved_at = Utc::now();

        store.save(&[release(1), release(2)], saved_at).await.unwrap();

        let snapshot = store.load().await.unwrap().unwrap();
        assert_eq!(snapshot.saved_at, saved_at);
        assert_eq!(snapshot.releases, vec![release(1), release(2)]);
        assert!(!dir.path().join("nested").join("releases.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("releases.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = SnapshotStore::new(path).load().await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}

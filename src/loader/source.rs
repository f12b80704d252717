//! Data sources for raw export records.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::AppError;

/// Somewhere raw export records can be fetched from.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the team manifest.
    async fn fetch_team(&self) -> Result<Value, AppError>;

    /// Fetch the raw record of one channel.
    async fn fetch_channel(&self, id: &str) -> Result<Value, AppError>;

    /// Fetch the raw record of one user.
    async fn fetch_user(&self, id: &str) -> Result<Value, AppError>;
}

/// Export directory on disk.
///
/// Layout: `team.json`, `channels/<id>.json` and `users/<id>.json`.
#[derive(Debug, Clone)]
pub struct FsDataSource {
    root: PathBuf,
}

impl FsDataSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, kind: &str, id: &str) -> Result<PathBuf, AppError> {
        let mut components = Path::new(id).components();
        let single_file_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(name)), None) if name == OsStr::new(id)
        );
        if !single_file_name || id.contains('\\') {
            return Err(AppError::Load(format!("Invalid {} id '{}'", kind, id)));
        }
        Ok(self.root.join(format!("{}s", kind)).join(format!("{}.json", id)))
    }

    async fn read_json(&self, path: &Path, what: &str) -> Result<Value, AppError> {
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            AppError::Load(format!("Failed to read {} at {}: {}", what, path.display(), e))
        })?;

        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::MalformedRecord(format!("{} at {} is not valid JSON: {}", what, path.display(), e))
        })
    }
}

#[async_trait]
impl DataSource for FsDataSource {
    async fn fetch_team(&self) -> Result<Value, AppError> {
        let path = self.root.join("team.json");
        self.read_json(&path, "team manifest").await
    }

    async fn fetch_channel(&self, id: &str) -> Result<Value, AppError> {
        let path = self.record_path("channel", id)?;
        self.read_json(&path, &format!("channel {}", id)).await
    }

    async fn fetch_user(&self, id: &str) -> Result<Value, AppError> {
        let path = self.record_path("user", id)?;
        self.read_json(&path, &format!("user {}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_records_from_layout() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("channels")).unwrap();
        std::fs::write(dir.path().join("team.json"), r#"{"channels":["general"],"users":[]}"#)
            .unwrap();
        std::fs::write(
            dir.path().join("channels/general.json"),
            r#"{"id":"general","name":"general"}"#,
        )
        .unwrap();

        let source = FsDataSource::new(dir.path());
        let team = source.fetch_team().await.unwrap();
        assert_eq!(team["channels"][0], "general");

        let channel = source.fetch_channel("general").await.unwrap();
        assert_eq!(channel["name"], "general");
    }

    #[tokio::test]
    async fn test_missing_record_is_load_error() {
        let dir = TempDir::new().unwrap();
        let source = FsDataSource::new(dir.path());

        let err = source.fetch_user("U404").await.unwrap_err();
        assert!(matches!(err, AppError::Load(_)));
        assert!(err.message().contains("user U404"));
    }

    #[tokio::test]
    async fn test_invalid_json_is_malformed() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("users")).unwrap();
        std::fs::write(dir.path().join("users/U1.json"), "{ not json").unwrap();

        let source = FsDataSource::new(dir.path());
        let err = source.fetch_user("U1").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedRecord(_)));
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let dir = TempDir::new().unwrap();
        let source = FsDataSource::new(dir.path());

        for id in ["", ".", "..", "../team", "nested/general", "/general", "general/", "a\\b"] {
            let err = source.fetch_channel(id).await.unwrap_err();
            assert!(matches!(err, AppError::Load(_)), "id {:?}", id);
            assert!(err.message().starts_with("Invalid channel id"), "id {:?}", id);
        }
    }

    #[tokio::test]
    async fn test_accepts_dotted_ids() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("channels")).unwrap();
        std::fs::write(
            dir.path().join("channels/release..notes.json"),
            r#"{"id":"release..notes"}"#,
        )
        .unwrap();

        let source = FsDataSource::new(dir.path());
        let channel = source.fetch_channel("release..notes").await.unwrap();
        assert_eq!(channel["id"], "release..notes");
    }
}

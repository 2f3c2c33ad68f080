use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Reads and writes one JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonRepository {
    path: PathBuf,
}

impl JsonRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the document. A missing file is `StoreError::NotFound`.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => StoreError::NotFound(self.path.clone()),
                _ => StoreError::Io {
                    path: self.path.clone(),
                    source,
                },
            })?;

        serde_json::from_str(&raw).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Serializes `value` as pretty-printed JSON.
    ///
    /// The document is written to a sibling temp file and renamed into place, so readers
    /// never observe a half-written file.
    pub async fn save<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), StoreError> {
        let body = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(parent, source))?;
        }

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, body)
            .await
            .map_err(|source| self.io_error(&tmp, source))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(&self.path, source))?;

        tracing::debug!(path = %self.path.display(), "Saved JSON document.");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn save_then_load_returns_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRepository::new(dir.path().join("nested").join("out.json"));

        let mut doc = BTreeMap::new();
        doc.insert("AAPL".to_string(), 1_u32);
        repo.save(&doc).await.unwrap();

        let loaded: BTreeMap<String, u32> = repo.load().await.unwrap();
        assert_eq!(loaded, doc);
        assert!(!dir.path().join("nested").join("out.json.tmp").exists());
    }

    #[tokio::test]
    async fn saved_json_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRepository::new(dir.path().join("out.json"));
        repo.save(&vec![1, 2]).await.unwrap();

        let raw = tokio::fs::read_to_string(repo.path()).await.unwrap();
        assert!(raw.contains('\n'));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonRepository::new(dir.path().join("absent.json"));
        let err = repo.load::<Vec<u32>>().await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}

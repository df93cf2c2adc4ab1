//! Upload directory file store
//!
//! Files are written to a hidden temp name and renamed into place, so a
//! reader never sees a partial file under the final name.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::domain::repository::FileStore;
use crate::error::{SettingsError, SettingsResult};

/// [`FileStore`] rooted at a local directory
#[derive(Debug, Clone)]
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it does not exist yet
    pub async fn ensure_root(&self) -> SettingsResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, filename: &str) -> SettingsResult<PathBuf> {
        let mut components = Path::new(filename).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(filename)),
            _ => Err(SettingsError::InvalidArgument(format!(
                "Invalid filename: {filename}"
            ))),
        }
    }
}

impl FileStore for DiskFileStore {
    async fn write(&self, filename: &str, bytes: &[u8]) -> SettingsResult<()> {
        let path = self.path_for(filename)?;
        let tmp_path = self.root.join(format!(".{filename}.tmp"));

        if let Err(e) = tokio::fs::write(&tmp_path, bytes).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&tmp_path, &path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        tracing::debug!(path = %path.display(), size = bytes.len(), "File written");
        Ok(())
    }

    async fn remove(&self, filename: &str) -> SettingsResult<()> {
        let path = self.path_for(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, filename: &str) -> SettingsResult<bool> {
        let path = self.path_for(filename)?;
        Ok(tokio::fs::try_exists(&path).await?)
    }
}

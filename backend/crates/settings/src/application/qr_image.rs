//! QR Image Use Case
//!
//! Replacement order is write-new, commit-record, delete-old. A failed
//! write leaves the old file and record alone; a failed commit removes the
//! file that was just written.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::SettingId;
use kernel::retry::retry_idempotent;

use crate::application::config::SettingsConfig;
use crate::domain::entities::QrImage;
use crate::domain::repository::{FileStore, QrImageRepository};
use crate::domain::value_objects::QrUpload;
use crate::error::{SettingsError, SettingsResult};

/// Result of GET /api/qr-image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImageStatus {
    pub image: Option<QrImage>,
}

impl QrImageStatus {
    pub fn exists(&self) -> bool {
        self.image.is_some()
    }
}

pub struct QrImageUseCase<R, F>
where
    R: QrImageRepository,
    F: FileStore,
{
    repo: Arc<R>,
    files: Arc<F>,
    config: Arc<SettingsConfig>,
}

impl<R, F> QrImageUseCase<R, F>
where
    R: QrImageRepository,
    F: FileStore,
{
    pub fn new(repo: Arc<R>, files: Arc<F>, config: Arc<SettingsConfig>) -> Self {
        Self {
            repo,
            files,
            config,
        }
    }

    pub async fn get(&self) -> SettingsResult<QrImageStatus> {
        let image = retry_idempotent(self.config.read_retry, SettingsError::is_transient, || {
            self.config.bounded(self.repo.get_qr_image())
        })
        .await?;

        Ok(QrImageStatus { image })
    }

    pub async fn replace(&self, upload: QrUpload) -> SettingsResult<QrImage> {
        let id = SettingId::new();
        let created_at = Utc::now();
        let filename = upload.filename(&id, created_at);

        self.files.write(&filename, &upload.bytes).await?;

        let image = QrImage {
            id,
            filepath: self.config.public_path(&filename),
            filename,
            mimetype: upload.mime_type,
            size: upload.bytes.len() as i64,
            created_at,
        };

        let previous = match self.config.bounded(self.repo.replace_qr_image(&image)).await {
            Ok(previous) => previous,
            Err(e) => {
                self.discard_uncommitted(&image).await;
                return Err(e);
            }
        };

        if let Some(previous) = previous.filter(|p| p.filename != image.filename) {
            // 古いファイルの削除失敗はリクエストを失敗させない
            if let Err(e) = self.files.remove(&previous.filename).await {
                tracing::warn!(
                    filename = %previous.filename,
                    error = %e,
                    "Failed to delete previous QR image"
                );
            }
        }

        tracing::info!(
            filename = %image.filename,
            size = image.size,
            mimetype = %image.mimetype,
            "QR image replaced"
        );

        Ok(image)
    }

    /// Remove the freshly written file unless the record ended up pointing
    /// at it anyway (a commit that succeeded but reported a timeout).
    async fn discard_uncommitted(&self, image: &QrImage) {
        if let Ok(Ok(Some(current))) = tokio::time::timeout(
            self.config.store_timeout,
            self.repo.get_qr_image(),
        )
        .await
        {
            if current.filename == image.filename {
                tracing::warn!(
                    filename = %image.filename,
                    "QR image commit reported failure but the record is in place"
                );
                return;
            }
        }

        if let Err(e) = self.files.remove(&image.filename).await {
            tracing::warn!(
                filename = %image.filename,
                error = %e,
                "Failed to remove uncommitted QR image"
            );
        }
    }
}

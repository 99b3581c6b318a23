//! Media field uploads for record screens

use std::collections::BTreeMap;

use tokio::sync::RwLock;

use cms_forms_provider::{UploadFile, UploadKind};

use crate::error::{CoreError, CoreResult};
use crate::services::{media_kind, FormLifecycle, RecordKind, ServiceContext};
use crate::types::{FieldPath, UploadStatus};

const UPLOAD_FALLBACK: &str = "Upload failed";

/// Result of one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The file is stored and its URL was written into the field.
    Uploaded(String),
    /// Storage refused the file; the field keeps its value.
    Failed(String),
    /// The screen was unmounted, or the form reloaded, before storage answered.
    Abandoned,
}

/// Per-field upload state plus the last upload alert.
///
/// Independent of the submission status: uploads never block or fail a submit.
#[derive(Default)]
pub(crate) struct MediaUploads {
    statuses: RwLock<BTreeMap<FieldPath, UploadStatus>>,
    alert: RwLock<Option<String>>,
}

impl MediaUploads {
    pub(crate) async fn status(&self, path: &FieldPath) -> UploadStatus {
        self.statuses
            .read()
            .await
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) async fn alert(&self) -> Option<String> {
        self.alert.read().await.clone()
    }

    pub(crate) async fn dismiss_alert(&self) {
        *self.alert.write().await = None;
    }

    pub(crate) async fn clear(&self) {
        self.statuses.write().await.clear();
        *self.alert.write().await = None;
    }

    async fn set_status(&self, path: &FieldPath, status: UploadStatus) {
        self.statuses.write().await.insert(path.clone(), status);
    }

    /// Upload `file` and write the resulting URL into `path`.
    ///
    /// The storage call runs without any lock held, so several fields can
    /// upload at once and the form stays editable and submittable meanwhile.
    /// A result arriving after the form was reset belongs to the old values
    /// and is dropped.
    pub(crate) async fn upload<R: RecordKind>(
        &self,
        ctx: &ServiceContext,
        form: &FormLifecycle<R>,
        path: FieldPath,
        file: &UploadFile,
        kind: UploadKind,
    ) -> CoreResult<UploadOutcome> {
        if media_kind(&path).is_none() {
            return Err(CoreError::UnknownField(path.to_string()));
        }

        let generation = form.generation().await;
        self.set_status(&path, UploadStatus::Uploading).await;
        log::debug!(
            "Uploading {} ({kind}, {} bytes) for {path}",
            file.file_name,
            file.bytes.len()
        );

        let result = ctx.storage.upload(file, kind, R::UPLOAD_FOLDER).await;

        if !form.is_mounted() {
            log::debug!("Dropping upload result for unmounted screen ({path})");
            return Ok(UploadOutcome::Abandoned);
        }
        if form.generation().await != generation {
            log::debug!("Dropping upload result for replaced form values ({path})");
            return Ok(UploadOutcome::Abandoned);
        }

        match result {
            Ok(url) => {
                // 上传结果覆盖手动输入
                let written = form
                    .update_if_current(generation, |record| {
                        record.set_media_url(&path, url.clone())
                    })
                    .await;
                match written {
                    Some(res) => res?,
                    None => {
                        log::debug!("Dropping upload result for replaced form values ({path})");
                        return Ok(UploadOutcome::Abandoned);
                    }
                }
                self.set_status(&path, UploadStatus::Idle).await;
                log::info!("Uploaded {} to {url}", file.file_name);
                Ok(UploadOutcome::Uploaded(url))
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Upload for {path} failed: {e}");
                } else {
                    log::error!("Upload for {path} failed: {e}");
                }
                let message = e.user_message(UPLOAD_FALLBACK);
                self.set_status(&path, UploadStatus::Failed(message.clone()))
                    .await;
                *self.alert.write().await = Some(format!("{UPLOAD_FALLBACK}: {message}"));
                Ok(UploadOutcome::Failed(message))
            }
        }
    }
}

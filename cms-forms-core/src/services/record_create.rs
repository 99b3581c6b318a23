//! Record create screens (blogs, SEO banners)

use std::sync::Arc;

use cms_forms_provider::{UploadFile, UploadKind};

use crate::error::{CoreError, CoreResult};
use crate::services::media::{MediaUploads, UploadOutcome};
use crate::services::record_kind::row_id;
use crate::services::{FormLifecycle, RecordKind, ServiceContext, SubmitOutcome};
use crate::types::{BlogRecord, FieldPath, Notice, NoticeAction, SeoBannerRecord, UploadStatus};

pub type BlogCreateScreen = RecordCreateScreen<BlogRecord>;
pub type SeoBannerCreateScreen = RecordCreateScreen<SeoBannerRecord>;

/// Blank form that inserts a new record.
pub struct RecordCreateScreen<R: RecordKind> {
    ctx: Arc<ServiceContext>,
    form: FormLifecycle<R>,
    uploads: MediaUploads,
}

impl<R: RecordKind> RecordCreateScreen<R> {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            form: FormLifecycle::new(R::default()),
            uploads: MediaUploads::default(),
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormLifecycle<R> {
        &self.form
    }

    /// Insert the record. Completes with the new row id when the server returns one.
    pub async fn submit(&self) -> SubmitOutcome<Option<String>> {
        let data = Arc::clone(&self.ctx.data);
        let fallback = format!("Failed to create {}.", R::LABEL.to_lowercase());

        self.form
            .submit_with(
                &fallback,
                move |values| async move {
                    let payload = values.to_payload()?;
                    let rows = data.insert(R::COLLECTION, &payload).await?;
                    let id = rows.first().and_then(row_id);
                    log::info!("Created {} record {:?}", R::COLLECTION, id);
                    Ok::<_, CoreError>(id)
                },
                |_| {
                    Notice::success(format!("{} created successfully!", R::LABEL))
                        .with_action(NoticeAction::ViewList(R::LIST_PATH.to_string()))
                        .with_action(NoticeAction::CreateAnother)
                },
            )
            .await
    }

    /// "Create another" banner action: blank form, `Idle` status.
    pub async fn create_another(&self) {
        self.form.reset(R::default()).await;
        self.uploads.clear().await;
    }

    /// "View list" banner action.
    pub fn view_list(&self) {
        self.ctx.navigator.push(R::LIST_PATH);
    }

    /// Upload a media file into `path` (`seo.openGraph.image` or `banner.videoUrl`).
    pub async fn upload_file(
        &self,
        path: impl Into<FieldPath>,
        file: &UploadFile,
        kind: UploadKind,
    ) -> CoreResult<UploadOutcome> {
        self.uploads
            .upload(&self.ctx, &self.form, path.into(), file, kind)
            .await
    }

    pub async fn upload_status(&self, path: impl Into<FieldPath>) -> UploadStatus {
        self.uploads.status(&path.into()).await
    }

    /// Text of the last failed upload, shown as an alert.
    pub async fn upload_alert(&self) -> Option<String> {
        self.uploads.alert().await
    }

    pub async fn dismiss_upload_alert(&self) {
        self.uploads.dismiss_alert().await;
    }

    pub fn unmount(&self) {
        self.form.unmount();
    }
}

impl RecordCreateScreen<BlogRecord> {
    pub async fn append_paragraph(&self) {
        self.form.update(|b| b.content.description.append()).await;
    }

    /// Returns `false` when the paragraph could not be removed (last entry or bad index).
    pub async fn remove_paragraph(&self, index: usize) -> bool {
        self.form.update(|b| b.content.description.remove(index)).await
    }

    pub async fn append_tag(&self) {
        self.form.update(|b| b.content.tags.append()).await;
    }

    pub async fn remove_tag(&self, index: usize) -> bool {
        self.form.update(|b| b.content.tags.remove(index)).await
    }

    pub async fn append_link(&self) {
        self.form.update(|b| b.content.urls.append()).await;
    }

    pub async fn remove_link(&self, index: usize) -> bool {
        self.form.update(|b| b.content.urls.remove(index)).await
    }
}

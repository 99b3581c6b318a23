//! Record update screens (blogs, SEO banners)
//!
//! The record is fetched by id when the screen mounts and again whenever the id
//! changes. The form is only rendered once a fetch has succeeded; a response
//! that belongs to a superseded id is dropped.
//!
//! The id cannot change while a save is in flight. Uploads started for the
//! previous id are dropped once the new record is hydrated.

use std::sync::Arc;

use tokio::sync::RwLock;

use cms_forms_provider::{UploadFile, UploadKind};

use crate::error::{CoreError, CoreResult};
use crate::services::media::{MediaUploads, UploadOutcome};
use crate::services::{FormLifecycle, FormView, RecordKind, ServiceContext, SubmitOutcome};
use crate::types::{
    BlogRecord, FetchStatus, FieldPath, Notice, NoticeAction, SeoBannerRecord, UploadStatus,
};

/// Key column used to fetch and update records.
const ID_FIELD: &str = "id";

pub type BlogUpdateScreen = RecordUpdateScreen<BlogRecord>;
pub type SeoBannerUpdateScreen = RecordUpdateScreen<SeoBannerRecord>;

struct FetchState {
    identifier: Option<String>,
    /// Bumped for every fetch; only the latest may hydrate.
    generation: u64,
    status: FetchStatus,
}

/// Edit form for an existing record.
pub struct RecordUpdateScreen<R: RecordKind> {
    ctx: Arc<ServiceContext>,
    fetch: RwLock<FetchState>,
    form: FormLifecycle<R>,
    uploads: MediaUploads,
}

impl<R: RecordKind> RecordUpdateScreen<R> {
    /// Screen without an id yet (`Fetching`, no form).
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            fetch: RwLock::new(FetchState {
                identifier: None,
                generation: 0,
                status: FetchStatus::Fetching,
            }),
            form: FormLifecycle::new(R::default()),
            uploads: MediaUploads::default(),
        }
    }

    /// Create the screen and fetch record `id`.
    pub async fn mount(ctx: Arc<ServiceContext>, id: &str) -> Self {
        let screen = Self::new(ctx);
        screen.load(id).await;
        screen
    }

    /// Switch to record `id`. Re-fetches only when the id differs from the current one.
    pub async fn set_identifier(&self, id: &str) -> FetchStatus {
        {
            let fetch = self.fetch.read().await;
            if fetch.identifier.as_deref() == Some(id) {
                return fetch.status.clone();
            }
        }
        self.load(id).await
    }

    /// Fetch record `id` and hydrate the form from it.
    ///
    /// Refused while a save is in flight: the current id and status are kept.
    pub async fn load(&self, id: &str) -> FetchStatus {
        let generation = {
            let mut fetch = self.fetch.write().await;
            if self.form.status().await.is_submitting() {
                log::warn!(
                    "Not switching {} record to {id}: a save is in flight",
                    R::COLLECTION
                );
                return fetch.status.clone();
            }
            fetch.identifier = Some(id.to_string());
            fetch.generation += 1;
            fetch.status = FetchStatus::Fetching;
            fetch.generation
        };
        log::debug!("Fetching {} record {id}", R::COLLECTION);

        let result = self
            .ctx
            .data
            .select_single(R::COLLECTION, "*", ID_FIELD, id)
            .await
            .map_err(CoreError::from)
            .and_then(R::hydrate);

        let mut fetch = self.fetch.write().await;
        if fetch.generation != generation {
            log::debug!("Discarding stale {} fetch for {id}", R::COLLECTION);
            return fetch.status.clone();
        }
        if !self.form.is_mounted() {
            log::debug!("Discarding {} fetch for unmounted screen", R::COLLECTION);
            return fetch.status.clone();
        }

        match result {
            Ok(record) => {
                self.form.reset(record).await;
                self.uploads.clear().await;
                fetch.status = FetchStatus::Ready;
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Failed to load {} {id}: {e}", R::COLLECTION);
                } else {
                    log::error!("Failed to load {} {id}: {e}", R::COLLECTION);
                }
                let message = e.user_message(&format!("Failed to load {}.", R::LABEL.to_lowercase()));
                self.form.set_notice(Notice::error(message.clone())).await;
                fetch.status = FetchStatus::FetchFailed(message);
            }
        }
        fetch.status.clone()
    }

    pub async fn fetch_status(&self) -> FetchStatus {
        self.fetch.read().await.status.clone()
    }

    pub async fn identifier(&self) -> Option<String> {
        self.fetch.read().await.identifier.clone()
    }

    async fn ready_identifier(&self) -> CoreResult<String> {
        let fetch = self.fetch.read().await;
        match (&fetch.status, &fetch.identifier) {
            (FetchStatus::Ready, Some(id)) => Ok(id.clone()),
            _ => Err(CoreError::NotReady),
        }
    }

    /// Read-only form state (status, notices, errors). Also usable before the
    /// record is ready. Edits go through [`Self::update`].
    #[must_use]
    pub fn form(&self) -> FormView<'_, R> {
        self.form.view()
    }

    /// Rendered form values; `None` until a fetch succeeded.
    pub async fn values(&self) -> Option<R> {
        if self.ready_identifier().await.is_err() {
            return None;
        }
        Some(self.form.values().await)
    }

    /// Apply a user edit. Fails with `NotReady` while the form is not rendered.
    pub async fn update<T>(&self, edit: impl FnOnce(&mut R) -> T) -> CoreResult<T> {
        self.ready_identifier().await?;
        Ok(self.form.update(edit).await)
    }

    /// Mark a field as touched. Fails with `NotReady` while the form is not rendered.
    pub async fn touch(&self, path: impl Into<FieldPath>) -> CoreResult<()> {
        self.ready_identifier().await?;
        self.form.touch(path).await;
        Ok(())
    }

    /// Save the edited record. The submitted values stay in the form.
    pub async fn submit(&self) -> CoreResult<SubmitOutcome<()>> {
        let id = self.ready_identifier().await?;
        let data = Arc::clone(&self.ctx.data);
        let fallback = format!("Failed to update {}.", R::LABEL.to_lowercase());

        let outcome = self
            .form
            .submit_with(
                &fallback,
                move |values| async move {
                    let payload = values.to_payload()?;
                    data.update(R::COLLECTION, ID_FIELD, &id, &payload).await?;
                    log::info!("Updated {} record {id}", R::COLLECTION);
                    Ok::<_, CoreError>(())
                },
                |()| {
                    Notice::success(format!("{} updated successfully!", R::LABEL))
                        .with_action(NoticeAction::ViewList(R::LIST_PATH.to_string()))
                },
            )
            .await;
        Ok(outcome)
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
        self.ready_identifier().await?;
        self.uploads
            .upload(&self.ctx, &self.form, path.into(), file, kind)
            .await
    }

    pub async fn upload_status(&self, path: impl Into<FieldPath>) -> UploadStatus {
        self.uploads.status(&path.into()).await
    }

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

impl RecordUpdateScreen<BlogRecord> {
    pub async fn append_paragraph(&self) -> CoreResult<()> {
        self.update(|b| b.content.description.append()).await
    }

    pub async fn remove_paragraph(&self, index: usize) -> CoreResult<bool> {
        self.update(|b| b.content.description.remove(index)).await
    }

    pub async fn append_tag(&self) -> CoreResult<()> {
        self.update(|b| b.content.tags.append()).await
    }

    pub async fn remove_tag(&self, index: usize) -> CoreResult<bool> {
        self.update(|b| b.content.tags.remove(index)).await
    }

    pub async fn append_link(&self) -> CoreResult<()> {
        self.update(|b| b.content.urls.append()).await
    }

    pub async fn remove_link(&self, index: usize) -> CoreResult<bool> {
        self.update(|b| b.content.urls.remove(index)).await
    }
}

//! Generic form life cycle
//!
//! Every screen is a [`FormLifecycle`] over its own value type plus the remote
//! call it makes on submit. The life cycle owns the values, the validation
//! result, which fields were touched, the submission status and the request-level
//! notice.
//!
//! Locks are never held while a remote call is awaited, so uploads, edits and
//! status reads proceed while a submit is in flight.

use std::collections::BTreeSet;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::{FieldErrors, FieldPath, Notice, SubmissionStatus};

/// Form values with a validation schema.
pub trait FormSchema: Clone + Send + Sync + 'static {
    /// Validate all fields. An empty map means the values may be submitted.
    fn validate(&self) -> FieldErrors;
}

/// Whether the owning screen is still displayed.
///
/// Shared with background work (scheduled navigation, in-flight requests) so a
/// late completion after the screen went away changes nothing.
#[derive(Debug, Clone)]
pub struct MountState(Arc<AtomicBool>);

impl MountState {
    #[must_use]
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for MountState {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<T> {
    /// The remote call succeeded.
    Completed(T),
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// A submit was already in flight; nothing was sent.
    Busy,
    /// The remote call failed with this user-facing message.
    Failed(String),
    /// The screen was unmounted, or its values replaced, before the response
    /// arrived; the response was dropped.
    Abandoned,
}

impl<T> SubmitOutcome<T> {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SubmitOutcome<U> {
        match self {
            Self::Completed(v) => SubmitOutcome::Completed(f(v)),
            Self::Invalid(e) => SubmitOutcome::Invalid(e),
            Self::Busy => SubmitOutcome::Busy,
            Self::Failed(m) => SubmitOutcome::Failed(m),
            Self::Abandoned => SubmitOutcome::Abandoned,
        }
    }
}

#[derive(Debug)]
struct FormState<F> {
    values: F,
    errors: FieldErrors,
    touched: BTreeSet<FieldPath>,
    submit_attempted: bool,
    status: SubmissionStatus,
    notice: Option<Notice>,
    /// Bumped by every reset. Work started under an older generation is stale.
    generation: u64,
}

impl<F: FormSchema> FormState<F> {
    fn fresh(values: F, generation: u64) -> Self {
        Self {
            values,
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
            submit_attempted: false,
            status: SubmissionStatus::Idle,
            notice: None,
            generation,
        }
    }
}

/// Form controller shared by all screens.
pub struct FormLifecycle<F: FormSchema> {
    state: RwLock<FormState<F>>,
    mount: MountState,
}

impl<F: FormSchema> FormLifecycle<F> {
    #[must_use]
    pub fn new(values: F) -> Self {
        Self {
            state: RwLock::new(FormState::fresh(values, 0)),
            mount: MountState::new(),
        }
    }

    // ===== Values =====

    /// Current values (snapshot).
    pub async fn values(&self) -> F {
        self.state.read().await.values.clone()
    }

    /// Apply a user edit and re-run validation.
    pub async fn update<R>(&self, edit: impl FnOnce(&mut F) -> R) -> R {
        let mut state = self.state.write().await;
        let result = edit(&mut state.values);
        state.errors = state.values.validate();
        result
    }

    /// Mark a field as touched (blur) and re-run validation.
    pub async fn touch(&self, path: impl Into<FieldPath>) {
        let mut state = self.state.write().await;
        state.touched.insert(path.into());
        state.errors = state.values.validate();
    }

    /// Apply an edit only if no reset happened since `generation` was read.
    pub async fn update_if_current<R>(
        &self,
        generation: u64,
        edit: impl FnOnce(&mut F) -> R,
    ) -> Option<R> {
        let mut state = self.state.write().await;
        if state.generation != generation {
            return None;
        }
        let result = edit(&mut state.values);
        state.errors = state.values.validate();
        Some(result)
    }

    /// Replace all values and return to a pristine `Idle` form.
    ///
    /// Responses to requests started before the reset are dropped.
    pub async fn reset(&self, values: F) {
        let mut state = self.state.write().await;
        let next = state.generation + 1;
        *state = FormState::fresh(values, next);
    }

    /// Counter identifying the current set of values; changes on every reset.
    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    // ===== Validation =====

    /// Result of the latest validation pass (every field).
    pub async fn errors(&self) -> FieldErrors {
        self.state.read().await.errors.clone()
    }

    /// Errors to show inline: touched fields only, or all of them after a submit attempt.
    pub async fn visible_errors(&self) -> FieldErrors {
        let state = self.state.read().await;
        if state.submit_attempted {
            return state.errors.clone();
        }
        state
            .errors
            .filtered(|path| state.touched.iter().any(|t| path.is_within(t)))
    }

    // ===== Status =====

    pub async fn status(&self) -> SubmissionStatus {
        self.state.read().await.status.clone()
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.state.read().await.notice.clone()
    }

    pub async fn set_notice(&self, notice: Notice) {
        self.state.write().await.notice = Some(notice);
    }

    pub async fn dismiss_notice(&self) {
        self.state.write().await.notice = None;
    }

    /// Read-only handle for callers that must not edit the values directly.
    #[must_use]
    pub fn view(&self) -> FormView<'_, F> {
        FormView(self)
    }

    // ===== Mounting =====

    #[must_use]
    pub fn mount_state(&self) -> MountState {
        self.mount.clone()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mount.is_mounted()
    }

    /// The screen went away; later responses are ignored.
    pub fn unmount(&self) {
        self.mount.unmount();
    }

    // ===== Submit =====

    /// Validate and run `op` with a snapshot of the values.
    ///
    /// Process: reject while `Submitting` → validate (reject on errors) →
    /// `Submitting` → await `op` → `Succeeded` with `on_success` notice, or
    /// `Failed` with an error notice whose text is the remote message or `fallback`.
    pub async fn submit_with<T, Op, Fut>(
        &self,
        fallback: &str,
        op: Op,
        on_success: impl FnOnce(&T) -> Notice,
    ) -> SubmitOutcome<T>
    where
        Op: FnOnce(F) -> Fut,
        Fut: Future<Output = CoreResult<T>>,
    {
        // 1. Guard and validate
        let (values, generation) = {
            let mut state = self.state.write().await;
            if state.status.is_submitting() {
                log::debug!("Submit ignored: a request is already in flight");
                return SubmitOutcome::Busy;
            }
            state.submit_attempted = true;
            state.errors = state.values.validate();
            if !state.errors.is_empty() {
                log::debug!("Submit blocked by {} field error(s)", state.errors.len());
                return SubmitOutcome::Invalid(state.errors.clone());
            }
            state.status = SubmissionStatus::Submitting;
            state.notice = None;
            (state.values.clone(), state.generation)
        };

        // 2. Remote call (no lock held)
        let result = op(values).await;

        // 3. Apply the response unless the screen is gone
        if !self.mount.is_mounted() {
            log::debug!("Dropping submit response for unmounted screen");
            return SubmitOutcome::Abandoned;
        }

        let mut state = self.state.write().await;
        if state.generation != generation {
            log::debug!("Dropping submit response for values that were replaced");
            return SubmitOutcome::Abandoned;
        }
        match result {
            Ok(value) => {
                state.status = SubmissionStatus::Succeeded;
                state.notice = Some(on_success(&value));
                SubmitOutcome::Completed(value)
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Submit failed: {e}");
                } else {
                    log::error!("Submit failed: {e}");
                }
                let message = e.user_message(fallback);
                state.status = SubmissionStatus::Failed(message.clone());
                state.notice = Some(Notice::error(message.clone()));
                SubmitOutcome::Failed(message)
            }
        }
    }
}

/// Read access to a [`FormLifecycle`] without value edits or resets.
pub struct FormView<'a, F: FormSchema>(&'a FormLifecycle<F>);

impl<F: FormSchema> FormView<'_, F> {
    pub async fn values(&self) -> F {
        self.0.values().await
    }

    pub async fn errors(&self) -> FieldErrors {
        self.0.errors().await
    }

    pub async fn visible_errors(&self) -> FieldErrors {
        self.0.visible_errors().await
    }

    pub async fn status(&self) -> SubmissionStatus {
        self.0.status().await
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.0.notice().await
    }

    pub async fn dismiss_notice(&self) {
        self.0.dismiss_notice().await;
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.0.is_mounted()
    }
}

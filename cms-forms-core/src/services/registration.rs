//! Registration screen

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use cms_forms_provider::AuthUser;

use crate::error::CoreError;
use crate::routes;
use crate::services::{FormLifecycle, FormSchema, ServiceContext, SubmitOutcome};
use crate::types::{FieldErrors, Notice, NoticeAction, RegistrationForm};
use crate::validation::validate_registration;

/// Banner text when the backend rejects a sign-up without a message.
pub const REGISTRATION_FALLBACK: &str = "An error occurred during registration.";

/// Delay between a successful sign-up and the redirect to the login screen.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(3000);

const CONFIRMATION_MESSAGE: &str =
    "Registration successful! Please check your email to confirm your account.";

impl FormSchema for RegistrationForm {
    fn validate(&self) -> FieldErrors {
        validate_registration(self)
    }
}

/// Sign-up form with a delayed redirect to login.
pub struct RegistrationScreen {
    ctx: Arc<ServiceContext>,
    form: FormLifecycle<RegistrationForm>,
    redirect: Mutex<Option<JoinHandle<()>>>,
}

impl RegistrationScreen {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            form: FormLifecycle::new(RegistrationForm::default()),
            redirect: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormLifecycle<RegistrationForm> {
        &self.form
    }

    /// Create the account.
    ///
    /// On success the confirmation banner is shown and navigation to the login
    /// screen fires once after [`REDIRECT_DELAY`], unless the screen is gone by then.
    pub async fn submit(&self) -> SubmitOutcome<AuthUser> {
        let auth = Arc::clone(&self.ctx.auth);
        let redirect_to = self.ctx.site_link(routes::LOGIN);

        let outcome = self
            .form
            .submit_with(
                REGISTRATION_FALLBACK,
                move |values| async move {
                    let request = values.sign_up_request(redirect_to);
                    log::info!("Registering account for {}", request.email);
                    auth.sign_up(&request).await.map_err(CoreError::from)
                },
                |_| Notice::success(CONFIRMATION_MESSAGE).with_action(NoticeAction::GoToLogin),
            )
            .await;

        if outcome.is_completed() {
            self.schedule_login_redirect();
        }
        outcome
    }

    fn schedule_login_redirect(&self) {
        let navigator = Arc::clone(&self.ctx.navigator);
        let mount = self.form.mount_state();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(REDIRECT_DELAY).await;
            if mount.is_mounted() {
                navigator.push(routes::LOGIN);
            } else {
                log::debug!("Skipping login redirect: registration screen unmounted");
            }
        });

        if let Ok(mut slot) = self.redirect.lock() {
            *slot = Some(handle);
        }
    }

    /// Handle of the pending login redirect, if one was scheduled.
    pub fn take_scheduled_redirect(&self) -> Option<JoinHandle<()>> {
        self.redirect.lock().ok().and_then(|mut slot| slot.take())
    }

    /// "Go to login" banner action.
    pub fn go_to_login(&self) {
        self.ctx.navigator.push(routes::LOGIN);
    }

    /// Terms-and-conditions link.
    pub fn open_terms(&self) {
        self.ctx.navigator.push(routes::TERMS);
    }

    pub fn unmount(&self) {
        self.form.unmount();
    }
}

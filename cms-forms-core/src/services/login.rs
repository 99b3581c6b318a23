//! Login screen

use std::sync::Arc;

use cms_forms_provider::AuthSession;

use crate::error::CoreError;
use crate::routes;
use crate::services::{FormLifecycle, FormSchema, ServiceContext, SubmitOutcome};
use crate::traits::REMEMBER_ME_FLAG;
use crate::types::{FieldErrors, LoginForm, Notice};
use crate::validation::validate_login;

/// Banner text when the backend rejects a sign-in without a message.
pub const LOGIN_FALLBACK: &str = "Invalid email or password.";

/// Question asked when a reset is requested without an email address.
pub const RESET_PROMPT: &str = "Enter your email address to reset your password:";

const RESET_SENT_MESSAGE: &str = "Password reset email sent. Please check your inbox.";
const RESET_FALLBACK: &str = "Failed to send password reset email.";

impl FormSchema for LoginForm {
    fn validate(&self) -> FieldErrors {
        validate_login(self)
    }
}

/// Result of a password-reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The reset email was requested.
    Sent,
    /// The prompt was dismissed or left empty; nothing was sent.
    Aborted,
    /// The backend refused; the message is also shown as a notice.
    Failed(String),
}

/// Email/password sign-in.
pub struct LoginScreen {
    ctx: Arc<ServiceContext>,
    form: FormLifecycle<LoginForm>,
}

impl LoginScreen {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            form: FormLifecycle::new(LoginForm::default()),
        }
    }

    #[must_use]
    pub fn form(&self) -> &FormLifecycle<LoginForm> {
        &self.form
    }

    /// Sign in, record the remember-me choice and open the dashboard.
    pub async fn submit(&self) -> SubmitOutcome<AuthSession> {
        let auth = Arc::clone(&self.ctx.auth);

        let outcome = self
            .form
            .submit_with(
                LOGIN_FALLBACK,
                move |values| async move {
                    let session = auth
                        .sign_in_with_password(&values.sign_in_request())
                        .await
                        .map_err(CoreError::from)?;
                    Ok::<_, CoreError>((session, values.remember_me))
                },
                |_| Notice::success("Signed in successfully."),
            )
            .await;

        outcome.map(|(session, remember_me)| {
            // 记住登录状态
            if remember_me {
                self.ctx.preferences.set_flag(REMEMBER_ME_FLAG);
            } else {
                self.ctx.preferences.clear_flag(REMEMBER_ME_FLAG);
            }
            self.ctx.navigator.push(routes::DASHBOARD);
            session
        })
    }

    /// "Forgot password" link.
    ///
    /// Uses `email`, else the email field, else asks through the prompt.
    pub async fn request_password_reset(&self, email: Option<&str>) -> ResetOutcome {
        let typed = self.form.values().await.email;
        let email = match email.map(str::trim).filter(|e| !e.is_empty()) {
            Some(e) => e.to_string(),
            None if !typed.trim().is_empty() => typed.trim().to_string(),
            None => match self.ctx.prompt.ask(RESET_PROMPT) {
                Some(answer) if !answer.trim().is_empty() => answer.trim().to_string(),
                _ => {
                    log::debug!("Password reset aborted: no email entered");
                    return ResetOutcome::Aborted;
                }
            },
        };

        let redirect_to = self.ctx.site_link(routes::RESET_PASSWORD);
        let result = self
            .ctx
            .auth
            .reset_password_for_email(&email, redirect_to.as_deref())
            .await;

        if !self.form.is_mounted() {
            return ResetOutcome::Aborted;
        }

        match result {
            Ok(()) => {
                log::info!("Password reset requested for {email}");
                self.form.set_notice(Notice::info(RESET_SENT_MESSAGE)).await;
                ResetOutcome::Sent
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("Password reset failed: {e}");
                } else {
                    log::error!("Password reset failed: {e}");
                }
                let message = e.user_message(RESET_FALLBACK);
                self.form.set_notice(Notice::error(message.clone())).await;
                ResetOutcome::Failed(message)
            }
        }
    }

    pub fn unmount(&self) {
        self.form.unmount();
    }
}

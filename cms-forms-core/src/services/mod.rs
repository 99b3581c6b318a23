//! Screen services

mod lifecycle;
mod login;
mod media;
mod record_create;
mod record_kind;
mod record_update;
mod registration;

pub use lifecycle::{FormLifecycle, FormSchema, FormView, MountState, SubmitOutcome};
pub use login::{LoginScreen, ResetOutcome, LOGIN_FALLBACK, RESET_PROMPT};
pub use media::UploadOutcome;
pub use record_create::{BlogCreateScreen, RecordCreateScreen, SeoBannerCreateScreen};
pub use record_kind::{media_kind, RecordKind};
pub use record_update::{BlogUpdateScreen, RecordUpdateScreen, SeoBannerUpdateScreen};
pub use registration::{RegistrationScreen, REDIRECT_DELAY, REGISTRATION_FALLBACK};

use std::sync::Arc;

use crate::traits::{AuthClient, DataClient, Navigator, ObjectStorage, PreferenceStore, Prompt};

/// Settings read by screens at request time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenSettings {
    /// Public site origin used to build email redirect links. `None` omits the redirect.
    pub site_url: Option<String>,
}

/// 服务上下文 - 持有所有依赖
///
/// The platform layer builds this once and hands an `Arc` to every screen.
pub struct ServiceContext {
    /// Authentication endpoint
    pub auth: Arc<dyn AuthClient>,
    /// Record collections
    pub data: Arc<dyn DataClient>,
    /// Media upload endpoint
    pub storage: Arc<dyn ObjectStorage>,
    pub navigator: Arc<dyn Navigator>,
    /// Persisted UI flags
    pub preferences: Arc<dyn PreferenceStore>,
    pub prompt: Arc<dyn Prompt>,
    pub settings: ScreenSettings,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthClient>,
        data: Arc<dyn DataClient>,
        storage: Arc<dyn ObjectStorage>,
        navigator: Arc<dyn Navigator>,
        preferences: Arc<dyn PreferenceStore>,
        prompt: Arc<dyn Prompt>,
        settings: ScreenSettings,
    ) -> Self {
        Self {
            auth,
            data,
            storage,
            navigator,
            preferences,
            prompt,
            settings,
        }
    }

    /// Absolute site link for `path`, when a site URL is configured.
    #[must_use]
    pub fn site_link(&self, path: &str) -> Option<String> {
        crate::routes::site_link(self.settings.site_url.as_deref(), path)
    }
}

//! Application bootstrap for the CMS dashboard forms.
//!
//! Provides `AppConfig` (environment settings), `init_logging`, `AppState`
//! (screen factory over one `ServiceContext`) and `AppStateBuilder` (adapter
//! injection).

pub mod config;
pub mod logging;

use std::sync::Arc;

use cms_forms_core::services::{
    BlogCreateScreen, BlogUpdateScreen, LoginScreen, RegistrationScreen, ScreenSettings,
    SeoBannerCreateScreen, SeoBannerUpdateScreen, ServiceContext,
};
use cms_forms_core::traits::{
    AuthClient, DataClient, DismissedPrompt, InMemoryPreferenceStore, Navigator, ObjectStorage,
    PreferenceStore, Prompt,
};
use cms_forms_provider::{CloudinaryStorage, SupabaseClient};

pub use config::{AppConfig, AppError};
pub use logging::init_logging;

/// Application state.
///
/// Holds the `ServiceContext` shared by every screen. Each call to a screen
/// factory returns a fresh screen that exclusively owns its form state.
pub struct AppState {
    /// Service context (holds all clients and collaborators)
    pub ctx: Arc<ServiceContext>,
}

impl AppState {
    #[must_use]
    pub fn registration_screen(&self) -> RegistrationScreen {
        RegistrationScreen::new(Arc::clone(&self.ctx))
    }

    #[must_use]
    pub fn login_screen(&self) -> LoginScreen {
        LoginScreen::new(Arc::clone(&self.ctx))
    }

    #[must_use]
    pub fn blog_create_screen(&self) -> BlogCreateScreen {
        BlogCreateScreen::new(Arc::clone(&self.ctx))
    }

    #[must_use]
    pub fn seo_banner_create_screen(&self) -> SeoBannerCreateScreen {
        SeoBannerCreateScreen::new(Arc::clone(&self.ctx))
    }

    /// Edit screen for blog `id`; returns once the first fetch settled.
    pub async fn blog_update_screen(&self, id: &str) -> BlogUpdateScreen {
        BlogUpdateScreen::mount(Arc::clone(&self.ctx), id).await
    }

    /// Edit screen for SEO banner `id`; returns once the first fetch settled.
    pub async fn seo_banner_update_screen(&self, id: &str) -> SeoBannerUpdateScreen {
        SeoBannerUpdateScreen::mount(Arc::clone(&self.ctx), id).await
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `auth`, `data`, `storage`: remote clients (see [`AppStateBuilder::from_config`])
/// - `navigator`: how the shell changes screens
///
/// # Optional
/// - `preferences`: defaults to `InMemoryPreferenceStore`
/// - `prompt`: defaults to `DismissedPrompt`
/// - `settings`: defaults to no site URL
pub struct AppStateBuilder {
    auth: Option<Arc<dyn AuthClient>>,
    data: Option<Arc<dyn DataClient>>,
    storage: Option<Arc<dyn ObjectStorage>>,
    navigator: Option<Arc<dyn Navigator>>,
    preferences: Option<Arc<dyn PreferenceStore>>,
    prompt: Option<Arc<dyn Prompt>>,
    settings: ScreenSettings,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            auth: None,
            data: None,
            storage: None,
            navigator: None,
            preferences: None,
            prompt: None,
            settings: ScreenSettings::default(),
        }
    }

    /// Builder with the hosted backend and media storage from `config`.
    ///
    /// One backend client serves both auth and data, so the session token from a
    /// sign-in authorises later record calls.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let backend = Arc::new(SupabaseClient::new(
            config.backend_url.as_str(),
            config.backend_anon_key.as_str(),
        )?);
        let storage = Arc::new(CloudinaryStorage::new(
            config.storage_account.clone(),
            config.storage_upload_preset.clone(),
        )?);
        if !config.uploads_configured() {
            log::warn!("Media storage is not configured; uploads will fail");
        }
        log::info!("Using backend {}", config.backend_url);

        Ok(Self::new()
            .auth(backend.clone())
            .data(backend)
            .storage(storage)
            .settings(config.screen_settings()))
    }

    #[must_use]
    pub fn auth(mut self, auth: Arc<dyn AuthClient>) -> Self {
        self.auth = Some(auth);
        self
    }

    #[must_use]
    pub fn data(mut self, data: Arc<dyn DataClient>) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn storage(mut self, storage: Arc<dyn ObjectStorage>) -> Self {
        self.storage = Some(storage);
        self
    }

    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    #[must_use]
    pub fn preferences(mut self, preferences: Arc<dyn PreferenceStore>) -> Self {
        self.preferences = Some(preferences);
        self
    }

    #[must_use]
    pub fn prompt(mut self, prompt: Arc<dyn Prompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    #[must_use]
    pub fn settings(mut self, settings: ScreenSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `AppError::MissingAdapter` if a required adapter is missing.
    pub fn build(self) -> Result<AppState, AppError> {
        let auth = self.auth.ok_or(AppError::MissingAdapter("auth"))?;
        let data = self.data.ok_or(AppError::MissingAdapter("data"))?;
        let storage = self.storage.ok_or(AppError::MissingAdapter("storage"))?;
        let navigator = self.navigator.ok_or(AppError::MissingAdapter("navigator"))?;
        let preferences = self
            .preferences
            .unwrap_or_else(|| Arc::new(InMemoryPreferenceStore::new()));
        let prompt = self.prompt.unwrap_or_else(|| Arc::new(DismissedPrompt));

        let ctx = Arc::new(ServiceContext::new(
            auth,
            data,
            storage,
            navigator,
            preferences,
            prompt,
            self.settings,
        ));

        Ok(AppState { ctx })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

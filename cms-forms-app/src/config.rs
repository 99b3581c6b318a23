//! Environment configuration

use std::fmt;

use thiserror::Error;

use cms_forms_core::ScreenSettings;

pub const BACKEND_URL_VAR: &str = "CMS_BACKEND_URL";
pub const BACKEND_ANON_KEY_VAR: &str = "CMS_BACKEND_ANON_KEY";
pub const STORAGE_ACCOUNT_VAR: &str = "CMS_STORAGE_ACCOUNT";
pub const STORAGE_UPLOAD_PRESET_VAR: &str = "CMS_STORAGE_UPLOAD_PRESET";
pub const SITE_URL_VAR: &str = "CMS_SITE_URL";

/// Bootstrap errors.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0} is not set")]
    MissingVariable(&'static str),

    #[error("{name} is not a valid URL: {value}")]
    InvalidUrl { name: &'static str, value: String },

    #[error("{0} is required")]
    MissingAdapter(&'static str),

    #[error("Failed to create client: {0}")]
    Client(#[from] cms_forms_provider::RemoteError),

    #[error("Failed to initialise logging: {0}")]
    Logging(String),
}

/// Runtime settings read from the environment.
///
/// Values are trimmed; blank values count as unset. The backend URL and key are
/// required. Storage settings are optional: without them uploads fail when
/// attempted, not at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub backend_url: String,
    pub backend_anon_key: String,
    pub storage_account: Option<String>,
    pub storage_upload_preset: Option<String>,
    pub site_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source (process env, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend_url = read(BACKEND_URL_VAR).ok_or(AppError::MissingVariable(BACKEND_URL_VAR))?;
        check_url(BACKEND_URL_VAR, &backend_url)?;
        let backend_anon_key =
            read(BACKEND_ANON_KEY_VAR).ok_or(AppError::MissingVariable(BACKEND_ANON_KEY_VAR))?;

        let site_url = read(SITE_URL_VAR);
        if let Some(site) = &site_url {
            check_url(SITE_URL_VAR, site)?;
        }

        Ok(Self {
            backend_url,
            backend_anon_key,
            storage_account: read(STORAGE_ACCOUNT_VAR),
            storage_upload_preset: read(STORAGE_UPLOAD_PRESET_VAR),
            site_url,
        })
    }

    #[must_use]
    pub fn screen_settings(&self) -> ScreenSettings {
        ScreenSettings {
            site_url: self.site_url.clone(),
        }
    }

    /// Whether both storage settings are present.
    #[must_use]
    pub fn uploads_configured(&self) -> bool {
        self.storage_account.is_some() && self.storage_upload_preset.is_some()
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), AppError> {
    match url::Url::parse(value) {
        Ok(u) if matches!(u.scheme(), "http" | "https") => Ok(()),
        _ => Err(AppError::InvalidUrl {
            name,
            value: value.to_string(),
        }),
    }
}

// Key stays out of logs
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("backend_url", &self.backend_url)
            .field("backend_anon_key", &"****")
            .field("storage_account", &self.storage_account)
            .field("storage_upload_preset", &self.storage_upload_preset)
            .field("site_url", &self.site_url)
            .finish()
    }
}

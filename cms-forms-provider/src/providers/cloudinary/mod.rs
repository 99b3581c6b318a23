//! Hosted media upload endpoint

mod upload;

use reqwest::Client;

use crate::error::{RemoteError, Result};
use crate::http_client::create_http_client;

pub(crate) const STORAGE_SERVICE: &str = "storage";
pub(crate) const UPLOAD_API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Unsigned-preset media uploader.
///
/// Account and preset are optional at construction; an upload without them fails
/// fast with [`RemoteError::MissingConfiguration`] instead of sending a request.
pub struct CloudinaryStorage {
    pub(crate) client: Client,
    pub(crate) api_base: String,
    pub(crate) cloud_name: Option<String>,
    pub(crate) upload_preset: Option<String>,
}

impl CloudinaryStorage {
    pub fn new(cloud_name: Option<String>, upload_preset: Option<String>) -> Result<Self> {
        Ok(Self {
            client: create_http_client(STORAGE_SERVICE)?,
            api_base: UPLOAD_API_BASE.to_string(),
            cloud_name: cloud_name.filter(|v| !v.trim().is_empty()),
            upload_preset: upload_preset.filter(|v| !v.trim().is_empty()),
        })
    }

    /// Point the client at a different API base (self-hosted proxy, tests).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Account and preset, or the name of the first missing setting.
    pub(crate) fn settings(&self) -> Result<(&str, &str)> {
        let cloud_name = self
            .cloud_name
            .as_deref()
            .ok_or_else(|| missing("CMS_STORAGE_ACCOUNT"))?;
        let preset = self
            .upload_preset
            .as_deref()
            .ok_or_else(|| missing("CMS_STORAGE_UPLOAD_PRESET"))?;
        Ok((cloud_name, preset))
    }
}

fn missing(setting: &str) -> RemoteError {
    RemoteError::MissingConfiguration {
        service: STORAGE_SERVICE.to_string(),
        setting: setting.to_string(),
    }
}

//! Hosted backend client: auth API and REST data API behind one project URL.

mod auth;
mod data;

use reqwest::{Client, RequestBuilder};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::http_client::create_http_client;
use crate::utils::log_sanitizer::mask_secret;

pub(crate) const AUTH_SERVICE: &str = "auth";
pub(crate) const DATA_SERVICE: &str = "data";

/// Client for the hosted backend.
///
/// A successful password sign-in stores the session token; later data calls are
/// authorised with it instead of the anonymous key.
pub struct SupabaseClient {
    pub(crate) client: Client,
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
    pub(crate) access_token: RwLock<Option<String>>,
}

impl SupabaseClient {
    /// Create a client for the project at `base_url` using its public (anon) key.
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let anon_key = anon_key.into();
        log::debug!(
            "Creating backend client for {base_url} (key {})",
            mask_secret(&anon_key)
        );
        Ok(Self {
            client: create_http_client(AUTH_SERVICE)?,
            base_url,
            anon_key,
            access_token: RwLock::new(None),
        })
    }

    /// Project base URL (without trailing slash).
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session token from a sign-in is held.
    pub async fn has_session(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Drop the stored session token.
    pub async fn clear_session(&self) {
        *self.access_token.write().await = None;
    }

    /// Attach the key and bearer headers every backend call needs.
    pub(crate) async fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let bearer = self
            .access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.anon_key.clone());
        builder
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {bearer}"))
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.base_url)
    }

    pub(crate) fn rest_url(&self, collection: &str) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url,
            urlencoding::encode(collection)
        )
    }
}

/// Append `redirect_to` as a query parameter when present.
pub(crate) fn with_redirect(url: String, redirect_to: Option<&str>) -> String {
    match redirect_to {
        Some(target) if !target.is_empty() => {
            format!("{url}?redirect_to={}", urlencoding::encode(target))
        }
        _ => url,
    }
}

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AuthSession, AuthUser, SignInRequest, SignUpRequest, UploadFile, UploadKind};

/// Authentication service.
///
/// Implementations:
/// - [`SupabaseClient`](crate::SupabaseClient) (hosted auth API)
/// - in-memory fakes in tests
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Register a new user. Returns the created (possibly unconfirmed) user.
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthUser>;

    /// Sign in with email and password.
    async fn sign_in_with_password(&self, request: &SignInRequest) -> Result<AuthSession>;

    /// Send a password reset email.
    ///
    /// # Arguments
    /// * `email` - account email
    /// * `redirect_to` - page the reset link points to
    async fn reset_password_for_email(&self, email: &str, redirect_to: Option<&str>)
        -> Result<()>;
}

/// Record storage keyed by collection name.
///
/// Records cross this boundary as JSON; typing happens in the caller.
#[async_trait]
pub trait DataClient: Send + Sync {
    /// Fetch exactly one record where `id_field = id_value`.
    ///
    /// # Arguments
    /// * `collection` - table/collection name
    /// * `columns` - column selection (`*` for all)
    /// * `id_field` - identifier column
    /// * `id_value` - identifier value
    async fn select_single(
        &self,
        collection: &str,
        columns: &str,
        id_field: &str,
        id_value: &str,
    ) -> Result<serde_json::Value>;

    /// Insert one record and return the stored rows.
    async fn insert(
        &self,
        collection: &str,
        record: &serde_json::Value,
    ) -> Result<Vec<serde_json::Value>>;

    /// Update the record where `id_field = id_value` and return the stored rows.
    async fn update(
        &self,
        collection: &str,
        id_field: &str,
        id_value: &str,
        record: &serde_json::Value,
    ) -> Result<Vec<serde_json::Value>>;
}

/// Media object storage.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Upload a file into `folder` and return its public HTTPS URL.
    async fn upload(&self, file: &UploadFile, kind: UploadKind, folder: &str) -> Result<String>;
}

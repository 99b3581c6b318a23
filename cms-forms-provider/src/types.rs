use serde::{Deserialize, Serialize};

// ============ Auth Types ============

/// User account as returned by the auth service.
///
/// Only the fields the dashboard reads are modelled; the rest are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User id.
    pub id: String,
    /// Email address (absent for phone-only accounts).
    #[serde(default)]
    pub email: Option<String>,
    /// Metadata supplied at sign-up.
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    /// When the email address was confirmed, if it was.
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

/// Session returned by a password sign-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent data calls.
    pub access_token: String,
    /// Token used to obtain a new access token.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Signed-in user.
    pub user: AuthUser,
}

/// Sign-up parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    /// Free-form profile data stored with the user.
    pub metadata: serde_json::Value,
    /// Link target used in the confirmation email.
    pub email_redirect_to: Option<String>,
}

/// Password sign-in parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

// ============ Storage Types ============

/// Media kind of an upload. Selects the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Image,
    Video,
}

impl UploadKind {
    /// Resource type segment used by the upload endpoint.
    #[must_use]
    pub fn resource_type(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

impl std::fmt::Display for UploadKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.resource_type())
    }
}

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Original file name.
    pub file_name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Upload endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UploadResponse {
    pub secure_url: String,
}

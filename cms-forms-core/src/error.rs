//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use cms_forms_provider::RemoteError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The field path does not name a field that supports the operation.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The screen has no rendered form yet (record still loading or failed to load).
    #[error("Form is not ready")]
    NotReady,

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Remote service error (converted from library)
    #[error("{0}")]
    Remote(#[from] RemoteError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, remote rejection, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::UnknownField(_) | Self::NotReady => true,
            Self::Remote(e) => e.is_expected(),
            Self::SerializationError(_) => false,
        }
    }

    /// Message shown in the request-level error banner.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Remote(e) => e.user_message(fallback),
            _ => fallback.to_string(),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::SerializationError(e.to_string())
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

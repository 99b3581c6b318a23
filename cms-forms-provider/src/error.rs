use serde::{Deserialize, Serialize};

/// Unified error type for all remote service calls.
///
/// Each variant carries a `service` field naming the backend that produced it
/// (`auth`, `data`, `storage`). All variants are serializable so the UI layer
/// can forward them as structured payloads.
///
/// Nothing in this crate retries; a failed call surfaces immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RemoteError {
    /// The remote service answered with an error object.
    Rejected {
        /// Service that produced the error.
        service: String,
        /// HTTP status code of the response.
        status: u16,
        /// Message reported by the service, if the body carried one.
        message: Option<String>,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Service that produced the error.
        service: String,
        /// Error details.
        detail: String,
    },

    /// Failed to parse the service's response.
    ParseError {
        /// Service that produced the error.
        service: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Service that produced the error.
        service: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// A required configuration value is absent, so the call was not attempted.
    MissingConfiguration {
        /// Service that produced the error.
        service: String,
        /// Name of the missing setting.
        setting: String,
    },
}

impl RemoteError {
    /// 是否为预期行为（用户输入错误、凭证错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Rejected { status, .. } => (400..500).contains(status),
            Self::MissingConfiguration { .. } => true,
            _ => false,
        }
    }

    /// Message to show to the user.
    ///
    /// A message reported by the remote service is returned verbatim. Network
    /// failures carry their own detail. Everything else falls back to `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Rejected {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            Self::NetworkError { detail, .. } if !detail.trim().is_empty() => detail.clone(),
            Self::MissingConfiguration { setting, .. } => {
                format!("{setting} is not configured")
            }
            _ => fallback.to_string(),
        }
    }

    /// Name of the service that produced the error.
    #[must_use]
    pub fn service(&self) -> &str {
        match self {
            Self::Rejected { service, .. }
            | Self::NetworkError { service, .. }
            | Self::ParseError { service, .. }
            | Self::SerializationError { service, .. }
            | Self::MissingConfiguration { service, .. } => service,
        }
    }
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected {
                service,
                status,
                message,
            } => {
                if let Some(msg) = message {
                    write!(f, "[{service}] Request rejected (HTTP {status}): {msg}")
                } else {
                    write!(f, "[{service}] Request rejected (HTTP {status})")
                }
            }
            Self::NetworkError { service, detail } => {
                write!(f, "[{service}] Network error: {detail}")
            }
            Self::ParseError { service, detail } => {
                write!(f, "[{service}] Parse error: {detail}")
            }
            Self::SerializationError { service, detail } => {
                write!(f, "[{service}] Serialization error: {detail}")
            }
            Self::MissingConfiguration { service, setting } => {
                write!(f, "[{service}] Missing configuration: {setting}")
            }
        }
    }
}

impl std::error::Error for RemoteError {}

/// Result type alias for remote calls.
pub type Result<T> = std::result::Result<T, RemoteError>;

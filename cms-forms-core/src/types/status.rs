//! Screen status types

use serde::{Deserialize, Serialize};

/// Life-cycle state of the current submit attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionStatus {
    /// Submit buttons are disabled while this is `true`.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}

/// Per-field upload state. Independent of [`SubmissionStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading,
    Failed(String),
}

/// Load state of an edit screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "camelCase")]
pub enum FetchStatus {
    Fetching,
    Ready,
    FetchFailed(String),
}

/// Banner style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Follow-up action offered by a banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "path", rename_all = "camelCase")]
pub enum NoticeAction {
    /// Navigate to a list page.
    ViewList(String),
    /// Clear the form for another entry.
    CreateAnother,
    /// Navigate to the login screen.
    GoToLogin,
}

/// Request-level banner (one at a time, dismissible).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<NoticeAction>,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            actions: Vec::new(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message)
    }

    #[must_use]
    pub fn with_action(mut self, action: NoticeAction) -> Self {
        self.actions.push(action);
        self
    }
}

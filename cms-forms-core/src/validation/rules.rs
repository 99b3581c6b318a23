//! Field-level rules shared by all schemas

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::{FieldErrors, FieldPath};

/// Minimum password length accepted anywhere.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Name length bounds (characters).
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Well-formed email address.
pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN
        .as_ref()
        .is_some_and(|re| re.is_match(value.trim()))
}

/// Absolute http(s) URL with a host.
pub fn is_url(value: &str) -> bool {
    url::Url::parse(value.trim())
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
}

/// Calendar date in `YYYY-MM-DD` form.
pub fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_ok()
}

/// Accumulates field errors for one validation pass.
#[derive(Debug, Default)]
pub struct Checker {
    errors: FieldErrors,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, path: impl Into<FieldPath>, message: impl Into<String>) {
        self.errors.add(path, message);
    }

    /// Non-blank text. Returns whether the value was present.
    pub fn required(&mut self, path: impl Into<FieldPath>, value: &str, label: &str) -> bool {
        if value.trim().is_empty() {
            self.fail(path, format!("{label} is required"));
            return false;
        }
        true
    }

    /// Required and URL-shaped.
    pub fn required_url(&mut self, path: impl Into<FieldPath>, value: &str, label: &str) {
        let path = path.into();
        if self.required(path.clone(), value, label) && !is_url(value) {
            self.fail(path, format!("{label} must be a valid URL"));
        }
    }

    /// Required, with a character count in `[min, max]`.
    pub fn length_between(
        &mut self,
        path: impl Into<FieldPath>,
        value: &str,
        label: &str,
        min: usize,
        max: usize,
    ) {
        let path = path.into();
        if !self.required(path.clone(), value, label) {
            return;
        }
        let len = value.trim().chars().count();
        if len < min {
            self.fail(path, format!("{label} must be at least {min} characters"));
        } else if len > max {
            self.fail(path, format!("{label} must be at most {max} characters"));
        }
    }

    pub fn email(&mut self, path: impl Into<FieldPath>, value: &str) {
        let path = path.into();
        if self.required(path.clone(), value, "Email") && !is_email(value) {
            self.fail(path, "Invalid email address");
        }
    }

    /// Password presence and length; with `strong`, also one lowercase, one uppercase and one digit.
    pub fn password(&mut self, path: impl Into<FieldPath>, value: &str, strong: bool) {
        let path = path.into();
        if value.is_empty() {
            self.fail(path, "Password is required");
            return;
        }
        if value.chars().count() < PASSWORD_MIN_LENGTH {
            self.fail(
                path,
                format!("Password must be at least {PASSWORD_MIN_LENGTH} characters"),
            );
            return;
        }
        if !strong {
            return;
        }
        if !value.chars().any(|c| c.is_ascii_lowercase()) {
            self.fail(path, "Password must contain at least one lowercase letter");
        } else if !value.chars().any(|c| c.is_ascii_uppercase()) {
            self.fail(path, "Password must contain at least one uppercase letter");
        } else if !value.chars().any(|c| c.is_ascii_digit()) {
            self.fail(path, "Password must contain at least one number");
        }
    }

    pub fn finish(self) -> FieldErrors {
        self.errors
    }
}

//! Credential form values

use cms_forms_provider::{SignInRequest, SignUpRequest};
use serde::{Deserialize, Serialize};

/// Registration screen values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    /// Terms and conditions accepted.
    pub terms: bool,
}

impl RegistrationForm {
    /// Profile metadata stored with the new user.
    #[must_use]
    pub fn metadata(&self) -> serde_json::Value {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        serde_json::json!({
            "first_name": first,
            "last_name": last,
            "full_name": format!("{first} {last}"),
        })
    }

    /// Sign-up call for these values. The password is sent as typed.
    #[must_use]
    pub fn sign_up_request(&self, email_redirect_to: Option<String>) -> SignUpRequest {
        SignUpRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            metadata: self.metadata(),
            email_redirect_to,
        }
    }
}

/// Login screen values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    #[must_use]
    pub fn sign_in_request(&self) -> SignInRequest {
        SignInRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

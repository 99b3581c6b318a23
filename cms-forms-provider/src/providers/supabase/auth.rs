//! Auth API calls

use async_trait::async_trait;
use serde_json::json;

use crate::error::{RemoteError, Result};
use crate::http_client::HttpUtils;
use crate::traits::AuthClient;
use crate::types::{AuthSession, AuthUser, SignInRequest, SignUpRequest};

use super::{with_redirect, SupabaseClient, AUTH_SERVICE};

#[async_trait]
impl AuthClient for SupabaseClient {
    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthUser> {
        let url = with_redirect(
            self.auth_url("/signup"),
            request.email_redirect_to.as_deref(),
        );
        let body = json!({
            "email": request.email,
            "password": request.password,
            "data": request.metadata,
        });

        let builder = self.authorize(self.client.post(&url)).await.json(&body);
        let text = HttpUtils::execute_request(builder, AUTH_SERVICE, "POST", "/signup").await?;

        // 开启邮箱确认时返回 user，自动确认时返回带 user 的 session
        let value: serde_json::Value = HttpUtils::parse_json(&text, AUTH_SERVICE)?;
        let user_value = match value.get("user") {
            Some(user) if user.is_object() => user.clone(),
            _ => value,
        };
        serde_json::from_value(user_value).map_err(|e| RemoteError::ParseError {
            service: AUTH_SERVICE.to_string(),
            detail: e.to_string(),
        })
    }

    async fn sign_in_with_password(&self, request: &SignInRequest) -> Result<AuthSession> {
        let url = format!("{}?grant_type=password", self.auth_url("/token"));
        let body = json!({
            "email": request.email,
            "password": request.password,
        });

        let builder = self.authorize(self.client.post(&url)).await.json(&body);
        let text = HttpUtils::execute_request(builder, AUTH_SERVICE, "POST", "/token").await?;
        let session: AuthSession = HttpUtils::parse_json(&text, AUTH_SERVICE)?;

        *self.access_token.write().await = Some(session.access_token.clone());
        log::info!("Signed in as user {}", session.user.id);
        Ok(session)
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: Option<&str>,
    ) -> Result<()> {
        let url = with_redirect(self.auth_url("/recover"), redirect_to);
        let body = json!({ "email": email });

        let builder = self.authorize(self.client.post(&url)).await.json(&body);
        HttpUtils::execute_request(builder, AUTH_SERVICE, "POST", "/recover").await?;
        Ok(())
    }
}

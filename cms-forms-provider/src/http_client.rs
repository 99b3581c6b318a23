//! Generic HTTP client tools
//!
//! Shared request execution for the auth, data and storage clients: sending,
//! logging, reading the body, and mapping non-2xx answers to
//! [`RemoteError::Rejected`]. Each client builds its own `RequestBuilder`.
//!
//! Requests are sent exactly once. There is no retry and no request timeout.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{RemoteError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// Connection establishment timeout (seconds). Requests themselves are unbounded.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create the shared HTTP client.
pub fn create_http_client(service: &str) -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .map_err(|e| RemoteError::NetworkError {
            service: service.to_string(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response text of a 2xx answer.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `service` - service name (for logs and errors)
    /// * `method_name` - request method name (for logs)
    /// * `url_or_action` - URL or action name (for logs)
    ///
    /// # Returns
    /// * `Ok(response_text)` - body of a successful response
    /// * `Err(RemoteError::Rejected)` - non-2xx response; message extracted from the body
    /// * `Err(RemoteError::NetworkError)` - the request could not be sent or read
    pub async fn execute_request(
        request_builder: RequestBuilder,
        service: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<String> {
        let (status, body) =
            Self::execute_raw(request_builder, service, method_name, url_or_action).await?;

        if (200..300).contains(&status) {
            return Ok(body);
        }

        let message = extract_error_message(&body);
        log::warn!(
            "[{service}] {method_name} {url_or_action} rejected with HTTP {status}: {}",
            message.as_deref().unwrap_or("<no message>")
        );
        Err(RemoteError::Rejected {
            service: service.to_string(),
            status,
            message,
        })
    }

    /// Performs an HTTP request and returns status code and body text, whatever the status.
    pub async fn execute_raw(
        request_builder: RequestBuilder,
        service: &str,
        method_name: &str,
        url_or_action: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{service}] {method_name} {url_or_action}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| RemoteError::NetworkError {
                service: service.to_string(),
                detail: e.to_string(),
            })?;

        let status_code = response.status().as_u16();
        log::debug!("[{service}] Response Status: {status_code}");

        let response_text = response
            .text()
            .await
            .map_err(|e| RemoteError::NetworkError {
                service: service.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{service}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, service: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{service}] JSON parse failed: {e}");
            log::error!("[{service}] Raw response: {}", truncate_for_log(response_text));
            RemoteError::ParseError {
                service: service.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Pull a human-readable message out of an error body.
///
/// The auth API uses `msg` or `error_description`, the data API `message`,
/// and some gateways a bare `error` string or `error.message`. A body that is not
/// JSON is used as the message itself when it is non-empty.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    for key in ["msg", "message", "error_description"] {
        if let Some(msg) = value.get(key).and_then(serde_json::Value::as_str) {
            if !msg.trim().is_empty() {
                return Some(msg.to_string());
            }
        }
    }

    match value.get("error") {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(serde_json::Value::Object(obj)) => obj
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

//! HTTP utilities for ARM REST calls

use super::request::RawResponse;
use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use serde_json::Value;
use url::Url;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips non-printable characters
pub fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let mut end = MAX_LOG_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... [truncated, {} bytes total]", &body[..end], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A fully prepared request, ready to go on the wire
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// HTTP client wrapper for ARM calls
#[derive(Clone)]
pub struct ArmHttpClient {
    client: Client,
}

impl ArmHttpClient {
    /// Create a new HTTP client
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Send a prepared request and buffer the response
    pub async fn send(&self, request: PreparedRequest) -> std::result::Result<RawResponse, reqwest::Error> {
        tracing::debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;

        tracing::debug!("response status {} ({} bytes)", status, body.len());

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Format an ARM error for display
/// Security: Sanitizes error messages to avoid leaking sensitive API details
pub fn format_arm_error(error: &Error) -> String {
    if let Some(status) = error.status() {
        match status.as_u16() {
            401 => return "Authentication failed. Run 'az login' or check your service principal.".to_string(),
            403 => return "Permission denied. Check your Azure RBAC role assignments.".to_string(),
            404 => return "Resource not found.".to_string(),
            409 => return "Resource conflict. The resource may already exist or be in use.".to_string(),
            429 => return "Rate limit exceeded. Please try again later.".to_string(),
            400 => {
                if let Some(code) = error.arm_error_code() {
                    return format!("Invalid request ({}). Check your parameters.", code);
                }
                return "Invalid request. Check your parameters.".to_string();
            }
            500 | 502 | 503 | 504 => {
                return "Azure service temporarily unavailable. Please try again.".to_string()
            }
            _ => {}
        }
    }

    if let Error::Send { .. } = error {
        return "Request failed. Check your network connection and try again.".to_string();
    }

    // Truncate long error messages and remove potential sensitive data
    let error_str = error.to_string();
    let sanitized = error_str
        .chars()
        .filter(|c| c.is_ascii_graphic() || *c == ' ')
        .take(120)
        .collect::<String>();

    if sanitized.len() < error_str.len() {
        format!("{}...", sanitized)
    } else {
        sanitized
    }
}

//! Error taxonomy for API round trips.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("not found: {}", detail.as_deref().unwrap_or("no detail"))]
    NotFound { detail: Option<String> },

    /// Any other non-2xx response.
    #[error("server returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("cannot read upload {}: {source}", path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// HTTP status, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server's `detail` message, when it sent a string one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::NotFound { detail } | ApiError::Server { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let detail = match response.text().await {
            Ok(body) => parse_detail(&body),
            Err(err) => {
                tracing::debug!(error = %err, "unreadable error body");
                None
            }
        };

        if status == 404 {
            ApiError::NotFound { detail }
        } else {
            ApiError::Server { status, detail }
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Validation errors arrive as arrays under `detail`; only strings are kept.
fn parse_detail(body: &str) -> Option<String> {
    let body: ErrorBody = serde_json::from_str(body).ok()?;
    match body.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

/// User-facing message for a failed call: the server's detail, or `fallback`.
pub fn error_message(err: &ApiError, fallback: &str) -> String {
    err.detail().unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_detail_is_extracted() {
        assert_eq!(
            parse_detail(r#"{"detail":"Email already registered"}"#).as_deref(),
            Some("Email already registered")
        );
    }

    #[test]
    fn structured_or_missing_detail_is_ignored() {
        assert_eq!(parse_detail(r#"{"detail":[{"loc":["body","email"]}]}"#), None);
        assert_eq!(parse_detail(r#"{"message":"nope"}"#), None);
        assert_eq!(parse_detail("<html>502</html>"), None);
    }

    #[test]
    fn message_falls_back_without_detail() {
        let err = ApiError::Server {
            status: 500,
            detail: None,
        };
        assert_eq!(error_message(&err, "Failed to save"), "Failed to save");
        assert!(!err.is_bad_request());

        let err = ApiError::Server {
            status: 400,
            detail: Some("Slug taken".into()),
        };
        assert_eq!(error_message(&err, "Failed to save"), "Slug taken");
        assert!(err.is_bad_request());
    }

    #[test]
    fn not_found_reports_404() {
        let err = ApiError::NotFound { detail: None };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "not found: no detail");
    }
}

//! Shared transport: base URL, bearer token, request ids.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use cms_kernel::settings::ApiSettings;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::{NoContext, Timestamp, Uuid};

use crate::error::ApiError;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for one CMS API instance.
///
/// Cheap to clone; clones share the connection pool and the session token.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = settings.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().map_err(ApiError::Network)?;
        Ok(Self::with_client(http, &settings.base_url))
    }

    /// Reuse an existing [`reqwest::Client`].
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token sent as `Authorization: Bearer` on subsequent requests.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|p| p.into_inner()) = token;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> PreparedRequest {
        let request_id = Uuid::new_v7(Timestamp::now(NoContext)).to_string();
        let mut builder = self
            .http
            .request(method.clone(), self.url(path))
            .header(REQUEST_ID_HEADER, &request_id);
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        PreparedRequest {
            builder,
            method,
            path: path.to_string(),
            request_id,
        }
    }
}

/// A request with its correlation fields, ready to send.
pub(crate) struct PreparedRequest {
    pub(crate) builder: RequestBuilder,
    method: Method,
    path: String,
    request_id: String,
}

impl PreparedRequest {
    pub(crate) fn map(mut self, f: impl FnOnce(RequestBuilder) -> RequestBuilder) -> Self {
        self.builder = f(self.builder);
        self
    }

    /// Send and require a 2xx status.
    pub(crate) async fn send(self) -> Result<Response, ApiError> {
        tracing::debug!(
            method = %self.method,
            path = %self.path,
            request_id = %self.request_id,
            "sending request"
        );

        let response = self.builder.send().await.map_err(|err| {
            tracing::warn!(
                method = %self.method,
                path = %self.path,
                request_id = %self.request_id,
                error = %err,
                "request failed"
            );
            ApiError::Network(err)
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(
                status = status.as_u16(),
                request_id = %self.request_id,
                "request succeeded"
            );
            return Ok(response);
        }

        let err = ApiError::from_response(response).await;
        tracing::warn!(
            method = %self.method,
            path = %self.path,
            status = status.as_u16(),
            request_id = %self.request_id,
            error = %err,
            "request rejected"
        );
        Err(err)
    }

    /// Send and decode a JSON body.
    pub(crate) async fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let response = self.send().await?;
        response.json::<T>().await.map_err(ApiError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://cms.test/api/");
        assert_eq!(client.url("/users"), "http://cms.test/api/users");
    }

    #[test]
    fn token_is_shared_between_clones() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://cms.test");
        let clone = client.clone();
        client.set_token(Some("abc".into()));
        assert_eq!(clone.token().as_deref(), Some("abc"));
        clone.set_token(None);
        assert_eq!(client.token(), None);
    }
}

//! Request gateway for the budgeting REST API.
//!
//! Every outbound call goes through [`ApiClient`]. It attaches the bearer
//! token from the [`CredentialStore`], classifies the response and tears the
//! session down when the server answers 401.

use std::sync::Arc;

use reqwest::{header, Client, Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::auth::CredentialStore;
use crate::config::Config;
use crate::navigation::{Navigator, Routes};

use super::ApiError;

/// API client for the budgeting backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    path_prefix: String,
    credentials: Arc<CredentialStore>,
    navigator: Option<Arc<dyn Navigator>>,
    login_route: String,
}

impl ApiClient {
    /// Create a new API client for `base_url`. No navigator is attached, so a
    /// 401 only evicts the token.
    pub fn new(base_url: impl Into<String>, credentials: Arc<CredentialStore>) -> Result<Self, ApiError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            path_prefix: String::new(),
            credentials,
            navigator: None,
            login_route: Routes::default().login,
        })
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config, credentials: Arc<CredentialStore>) -> Result<Self, ApiError> {
        Ok(Self::new(config.api_base_url.clone(), credentials)?
            .with_path_prefix(config.api_path_prefix.clone())
            .with_login_route(config.routes.login.clone()))
    }

    /// Attach the host's navigation so a 401 also redirects to the login route
    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }

    /// Path segment prepended by the domain fetch helpers
    pub fn with_path_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.path_prefix = prefix.into();
        self
    }

    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    pub(crate) fn navigator(&self) -> Option<&Arc<dyn Navigator>> {
        self.navigator.as_ref()
    }

    pub(crate) fn login_route(&self) -> &str {
        &self.login_route
    }

    // ===== Verbs =====
    //
    // Each verb returns the parsed body, or `None` for 204 No Content.

    pub async fn get(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.request::<()>(Method::GET, path, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>, ApiError> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.request::<()>(Method::DELETE, path, None).await
    }

    // ===== Typed helpers =====
    //
    // No schema validation beyond what serde needs to build `T`. A 204 is
    // decoded from `null`, so `T = ()` or `Option<_>` accept it.

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.get(path).await?;
        Self::decode(path, body)
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = self.put(path, body).await?;
        Self::decode(path, body)
    }

    fn decode<T: DeserializeOwned>(path: &str, body: Option<Value>) -> Result<T, ApiError> {
        serde_json::from_value(body.unwrap_or(Value::Null)).map_err(|e| {
            ApiError::InvalidResponse(format!("Unexpected response shape from {}: {}", path, e))
        })
    }

    fn headers(token: Option<&str>) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = token {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidPayload("Token is not a valid header value".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    async fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<Value>, ApiError> {
        // Read once; a logout while this call is in flight does not affect it
        let token = self.credentials.read();
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .client
            .request(method.clone(), &url)
            .headers(Self::headers(token.as_deref())?);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| ApiError::InvalidPayload(e.to_string()))?;
            request = request.body(bytes);
        }

        debug!(%method, path, authenticated = token.is_some(), "Sending request");
        let response = request.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "Response received");

        if status == StatusCode::UNAUTHORIZED {
            self.end_session();
            return Err(ApiError::AuthenticationExpired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_failed_body(status.as_u16(), &body));
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse JSON response from {}: {}", path, e))
        })
    }

    /// Evict the token, then redirect to login. Both finish before the
    /// caller sees `AuthenticationExpired`.
    fn end_session(&self) {
        info!("Server rejected the session, clearing token");
        self.credentials.write(None);
        if let Some(navigator) = &self.navigator {
            navigator.go_to(&self.login_route);
        }
    }
}

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::api::{ApiClient, ApiError};

use super::CredentialStore;

/// Fixed path of the token endpoint
pub const AUTH_TOKEN_PATH: &str = "/budget/api/v1/auth/token";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: Option<String>,
}

/// Login and logout on top of the gateway.
#[derive(Clone)]
pub struct Session {
    api: ApiClient,
}

impl Session {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        self.api.credentials()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_authenticated()
    }

    /// Exchange username and password for a token and store it.
    ///
    /// Gateway errors pass through unchanged; a successful response without
    /// a usable token is `InvalidAuthResponse`.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = self
            .api
            .post(AUTH_TOKEN_PATH, &LoginRequest { username, password })
            .await?;

        let token = Self::extract_token(body).ok_or(ApiError::InvalidAuthResponse)?;
        self.credentials().write(Some(token));
        info!("Login successful");
        Ok(())
    }

    /// Drop the token and go to the login route
    pub fn logout(&self) {
        self.credentials().write(None);
        if let Some(navigator) = self.api.navigator() {
            navigator.go_to(self.api.login_route());
        }
        info!("Logged out");
    }

    fn extract_token(body: Option<Value>) -> Option<String> {
        let response: AuthResponse = serde_json::from_value(body?).ok()?;
        response.token.filter(|t| !t.is_empty())
    }
}

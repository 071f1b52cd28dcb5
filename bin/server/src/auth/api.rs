//! HTTP client for the remote login endpoint.

use alumni_console_access::{AuthApi, AuthError, LoginGrant, LoginInput};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{instrument, warn};

/// Login endpoint of the remote REST API.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: reqwest::Client,
    login_url: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl HttpAuthApi {
    /// Creates a client for the API at `api_base_url`.
    pub fn new(api_base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            login_url: format!("{}/auth/login", api_base_url.trim_end_matches('/')),
        }
    }

    /// Returns the login endpoint URL.
    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip_all, fields(url = %self.login_url))]
    async fn authenticate(&self, input: &LoginInput) -> Result<LoginGrant, AuthError> {
        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest {
                email: &input.email,
                password: &input.password,
            })
            .send()
            .await
            .map_err(|e| AuthError::NetworkFailure {
                details: e.to_string(),
            })?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            warn!(%status, "login endpoint failed");
            return Err(AuthError::ServerError {
                details: format!("login endpoint answered {status}"),
            });
        }

        response
            .json::<LoginGrant>()
            .await
            .map_err(|e| AuthError::ServerError {
                details: format!("undecodable login response: {e}"),
            })
    }
}

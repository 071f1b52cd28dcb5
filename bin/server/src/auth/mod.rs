//! Authentication module for the alumni console server.
//!
//! This module provides:
//! - Cookie-backed credential storage (`Token` and `Role` cookies)
//! - An HTTP client for the remote login endpoint
//! - The route guard applied to every request
//! - Login, logout and navigation-state routes
//!
//! # Access Model
//!
//! Every request re-reads the credential cookies and asks the
//! [`AccessPolicy`] for a decision. Nothing about the session is kept on the
//! server: the cookies are the only state, and the remote API is the only
//! party that validates the token.

pub mod api;
pub mod cookies;
pub mod middleware;
pub mod routes;

use crate::config::SessionConfig;
use alumni_console_access::{AccessPolicy, AuthApi};
use std::sync::Arc;

pub use api::HttpAuthApi;
pub use cookies::CookieCredentialStore;
pub use middleware::guard;
pub use routes::{login_form, login_submit, logout, nav};

/// Shared application state.
pub struct AppState {
    /// Validated access policy.
    pub policy: AccessPolicy,
    /// Remote login endpoint.
    pub auth_api: Arc<dyn AuthApi>,
    /// Credential cookie configuration.
    pub session_config: SessionConfig,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        policy: AccessPolicy,
        auth_api: Arc<dyn AuthApi>,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            policy,
            auth_api,
            session_config,
        }
    }

    /// Wraps a request's cookie jar as a credential store.
    pub fn credential_store(&self, jar: axum_extra::extract::CookieJar) -> CookieCredentialStore {
        CookieCredentialStore::new(jar, &self.session_config)
    }
}

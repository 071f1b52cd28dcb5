//! Login and logout.
//!
//! Login is the only operation that writes a credential and logout the only
//! one that clears it. The remote API is reached through [`AuthApi`] so the
//! mutators can run against any transport.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use tracing::{info, warn};

use crate::credential::{Credential, CredentialStore};
use crate::decision::{AccessPolicy, Decision};
use crate::error::AuthError;
use crate::role::RoleLabel;

/// Credentials submitted on the login form.
#[derive(Clone, Deserialize)]
pub struct LoginInput {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl LoginInput {
    /// Creates a login input.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful answer from the remote login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginGrant {
    /// Opaque API token.
    pub token: String,
    /// Role label as returned by the API.
    pub role: String,
}

/// Remote authentication endpoint.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges login input for a grant.
    async fn authenticate(&self, input: &LoginInput) -> Result<LoginGrant, AuthError>;
}

/// Authenticates and, on success, persists the credential.
///
/// The store is left untouched on every failure, including a grant whose
/// role is not a known label.
///
/// # Errors
///
/// Returns the API's error, `ServerError` for an unusable grant, or
/// `StorageUnavailable` if the credential cannot be written.
pub async fn login<S>(
    api: &dyn AuthApi,
    store: &mut S,
    input: &LoginInput,
) -> Result<Credential, AuthError>
where
    S: CredentialStore + Send + ?Sized,
{
    let grant = api.authenticate(input).await?;

    if grant.token.is_empty() {
        return Err(AuthError::ServerError {
            details: "login response carried an empty token".to_string(),
        });
    }
    let role: RoleLabel = grant.role.parse().map_err(|e| AuthError::ServerError {
        details: format!("login response: {e}"),
    })?;

    store
        .set(&grant.token, role)
        .map_err(|e| AuthError::StorageUnavailable {
            details: e.to_string(),
        })?;

    info!(email = %input.email, %role, "login succeeded");
    Ok(store.get())
}

/// Clears the credential and sends the visitor to the public home.
///
/// A failure to clear is logged; the redirect is issued regardless.
pub fn logout<S>(store: &mut S, policy: &AccessPolicy) -> Decision
where
    S: CredentialStore + ?Sized,
{
    if let Err(error) = store.clear() {
        warn!(%error, "failed to clear credential on logout");
    }
    Decision::Redirect(policy.public_home().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credential::MemoryCredentialStore;
    use crate::error::CredentialStoreError;
    use rootcause::prelude::Report;

    struct FakeApi {
        answer: Result<LoginGrant, AuthError>,
    }

    impl FakeApi {
        fn granting(token: &str, role: &str) -> Self {
            Self {
                answer: Ok(LoginGrant {
                    token: token.to_string(),
                    role: role.to_string(),
                }),
            }
        }

        fn failing(error: AuthError) -> Self {
            Self { answer: Err(error) }
        }
    }

    #[async_trait]
    impl AuthApi for FakeApi {
        async fn authenticate(&self, _input: &LoginInput) -> Result<LoginGrant, AuthError> {
            self.answer.clone()
        }
    }

    /// Store whose writes always fail.
    struct ReadOnlyStore;

    impl CredentialStore for ReadOnlyStore {
        fn get(&self) -> Credential {
            Credential::empty()
        }

        fn set(&mut self, _token: &str, _role: RoleLabel) -> Result<(), Report<CredentialStoreError>> {
            Err(CredentialStoreError::Unavailable {
                details: "read-only".to_string(),
            }
            .into())
        }

        fn clear(&mut self) -> Result<(), Report<CredentialStoreError>> {
            Err(CredentialStoreError::Unavailable {
                details: "read-only".to_string(),
            }
            .into())
        }
    }

    fn input() -> LoginInput {
        LoginInput::new("alice@example.com", "hunter2")
    }

    #[tokio::test]
    async fn login_success_writes_store() {
        let api = FakeApi::granting("tok_1", "Alumni");
        let mut store = MemoryCredentialStore::new();

        let credential = login(&api, &mut store, &input()).await.expect("login");

        assert_eq!(credential.token(), Some("tok_1"));
        assert_eq!(credential.role(), Some("Alumni"));
        assert_eq!(store.get(), credential);
    }

    #[tokio::test]
    async fn login_failure_leaves_store_untouched() {
        let previous = Credential::new(Some("old".to_string()), Some("Staff".to_string()));
        for error in [
            AuthError::InvalidCredentials,
            AuthError::NetworkFailure {
                details: "refused".to_string(),
            },
            AuthError::ServerError {
                details: "500".to_string(),
            },
        ] {
            let api = FakeApi::failing(error.clone());
            let mut store = MemoryCredentialStore::with_credential(previous.clone());

            let err = login(&api, &mut store, &input()).await.expect_err("fails");
            assert_eq!(err, error);
            assert_eq!(store.get(), previous);
        }
    }

    #[tokio::test]
    async fn login_with_unknown_role_is_server_error() {
        let api = FakeApi::granting("tok_1", "Superuser");
        let mut store = MemoryCredentialStore::new();

        let err = login(&api, &mut store, &input()).await.expect_err("fails");
        assert!(matches!(err, AuthError::ServerError { .. }));
        assert!(store.get().is_empty());
    }

    #[tokio::test]
    async fn login_with_empty_token_is_server_error() {
        let api = FakeApi::granting("", "Admin");
        let mut store = MemoryCredentialStore::new();

        let err = login(&api, &mut store, &input()).await.expect_err("fails");
        assert!(matches!(err, AuthError::ServerError { .. }));
        assert!(store.get().is_empty());
    }

    #[tokio::test]
    async fn login_storage_failure_is_reported() {
        let api = FakeApi::granting("tok_1", "Admin");
        let mut store = ReadOnlyStore;

        let err = login(&api, &mut store, &input()).await.expect_err("fails");
        assert!(matches!(err, AuthError::StorageUnavailable { .. }));
    }

    #[test]
    fn logout_clears_and_redirects_home() {
        let mut store = MemoryCredentialStore::with_credential(Credential::new(
            Some("tok".to_string()),
            Some("Admin".to_string()),
        ));
        let decision = logout(&mut store, &AccessPolicy::default());

        assert_eq!(decision, Decision::Redirect("/".to_string()));
        assert!(store.get().is_empty());
    }

    #[test]
    fn logout_redirects_even_if_clear_fails() {
        let decision = logout(&mut ReadOnlyStore, &AccessPolicy::default());
        assert_eq!(decision, Decision::Redirect("/".to_string()));
    }

    #[test]
    fn login_input_debug_redacts_password() {
        let rendered = format!("{:?}", input());
        assert!(rendered.contains("alice@example.com"));
        assert!(!rendered.contains("hunter2"));
    }
}

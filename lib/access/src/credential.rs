//! Credential persistence.
//!
//! The credential is the only piece of authentication state the console
//! keeps: an opaque API token and the role label the API returned with it.
//! Everything else is derived from it on each navigation.

use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::CredentialStoreError;
use crate::role::RoleLabel;

/// Persistence key of the token slot.
pub const TOKEN_KEY: &str = "Token";

/// Persistence key of the role slot.
pub const ROLE_KEY: &str = "Role";

/// Raw stored credential.
///
/// The role is kept as the stored string so that stale values can be
/// detected by the session resolver instead of failing here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(rename = "Token", default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(rename = "Role", default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

impl Credential {
    /// Creates a credential from raw slot values.
    #[must_use]
    pub fn new(token: Option<String>, role: Option<String>) -> Self {
        Self { token, role }
    }

    /// Creates the all-absent credential.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the token, treating an empty string as absent.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Returns the raw stored role string.
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Returns true if neither slot holds a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.role.is_none()
    }
}

/// Durable holder of the current credential.
///
/// `get` never fails: unreadable storage yields the empty credential so that
/// navigation keeps working as an anonymous visitor.
pub trait CredentialStore {
    /// Reads the current credential.
    fn get(&self) -> Credential;

    /// Replaces the stored credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn set(&mut self, token: &str, role: RoleLabel) -> Result<(), Report<CredentialStoreError>>;

    /// Removes the stored credential.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn clear(&mut self) -> Result<(), Report<CredentialStoreError>>;
}

/// In-memory credential store.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    credential: Credential,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding raw slot values, including stale ones.
    #[must_use]
    pub fn with_credential(credential: Credential) -> Self {
        Self { credential }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Credential {
        self.credential.clone()
    }

    fn set(&mut self, token: &str, role: RoleLabel) -> Result<(), Report<CredentialStoreError>> {
        self.credential = Credential::new(Some(token.to_string()), Some(role.to_string()));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Report<CredentialStoreError>> {
        self.credential = Credential::empty();
        Ok(())
    }
}

/// Credential store backed by a JSON file.
///
/// The file holds `{"Token": ..., "Role": ...}` and survives restarts.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store at the given path. The file need not exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, credential: &Credential) -> Result<(), Report<CredentialStoreError>> {
        let json = serde_json::to_vec(credential).map_err(|e| CredentialStoreError::Unavailable {
            details: e.to_string(),
        })?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| CredentialStoreError::Unavailable {
            details: format!("{}: {e}", tmp.display()),
        })?;
        fs::rename(&tmp, &self.path).map_err(|e| CredentialStoreError::Unavailable {
            details: format!("{}: {e}", self.path.display()),
        })?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Credential {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Credential::empty(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "credential file unreadable");
                return Credential::empty();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(credential) => credential,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "credential file corrupt");
                Credential::empty()
            }
        }
    }

    fn set(&mut self, token: &str, role: RoleLabel) -> Result<(), Report<CredentialStoreError>> {
        self.write(&Credential::new(
            Some(token.to_string()),
            Some(role.to_string()),
        ))
    }

    fn clear(&mut self) -> Result<(), Report<CredentialStoreError>> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CredentialStoreError::Unavailable {
                details: format!("{}: {e}", self.path.display()),
            }
            .into()),
        }
    }
}

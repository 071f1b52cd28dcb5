//! Session resolution.
//!
//! A session is never stored. It is recomputed from the credential on every
//! navigation, and any credential that cannot be trusted resolves to
//! `Anonymous`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credential::Credential;
use crate::role::RoleLabel;

/// Authentication state of the current visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Session {
    /// No usable credential.
    Anonymous,
    /// Logged in with the given role.
    Authenticated(RoleLabel),
}

impl Session {
    /// Derives the session from a stored credential.
    ///
    /// A missing token, a missing role, or an unrecognized role all yield
    /// `Anonymous`. A role is never guessed.
    #[must_use]
    pub fn resolve(credential: &Credential) -> Self {
        if credential.token().is_none() {
            return Self::Anonymous;
        }

        let Some(raw) = credential.role() else {
            return Self::Anonymous;
        };

        match raw.parse::<RoleLabel>() {
            Ok(role) => Self::Authenticated(role),
            Err(error) => {
                debug!(%error, "ignoring stale credential");
                Self::Anonymous
            }
        }
    }

    /// Returns the role if authenticated.
    #[must_use]
    pub fn role(&self) -> Option<RoleLabel> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(role) => Some(*role),
        }
    }

    /// Returns true if the visitor is logged in.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

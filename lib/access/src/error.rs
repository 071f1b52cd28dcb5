//! Error types for the access crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `ConfigurationError`: Invalid route table or redirect targets (fatal at startup)
//! - `StaleCredentialError`: Stored credential that cannot be trusted (recovered locally)
//! - `CredentialStoreError`: Credential persistence failures
//! - `AuthError`: Login failures surfaced to the user

use crate::role::RoleLabel;
use std::fmt;

/// Errors detected while validating access configuration.
///
/// These are raised eagerly when the route table and policy are built,
/// never while deciding a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// Route prefix is not an absolute path.
    InvalidPrefix { prefix: String },
    /// Two route entries normalize to the same prefix.
    AmbiguousRoute { prefix: String },
    /// A role's dashboard is not inside that role's area.
    HomeOutsideArea { role: RoleLabel, home: String },
    /// A redirect target would itself be refused for the visitor sent there.
    RedirectTargetRestricted { target: String, reason: String },
    /// Configuration could not be loaded.
    Load { reason: String },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPrefix { prefix } => {
                write!(f, "route prefix '{prefix}' must start with '/'")
            }
            Self::AmbiguousRoute { prefix } => {
                write!(f, "ambiguous route table: prefix '{prefix}' is declared more than once")
            }
            Self::HomeOutsideArea { role, home } => {
                write!(f, "home '{home}' for role {role} is not scoped to that role")
            }
            Self::RedirectTargetRestricted { target, reason } => {
                write!(f, "redirect target '{target}' is restricted: {reason}")
            }
            Self::Load { reason } => {
                write!(f, "failed to load configuration: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

/// A stored credential that cannot be trusted.
///
/// The resolver recovers from these by treating the visitor as anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleCredentialError {
    /// The stored role is not a known role label.
    UnknownRole { role: String },
}

impl fmt::Display for StaleCredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRole { role } => write!(f, "unknown role label: '{role}'"),
        }
    }
}

impl std::error::Error for StaleCredentialError {}

/// Errors from writing to a credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStoreError {
    /// The underlying storage cannot be written.
    Unavailable { details: String },
}

impl fmt::Display for CredentialStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { details } => {
                write!(f, "credential storage unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for CredentialStoreError {}

/// Errors from a login attempt.
///
/// None of these mutate the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The API rejected the submitted credentials.
    InvalidCredentials,
    /// The API could not be reached.
    NetworkFailure { details: String },
    /// The API answered with an error or an unusable response.
    ServerError { details: String },
    /// Login succeeded but the credential could not be persisted.
    StorageUnavailable { details: String },
}

impl AuthError {
    /// Message suitable for showing on the login page.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid email or password.",
            Self::NetworkFailure { .. } => "Could not reach the server. Please try again.",
            Self::ServerError { .. } => "The server could not complete the login.",
            Self::StorageUnavailable { .. } => "Your browser refused to store the login.",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::NetworkFailure { details } => write!(f, "network failure: {details}"),
            Self::ServerError { details } => write!(f, "server error: {details}"),
            Self::StorageUnavailable { details } => {
                write!(f, "credential storage unavailable: {details}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_route_display() {
        let err = ConfigurationError::AmbiguousRoute {
            prefix: "/admin".to_string(),
        };
        assert!(err.to_string().contains("ambiguous"));
        assert!(err.to_string().contains("/admin"));
    }

    #[test]
    fn home_outside_area_display() {
        let err = ConfigurationError::HomeOutsideArea {
            role: RoleLabel::Staff,
            home: "/staff/dashboard".to_string(),
        };
        assert!(err.to_string().contains("Staff"));
        assert!(err.to_string().contains("/staff/dashboard"));
    }

    #[test]
    fn stale_role_display() {
        let err = StaleCredentialError::UnknownRole {
            role: "bogus-role".to_string(),
        };
        assert!(err.to_string().contains("bogus-role"));
    }

    #[test]
    fn auth_error_display() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
        let err = AuthError::NetworkFailure {
            details: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn auth_error_user_message_hides_details() {
        let err = AuthError::ServerError {
            details: "stack trace from upstream".to_string(),
        };
        assert!(!err.user_message().contains("stack trace"));
    }
}

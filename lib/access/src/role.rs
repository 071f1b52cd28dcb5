//! Role labels scoping the console's areas.
//!
//! Each role owns a disjoint area of the console. There is no hierarchy:
//! an admin has no access to the staff area and vice versa.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StaleCredentialError;

/// Role of an authenticated console user.
///
/// The string form (`"Admin"`, `"Staff"`, `"Alumni"`) is what the remote API
/// returns and what the credential store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleLabel {
    /// Association administrators.
    Admin,
    /// Association staff.
    Staff,
    /// Alumni members.
    Alumni,
}

impl RoleLabel {
    /// Every role label.
    pub const ALL: [RoleLabel; 3] = [Self::Admin, Self::Staff, Self::Alumni];

    /// Returns the persisted string form.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Staff => "Staff",
            Self::Alumni => "Alumni",
        }
    }

    /// Returns the dashboard root for this role.
    #[must_use]
    pub fn home(&self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::Staff => "/staff/dashboard",
            Self::Alumni => "/alumni/dashboard",
        }
    }

    /// Returns the area prefix owned by this role.
    #[must_use]
    pub fn area(&self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::Staff => "/staff",
            Self::Alumni => "/alumni",
        }
    }
}

impl fmt::Display for RoleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleLabel {
    type Err = StaleCredentialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| StaleCredentialError::UnknownRole {
                role: s.to_string(),
            })
    }
}

/// Returns the dashboard root path for a role.
#[must_use]
pub fn home_for(role: RoleLabel) -> &'static str {
    role.home()
}

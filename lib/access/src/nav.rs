//! Navigation bar state.
//!
//! The page renderer consumes [`NavState`] to decide which account links
//! to show. It carries no rendering of its own.

use serde::{Deserialize, Serialize};

use crate::role::{RoleLabel, home_for};
use crate::session::Session;

/// Account affordances for the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    /// Role of the logged-in user, if any.
    pub role: Option<RoleLabel>,
    /// Show the "Log in" link.
    pub show_login: bool,
    /// Show the "Sign up" link.
    pub show_signup: bool,
    /// Show the "Log out" link.
    pub show_logout: bool,
    /// Dashboard link for the logged-in user.
    pub dashboard: Option<String>,
}

impl NavState {
    /// Derives the navigation state from a session.
    #[must_use]
    pub fn for_session(session: &Session) -> Self {
        match session.role() {
            None => Self {
                role: None,
                show_login: true,
                show_signup: true,
                show_logout: false,
                dashboard: None,
            },
            Some(role) => Self {
                role: Some(role),
                show_login: false,
                show_signup: false,
                show_logout: true,
                dashboard: Some(home_for(role).to_string()),
            },
        }
    }
}

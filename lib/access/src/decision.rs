//! Authorization decisions.
//!
//! [`AccessPolicy::decide`] is the single place where a session and a route
//! classification are turned into "render it" or "go elsewhere". It is pure:
//! the same inputs always produce the same decision.

use rootcause::prelude::Report;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::credential::Credential;
use crate::error::ConfigurationError;
use crate::role::{RoleLabel, home_for};
use crate::route::{Classification, RouteTable};
use crate::session::Session;

/// Default landing page for anonymous visitors.
pub const DEFAULT_PUBLIC_HOME: &str = "/";

/// Default login page.
pub const DEFAULT_LOGIN_PAGE: &str = "/login";

/// Outcome of one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Render the requested route.
    Allow,
    /// Replace the navigation with the given path.
    Redirect(String),
}

impl Decision {
    /// Returns the redirect target, if any.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Redirect(target) => Some(target),
        }
    }

    /// Returns true if the route may be rendered.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Where an authenticated user is sent when requesting another role's area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForeignAreaRedirect {
    /// Send them to the login page. Because the login page is guest-only,
    /// the next navigation lands on their own dashboard.
    #[default]
    LoginPage,
    /// Send them straight to their own dashboard.
    OwnHome,
}

/// Validated access policy: the route table plus redirect targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    routes: RouteTable,
    public_home: String,
    login_page: String,
    foreign_area: ForeignAreaRedirect,
}

impl AccessPolicy {
    /// Builds a policy, checking that every redirect it can issue is
    /// reachable by the visitor it is issued to.
    ///
    /// # Errors
    ///
    /// Returns an error if a role's home is outside that role's area, if the
    /// public home or login page are role-scoped or not absolute, or if the
    /// login page is not a plain guest-only path.
    pub fn new(
        routes: RouteTable,
        public_home: impl Into<String>,
        login_page: impl Into<String>,
        foreign_area: ForeignAreaRedirect,
    ) -> Result<Self, Report<ConfigurationError>> {
        let public_home = public_home.into();
        let login_page = login_page.into();

        for role in RoleLabel::ALL {
            let home = home_for(role);
            if routes.classify(home) != Classification::RoleScoped(role) {
                return Err(ConfigurationError::HomeOutsideArea {
                    role,
                    home: home.to_string(),
                }
                .into());
            }
        }

        for target in [&public_home, &login_page] {
            if !target.starts_with('/') {
                return Err(ConfigurationError::RedirectTargetRestricted {
                    target: target.clone(),
                    reason: "not an absolute path".to_string(),
                }
                .into());
            }
            if let Classification::RoleScoped(role) = routes.classify(target) {
                return Err(ConfigurationError::RedirectTargetRestricted {
                    target: target.clone(),
                    reason: format!("scoped to role {role}"),
                }
                .into());
            }
        }

        let plain = !login_page.contains(|c: char| {
            c.is_whitespace() || matches!(c, '?' | '#' | '%' | '{' | '}' | '*' | '"' | '<' | '>')
        });
        if !plain {
            return Err(ConfigurationError::RedirectTargetRestricted {
                target: login_page,
                reason: "login page must be a plain path".to_string(),
            }
            .into());
        }
        if routes.classify(&login_page) != Classification::GuestOnly {
            return Err(ConfigurationError::RedirectTargetRestricted {
                target: login_page,
                reason: "login page must be guest-only".to_string(),
            }
            .into());
        }

        Ok(Self {
            routes,
            public_home,
            login_page,
            foreign_area,
        })
    }

    /// Decides whether a session may view a route of the given classification.
    #[must_use]
    pub fn decide(&self, session: &Session, classification: Classification) -> Decision {
        match (session, classification) {
            (Session::Anonymous, Classification::Public | Classification::GuestOnly) => {
                Decision::Allow
            }
            (Session::Anonymous, Classification::RoleScoped(_)) => {
                Decision::Redirect(self.public_home.clone())
            }
            (Session::Authenticated(_), Classification::Public) => Decision::Allow,
            (Session::Authenticated(role), Classification::GuestOnly) => {
                Decision::Redirect(home_for(*role).to_string())
            }
            (Session::Authenticated(role), Classification::RoleScoped(required))
                if *role == required =>
            {
                Decision::Allow
            }
            (Session::Authenticated(role), Classification::RoleScoped(_)) => {
                match self.foreign_area {
                    ForeignAreaRedirect::LoginPage => Decision::Redirect(self.login_page.clone()),
                    ForeignAreaRedirect::OwnHome => Decision::Redirect(home_for(*role).to_string()),
                }
            }
        }
    }

    /// Resolves the credential, classifies the path and decides.
    #[must_use]
    pub fn evaluate(&self, credential: &Credential, path: &str) -> Decision {
        let session = Session::resolve(credential);
        let classification = self.routes.classify(path);
        let decision = self.decide(&session, classification);
        debug!(path, ?session, ?classification, ?decision, "access decision");
        decision
    }

    /// Returns the route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Returns the landing page for anonymous visitors.
    #[must_use]
    pub fn public_home(&self) -> &str {
        &self.public_home
    }

    /// Returns the login page.
    #[must_use]
    pub fn login_page(&self) -> &str {
        &self.login_page
    }

    /// Returns the foreign-area redirect mode.
    #[must_use]
    pub fn foreign_area(&self) -> ForeignAreaRedirect {
        self.foreign_area
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self {
            routes: RouteTable::default(),
            public_home: DEFAULT_PUBLIC_HOME.to_string(),
            login_page: DEFAULT_LOGIN_PAGE.to_string(),
            foreign_area: ForeignAreaRedirect::default(),
        }
    }
}

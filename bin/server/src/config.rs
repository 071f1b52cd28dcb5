//! Centralized server configuration.
//!
//! This module provides strongly-typed configuration for the server,
//! loaded via the `config` crate from an optional file named by
//! `CONSOLE_CONFIG` and from environment variables (`__` separates nested
//! keys, e.g. `ACCESS__FOREIGN_AREA=own-home`).

use alumni_console_access::{
    AccessPolicy, ConfigurationError, ForeignAreaRedirect, RouteSpec, RouteTable,
};
use rootcause::prelude::{Report, ResultExt};
use serde::Deserialize;

/// Environment variable naming an optional configuration file.
pub const CONFIG_FILE_VAR: &str = "CONSOLE_CONFIG";

/// Server configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address the server listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Base URL of the remote REST API (e.g. `https://api.example.org`).
    pub api_base_url: String,

    /// Credential cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,

    /// Route table and redirect targets.
    #[serde(default)]
    pub access: AccessConfig,
}

/// Credential cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Whether to set the Secure flag on cookies (requires HTTPS).
    /// Defaults to true for production safety; set to false for local HTTP development.
    #[serde(default = "default_secure_cookies")]
    pub secure_cookies: bool,

    /// How long the browser keeps the credential cookies, in days.
    #[serde(default = "default_credential_max_age_days")]
    pub credential_max_age_days: i64,
}

/// Route table and redirect targets.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Landing page for anonymous visitors and after logout.
    #[serde(default = "default_public_home")]
    pub public_home: String,

    /// Login page.
    #[serde(default = "default_login_page")]
    pub login_page: String,

    /// Redirect for users requesting another role's area.
    #[serde(default)]
    pub foreign_area: ForeignAreaRedirect,

    /// Route table; the built-in table is used when absent.
    #[serde(default)]
    pub routes: Option<Vec<RouteSpec>>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_secure_cookies() -> bool {
    true
}

fn default_credential_max_age_days() -> i64 {
    30
}

fn default_public_home() -> String {
    alumni_console_access::decision::DEFAULT_PUBLIC_HOME.to_string()
}

fn default_login_page() -> String {
    alumni_console_access::decision::DEFAULT_LOGIN_PAGE.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secure_cookies: default_secure_cookies(),
            credential_max_age_days: default_credential_max_age_days(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            public_home: default_public_home(),
            login_page: default_login_page(),
            foreign_area: ForeignAreaRedirect::default(),
            routes: None,
        }
    }
}

impl AccessConfig {
    /// Validates the configuration into an access policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the route table or redirect targets are invalid.
    pub fn into_policy(self) -> Result<AccessPolicy, Report<ConfigurationError>> {
        let routes = match self.routes {
            Some(specs) => RouteTable::new(specs)?,
            None => RouteTable::default(),
        };
        AccessPolicy::new(routes, self.public_home, self.login_page, self.foreign_area)
    }
}

impl ServerConfig {
    /// Loads configuration from the optional file and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required configuration is missing or invalid.
    pub fn from_env() -> Result<Self, Report<ConfigurationError>> {
        let mut builder = config::Config::builder();
        if let Ok(path) = std::env::var(CONFIG_FILE_VAR) {
            builder = builder.add_source(config::File::with_name(&path).required(true));
        }
        let builder = builder.add_source(
            config::Environment::default()
                .separator("__")
                .try_parsing(true),
        );
        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, Report<ConfigurationError>> {
        builder
            .build()
            .and_then(config::Config::try_deserialize)
            .context_with(|| ConfigurationError::Load {
                reason: "invalid server settings".to_string(),
            })
    }
}

//! Session and role-based access control for the alumni console.
//!
//! This crate provides:
//! - Credential persistence (`CredentialStore`, `MemoryCredentialStore`, `FileCredentialStore`)
//! - Session resolution (`Session`)
//! - Route classification (`RouteTable`, `RouteSpec`, `Classification`)
//! - Access decisions (`AccessPolicy`, `Decision`)
//! - Navigation bar state (`NavState`)
//! - Login and logout (`login`, `logout`, `AuthApi`)
//!
//! # Access Control Model
//!
//! Each role (`Admin`, `Staff`, `Alumni`) owns a disjoint area of the
//! console. A visitor's session is derived from the stored credential on
//! every navigation; anything that cannot be trusted is anonymous.
//!
//! # Example
//!
//! ```
//! use alumni_console_access::{
//!     AccessPolicy, CredentialStore, Decision, MemoryCredentialStore, RoleLabel,
//! };
//!
//! let policy = AccessPolicy::default();
//! let mut store = MemoryCredentialStore::new();
//!
//! assert_eq!(
//!     policy.evaluate(&store.get(), "/admin/dashboard"),
//!     Decision::Redirect("/".to_string())
//! );
//!
//! store.set("tok_123", RoleLabel::Admin).expect("memory store");
//! assert_eq!(policy.evaluate(&store.get(), "/admin/dashboard"), Decision::Allow);
//! assert_eq!(
//!     policy.evaluate(&store.get(), "/login"),
//!     Decision::Redirect("/admin/dashboard".to_string())
//! );
//! ```

pub mod auth;
pub mod credential;
pub mod decision;
pub mod error;
pub mod nav;
pub mod role;
pub mod route;
pub mod session;

// Re-export main types at crate root
pub use auth::{AuthApi, LoginGrant, LoginInput, login, logout};
pub use credential::{
    Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore, ROLE_KEY, TOKEN_KEY,
};
pub use decision::{AccessPolicy, Decision, ForeignAreaRedirect};
pub use error::{AuthError, ConfigurationError, CredentialStoreError, StaleCredentialError};
pub use nav::NavState;
pub use role::{RoleLabel, home_for};
pub use route::{Classification, RouteSpec, RouteTable};
pub use session::Session;

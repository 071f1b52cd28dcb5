//! Cookie-backed credential store.
//!
//! The browser keeps the credential in two cookies named after the
//! persistence slots, so it survives reloads until logout or cookie expiry.

use alumni_console_access::{
    Credential, CredentialStore, CredentialStoreError, ROLE_KEY, RoleLabel, TOKEN_KEY,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rootcause::prelude::Report;
use time::Duration as TimeDuration;

use crate::config::SessionConfig;

/// Credential store over a request's cookie jar.
///
/// Writes are collected in the jar; return [`Self::into_jar`] from the
/// handler so they reach the browser.
#[derive(Debug, Clone)]
pub struct CookieCredentialStore {
    jar: CookieJar,
    secure: bool,
    max_age: TimeDuration,
}

impl CookieCredentialStore {
    /// Wraps a cookie jar.
    pub fn new(jar: CookieJar, config: &SessionConfig) -> Self {
        Self {
            jar,
            secure: config.secure_cookies,
            max_age: TimeDuration::days(config.credential_max_age_days),
        }
    }

    /// Returns the jar carrying any pending cookie changes.
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn value(&self, name: &str) -> Option<String> {
        self.jar
            .get(name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    }

    fn credential_cookie(&self, name: &'static str, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(self.max_age)
            .build()
    }

    fn removal_cookie(name: &'static str) -> Cookie<'static> {
        Cookie::build((name, ""))
            .path("/")
            .max_age(TimeDuration::ZERO)
            .build()
    }
}

impl CredentialStore for CookieCredentialStore {
    fn get(&self) -> Credential {
        Credential::new(self.value(TOKEN_KEY), self.value(ROLE_KEY))
    }

    fn set(&mut self, token: &str, role: RoleLabel) -> Result<(), Report<CredentialStoreError>> {
        let token = self.credential_cookie(TOKEN_KEY, token.to_string());
        let role = self.credential_cookie(ROLE_KEY, role.to_string());
        self.jar = self.jar.clone().add(token).add(role);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Report<CredentialStoreError>> {
        self.jar = self
            .jar
            .clone()
            .add(Self::removal_cookie(TOKEN_KEY))
            .add(Self::removal_cookie(ROLE_KEY));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alumni_console_access::Session;

    fn store(jar: CookieJar) -> CookieCredentialStore {
        CookieCredentialStore::new(jar, &SessionConfig::default())
    }

    #[test]
    fn reads_named_cookies() {
        let jar = CookieJar::new()
            .add(Cookie::new(TOKEN_KEY, "tok"))
            .add(Cookie::new(ROLE_KEY, "Staff"));
        let credential = store(jar).get();
        assert_eq!(credential.token(), Some("tok"));
        assert_eq!(credential.role(), Some("Staff"));
    }

    #[test]
    fn empty_jar_is_empty_credential() {
        assert!(store(CookieJar::new()).get().is_empty());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = store(CookieJar::new());
        store.set("tok_9", RoleLabel::Alumni).expect("set");
        let credential = store.get();
        assert_eq!(credential.token(), Some("tok_9"));
        assert_eq!(credential.role(), Some("Alumni"));
    }

    #[test]
    fn credential_cookies_are_http_only_and_persistent() {
        let mut store = store(CookieJar::new());
        store.set("tok_9", RoleLabel::Admin).expect("set");
        let jar = store.into_jar();
        let cookie = jar.get(TOKEN_KEY).expect("token cookie");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(TimeDuration::days(30)));
    }

    #[test]
    fn clear_makes_session_anonymous() {
        let jar = CookieJar::new()
            .add(Cookie::new(TOKEN_KEY, "tok"))
            .add(Cookie::new(ROLE_KEY, "Admin"));
        let mut store = store(jar);
        store.clear().expect("clear");

        assert!(store.get().is_empty());
        assert_eq!(Session::resolve(&store.get()), Session::Anonymous);
    }
}

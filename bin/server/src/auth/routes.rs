//! Authentication routes for login, logout, and navigation state.

use alumni_console_access::{AuthError, CredentialStore, LoginInput, NavState, Session, home_for};
use axum::{
    Form, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;
use tracing::warn;

use super::AppState;
use crate::pages;

/// Renders the login form.
pub async fn login_form(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::login_page(state.policy.login_page(), None))
}

/// Handles a submitted login form.
///
/// On success the credential cookies are set and the user is sent to their
/// dashboard. On failure the form is shown again with a message and no
/// cookie is touched.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(input): Form<LoginInput>,
) -> Response {
    let mut store = state.credential_store(jar);

    match alumni_console_access::login(state.auth_api.as_ref(), &mut store, &input).await {
        Ok(credential) => {
            let target = Session::resolve(&credential)
                .role()
                .map_or(state.policy.public_home(), |role| home_for(role))
                .to_string();
            (store.into_jar(), Redirect::to(&target)).into_response()
        }
        Err(error) => {
            warn!(email = %input.email, %error, "login failed");
            (
                login_failure_status(&error),
                Html(pages::login_page(
                    state.policy.login_page(),
                    Some(error.user_message()),
                )),
            )
                .into_response()
        }
    }
}

/// Logs out by clearing the credential cookies.
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let mut store = state.credential_store(jar);
    let decision = alumni_console_access::logout(&mut store, &state.policy);
    let target = decision
        .redirect_target()
        .unwrap_or(state.policy.public_home())
        .to_string();
    (store.into_jar(), Redirect::to(&target)).into_response()
}

/// Returns the navigation bar state for the current visitor.
pub async fn nav(State(state): State<Arc<AppState>>, jar: CookieJar) -> Json<NavState> {
    let session = Session::resolve(&state.credential_store(jar).get());
    Json(NavState::for_session(&session))
}

fn login_failure_status(error: &AuthError) -> StatusCode {
    match error {
        AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AuthError::NetworkFailure { .. } | AuthError::ServerError { .. } => {
            StatusCode::BAD_GATEWAY
        }
        AuthError::StorageUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

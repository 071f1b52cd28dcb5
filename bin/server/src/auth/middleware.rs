//! Route guard applied to every request.

use alumni_console_access::{CredentialStore, Decision};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use super::AppState;

/// Evaluates the access policy before any handler runs.
///
/// A redirect decision replaces the whole response, so the requested page
/// is never rendered for a visitor who may not see it.
pub async fn guard(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    let credential = state.credential_store(jar).get();
    match state.policy.evaluate(&credential, request.uri().path()) {
        Decision::Allow => next.run(request).await,
        Decision::Redirect(target) => Redirect::to(&target).into_response(),
    }
}

//! Router assembly.

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::auth::{self, AppState};
use crate::pages;

/// Builds the console router with the route guard in front of every route.
///
/// The login form is mounted at the policy's login page.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            state.policy.login_page(),
            get(auth::login_form).post(auth::login_submit),
        )
        .route("/logout", get(auth::logout))
        .route("/api/nav", get(auth::nav))
        .fallback(pages::shell)
        .layer(middleware::from_fn_with_state(state.clone(), auth::guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

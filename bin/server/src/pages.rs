//! Minimal HTML shells.
//!
//! Page content is rendered by the front-end; the server only provides a
//! document for it to mount on and the login form.

use alumni_console_access::{CredentialStore, NavState, Session};
use axum::{extract::State, http::Uri, response::Html};
use axum_extra::extract::CookieJar;
use std::sync::Arc;

use crate::auth::AppState;

/// Renders the login form posting back to `action`, with an optional error
/// message.
pub fn login_page(action: &str, message: Option<&str>) -> String {
    let message = message
        .map(|m| format!(r#"<p class="login-error">{m}</p>"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"/><title>Log in</title></head>
<body>
<div class="login-page">
<h1>Log in to the alumni console</h1>
{message}
<form method="post" action="{action}">
<input type="email" name="email" required/>
<input type="password" name="password" required/>
<button type="submit">Log in</button>
</form>
</div>
</body>
</html>"#
    )
}

/// Document shell for any page the guard allowed.
pub async fn shell(State(state): State<Arc<AppState>>, jar: CookieJar, uri: Uri) -> Html<String> {
    let session = Session::resolve(&state.credential_store(jar).get());
    Html(render_shell(
        uri.path(),
        state.policy.login_page(),
        &NavState::for_session(&session),
    ))
}

fn render_shell(path: &str, login_page: &str, nav: &NavState) -> String {
    let mut links = Vec::new();
    if let Some(dashboard) = &nav.dashboard {
        links.push(format!(r#"<a href="{dashboard}">Dashboard</a>"#));
    }
    if nav.show_login {
        links.push(format!(r#"<a href="{login_page}">Log in</a>"#));
    }
    if nav.show_signup {
        links.push(r#"<a href="/signup">Sign up</a>"#.to_string());
    }
    if nav.show_logout {
        links.push(r#"<a href="/logout">Log out</a>"#.to_string());
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"/><title>Alumni console</title></head>
<body>
<nav>{}</nav>
<main id="app" data-path="{path}"></main>
</body>
</html>"#,
        links.join(" ")
    )
}

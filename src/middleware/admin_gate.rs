//! Admin session gate
//!
//! Wraps every `/admin` route. The session cookie is verified on each
//! request; anything without a valid session is sent to the login entry
//! point, and a signed-in admin hitting the login entry point is sent on to
//! the dashboard.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_cookies::{Cookie, Cookies};
use tracing::debug;

use crate::services::session_service::SESSION_COOKIE;
use crate::state::AppState;

pub const LOGIN_PATH: &str = "/admin/login";
pub const DASHBOARD_PATH: &str = "/admin/dashboard";

/// Removal cookie matching the path the session cookie was set on
pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}

pub async fn admin_gate(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request,
    next: Next,
) -> Response {
    let on_login = request.uri().path() == LOGIN_PATH;

    let token = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let session = match token {
        Some(token) => match state.sessions.validate(&token) {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("Dropping stale admin cookie: {}", e);
                cookies.remove(expired_session_cookie());
                None
            }
        },
        None => None,
    };

    match (session, on_login) {
        (Some(_), true) => Redirect::to(DASHBOARD_PATH).into_response(),
        (Some(session), false) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        (None, true) => next.run(request).await,
        (None, false) => Redirect::to(LOGIN_PATH).into_response(),
    }
}

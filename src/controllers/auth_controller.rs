use axum::{
    extract::{rejection::JsonRejection, Extension, State},
    response::{IntoResponse, Redirect},
    Json,
};
use serde_json::{json, Value};
use tower_cookies::{cookie::SameSite, Cookie, Cookies};
use tracing::{info, warn};

use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::middleware::admin_gate::{expired_session_cookie, DASHBOARD_PATH, LOGIN_PATH};
use crate::models::auth::AdminSession;
use crate::services::session_service::SESSION_COOKIE;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

/// What the login form needs; only reached without a valid session
pub async fn login_info() -> Json<Value> {
    Json(json!({
        "login_required": true,
        "action": LOGIN_PATH,
        "fields": ["username", "password"]
    }))
}

/// Exchange the admin credential for a session cookie
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = body?;
    let token = match state.sessions.login(payload.username.trim(), &payload.password) {
        Ok(token) => token,
        Err(e @ AppError::Unauthorized(_)) => {
            warn!("🔒 Failed admin login for '{}'", payload.username);
            return Err(e);
        }
        Err(e) => return Err(e),
    };

    let mut cookie = Cookie::new(SESSION_COOKIE, token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(state.config.is_production());
    cookie.set_same_site(SameSite::Lax);
    cookies.add(cookie);

    info!("🔑 Admin '{}' signed in", payload.username.trim());
    Ok(Json(LoginResponse {
        success: true,
        redirect: DASHBOARD_PATH,
        expires_in_seconds: state.sessions.ttl().num_seconds(),
    }))
}

pub async fn logout(
    cookies: Cookies,
    Extension(session): Extension<AdminSession>,
) -> impl IntoResponse {
    cookies.remove(expired_session_cookie());
    info!("👋 Admin '{}' signed out", session.username);
    Redirect::to(LOGIN_PATH)
}

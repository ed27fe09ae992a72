use axum::{
    extract::{Extension, State},
    handler::Handler,
    middleware,
    routing::{get, post},
    Json, Router,
};

use crate::controllers::auth_controller::{login, login_info, logout};
use crate::controllers::dashboard_controller::{collect_stats, DashboardStats};
use crate::middleware::admin_gate::{DASHBOARD_PATH, LOGIN_PATH};
use crate::middleware::rate_limit::strict_rate_limit_middleware;
use crate::models::auth::AdminSession;
use crate::state::AppState;
use crate::utils::errors::AppResult;

/// Login entry point, logout and dashboard
pub fn admin_router(state: &AppState) -> Router<AppState> {
    let guarded_login = login.layer(middleware::from_fn_with_state(
        state.rate_limit.clone(),
        strict_rate_limit_middleware,
    ));

    Router::new()
        .route(LOGIN_PATH, get(login_info).post(guarded_login))
        .route("/admin/logout", post(logout))
        .route(DASHBOARD_PATH, get(dashboard))
}

async fn dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
) -> AppResult<Json<DashboardStats>> {
    Ok(Json(collect_stats(&state, session.username).await?))
}

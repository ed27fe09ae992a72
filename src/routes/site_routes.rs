use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

use crate::services::sitemap::render_sitemap;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub fn site_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "environment": state.config.environment,
        "data_source": state.config.data_source.as_str(),
        "timestamp": state.clock.now().to_rfc3339(),
    }))
}

async fn sitemap(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let vehicles = state.vehicles.list_active(None).await?;
    let posts = state.posts.list_published(None).await?;
    let xml = render_sitemap(&state.config.site_url, &vehicles, &posts);
    Ok(([(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml))
}

//! Router assembly
//!
//! Public routes, rate-limited submission routes and the admin surface behind
//! the session gate, wrapped in the shared tower layers.

pub mod auth_routes;
pub mod booking_routes;
pub mod post_routes;
pub mod site_routes;
pub mod vehicle_routes;

use std::time::Duration;

use axum::{middleware, Router};
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::{admin_gate, cors_layer};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let admin = Router::new()
        .merge(auth_routes::admin_router(&state))
        .merge(vehicle_routes::admin_router())
        .merge(post_routes::admin_router())
        .merge(booking_routes::admin_router())
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_gate));

    Router::new()
        .merge(site_routes::site_router())
        .merge(vehicle_routes::public_router())
        .merge(post_routes::public_router())
        .merge(booking_routes::submission_router(&state))
        .merge(admin)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    state.config.request_timeout_secs,
                )))
                .layer(CookieManagerLayer::new()),
        )
        .with_state(state)
}

//! Middleware
//!
//! Admin session gate, CORS and rate limiting.

pub mod admin_gate;
pub mod cors;
pub mod rate_limit;

pub use admin_gate::{admin_gate, DASHBOARD_PATH, LOGIN_PATH};
pub use cors::cors_layer;
pub use rate_limit::{rate_limit_middleware, strict_rate_limit_middleware, RateLimitState};

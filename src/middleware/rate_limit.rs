//! Rate limiting
//!
//! Fixed-window counter per client IP, kept in process memory. Applied to the
//! public submission endpoints and, with half the budget, to the admin login.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self::with_limits(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
        )
    }

    pub fn with_limits(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
        }
    }

    /// Same counters, half the budget
    pub fn strict(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            max_requests: (self.max_requests / 2).max(1),
            window_duration: self.window_duration,
        }
    }

    /// Count one request for `key`; fails once the window budget is spent
    pub async fn check_rate_limit(&self, key: &str) -> Result<(), AppError> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(key.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(())
    }
}

/// First hop of `x-forwarded-for` when a proxy sets it, otherwise the peer
/// address of the connection
fn client_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match forwarded {
        Some(ip) => ip.to_string(),
        None => request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    }
}

pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);
    let key = format!("{}:{}", request.uri().path(), ip);

    if let Err(e) = rate_limit_state.check_rate_limit(&key).await {
        warn!("🚦 Rate limit hit for {} on {}", ip, request.uri().path());
        return Err(e);
    }

    Ok(next.run(request).await)
}

/// Tighter budget for credential checks
pub async fn strict_rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    rate_limit_middleware(State(rate_limit_state.strict()), request, next).await
}

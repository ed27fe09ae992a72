use serde::{Deserialize, Serialize};

// Admin login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// Admin login response; the token itself only travels in the cookie
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub redirect: &'static str,
    pub expires_in_seconds: i64,
}

use serde::{Deserialize, Serialize};

/// Claims carried by the admin session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // admin username
    pub exp: i64,    // expiration timestamp
    pub iat: i64,    // issued at timestamp
}

/// Authenticated admin injected into request extensions by the gate
#[derive(Debug, Clone, PartialEq)]
pub struct AdminSession {
    pub username: String,
    pub expires_at: i64,
}

impl From<SessionClaims> for AdminSession {
    fn from(claims: SessionClaims) -> Self {
        Self {
            username: claims.sub,
            expires_at: claims.exp,
        }
    }
}

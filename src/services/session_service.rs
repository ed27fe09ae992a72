//! Admin sessions
//!
//! A single admin credential (username plus bcrypt hash) is exchanged for an
//! HS256 token that travels in an HttpOnly cookie. The token is verified on
//! every admin request; nothing about the session is trusted from the client.

use bcrypt::verify;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::EnvironmentConfig;
use crate::models::auth::{AdminSession, SessionClaims};
use crate::utils::errors::{AppError, AppResult};

pub const SESSION_COOKIE: &str = "rental_admin_session";

pub struct SessionService {
    admin_username: String,
    admin_password_hash: String,
    algorithm: Algorithm,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionService {
    pub fn new(config: &EnvironmentConfig) -> Self {
        Self {
            admin_username: config.admin_username.clone(),
            admin_password_hash: config.admin_password_hash.clone(),
            algorithm: Algorithm::HS256,
            ttl: Duration::hours(config.session_ttl_hours),
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_ref()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_ref()),
        }
    }

    /// Check the admin credential and issue a session token
    pub fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let password_ok = verify(password, &self.admin_password_hash)
            .map_err(|e| AppError::Hash(e.to_string()))?;

        if username != self.admin_username || !password_ok {
            return Err(AppError::Unauthorized("Invalid username or password".to_string()));
        }

        self.issue(username)
    }

    pub fn issue(&self, username: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generating session token: {}", e)))
    }

    /// Verify signature, expiry and subject
    pub fn validate(&self, token: &str) -> AppResult<AdminSession> {
        let validation = Validation::new(self.algorithm);
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Jwt(format!("Invalid session token: {}", e)))?;

        if claims.sub != self.admin_username {
            return Err(AppError::Jwt("Session subject is not the admin".to_string()));
        }

        Ok(claims.into())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> SessionService {
        let hash = bcrypt::hash("s3cret-pass", 4).unwrap();
        SessionService::new(&EnvironmentConfig::development(hash))
    }

    #[test]
    fn test_login_and_validate() {
        let service = service();
        let token = service.login("admin", "s3cret-pass").unwrap();
        let session = service.validate(&token).unwrap();
        assert_eq!(session.username, "admin");
        assert!(session.expires_at > Utc::now().timestamp());
    }

    #[test]
    fn test_login_rejects_bad_password() {
        let service = service();
        assert!(matches!(
            service.login("admin", "wrong"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_login_rejects_unknown_user() {
        let service = service();
        assert!(matches!(
            service.login("root", "s3cret-pass"),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_validate_rejects_tampered_token() {
        let service = service();
        let mut token = service.issue("admin").unwrap();
        token.push('x');
        assert!(service.validate(&token).is_err());
    }

    #[test]
    fn test_validate_rejects_foreign_secret() {
        let hash = bcrypt::hash("s3cret-pass", 4).unwrap();
        let mut other_config = EnvironmentConfig::development(hash);
        other_config.jwt_secret = "another-secret".to_string();
        let other = SessionService::new(&other_config);

        let token = other.issue("admin").unwrap();
        assert!(service().validate(&token).is_err());
    }

    #[test]
    fn test_validate_rejects_expired_token() {
        let service = service();
        let past = Utc::now() - Duration::hours(2);
        let claims = SessionClaims {
            sub: "admin".to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &service.encoding_key).unwrap();
        assert!(service.validate(&token).is_err());
    }
}

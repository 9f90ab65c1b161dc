//! JWT issuing and validation

use std::fmt::Debug;

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::domain::user::{Role, User, UserId};

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    /// HMAC secret for HS256 signing
    #[serde(default = "default_secret")]
    pub secret: String,
    /// Token lifetime in hours
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            expiration_hours: default_expiration_hours(),
        }
    }
}

/// Development fallback; override via configuration in any real deployment
fn default_secret() -> String {
    "insecure-dev-secret-change-me".to_string()
}

fn default_expiration_hours() -> i64 {
    24
}

/// Claims carried by an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject: the user ID
    pub sub: String,
    /// Marketplace role at issue time
    pub role: Role,
    /// Issued-at, seconds since epoch
    pub iat: i64,
    /// Expiry, seconds since epoch
    pub exp: i64,
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<UserId, DomainError> {
        UserId::new(self.sub.clone())
            .map_err(|e| DomainError::authorization(format!("Invalid token subject: {}", e)))
    }
}

/// Token issuing and validation seam
pub trait JwtGenerator: Send + Sync + Debug {
    fn generate(&self, user: &User) -> Result<String, DomainError>;
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 token service
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration: Duration,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            expiration: Duration::hours(config.expiration_hours),
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, user: &User) -> Result<String, DomainError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user.id().as_str().to_string(),
            role: user.role(),
            iat: now.timestamp(),
            exp: (now + self.expiration).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign token: {}", e)))
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| DomainError::authorization(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret-at-least-32-bytes-long!".to_string(),
            expiration_hours: 1,
        })
    }

    fn test_user(role: Role) -> User {
        User::new(UserId::generate(), "Asha", "asha@example.com", "hash", role)
    }

    #[test]
    fn test_generate_and_validate() {
        let service = test_service();
        let user = test_user(Role::Seller);

        let token = service.generate(&user).unwrap();
        let claims = service.validate(&token).unwrap();

        assert_eq!(claims.sub, user.id().as_str());
        assert_eq!(claims.role, Role::Seller);
        assert_eq!(&claims.user_id().unwrap(), user.id());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let service = test_service();
        let other = JwtService::new(&JwtConfig {
            secret: "a-completely-different-secret-value".to_string(),
            expiration_hours: 1,
        });

        let token = service.generate(&test_user(Role::Buyer)).unwrap();
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let service = test_service();
        assert!(service.validate("not.a.token").is_err());
    }
}

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::InvalidCredentials)
    }
}

/// Issues and checks the session value carried in the session cookie.
///
/// The HTTP layer only talks to this trait, so the signing scheme can change
/// without touching routes or middleware.
pub trait SessionVerifier: Send + Sync {
    fn issue(&self, user_id: Uuid) -> AppResult<String>;
    fn verify(&self, token: &str) -> AppResult<Claims>;
    fn ttl(&self) -> Duration;
}

/// HS256 JWT sessions signed with a process-wide secret.
pub struct JwtSessions {
    secret: SecretString,
    ttl: Duration,
}

impl JwtSessions {
    pub fn new(secret: SecretString, ttl: Duration) -> Self {
        Self { secret, ttl }
    }
}

impl SessionVerifier for JwtSessions {
    fn issue(&self, user_id: Uuid) -> AppResult<String> {
        issue(user_id, &self.secret, self.ttl)
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        verify(token, &self.secret)
    }

    fn ttl(&self) -> Duration {
        self.ttl
    }
}

pub fn issue(user_id: Uuid, secret: &SecretString, ttl: Duration) -> AppResult<String> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let exp = now + ttl.whole_seconds();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp,
    };
    let header = Header::new(Algorithm::HS256);
    encode(
        &header,
        &claims,
        &EncodingKey::from_secret(secret.expose_secret().as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn verify(token: &str, secret: &SecretString) -> AppResult<Claims> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose_secret().as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Session token rejected");
        AppError::InvalidCredentials
    })
}

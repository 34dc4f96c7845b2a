use std::net::SocketAddr;

use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use time::Duration;

pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub session_secret: SecretString,
    pub session_ttl: Duration,
    /// Adds the `Secure` attribute to the session cookie. Enable when served over HTTPS.
    pub cookie_secure: bool,
    pub cors_origin: HeaderValue,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url: String = get_env("DATABASE_URL");
        let db_max_connections: u32 = get_env_default("DB_MAX_CONNECTIONS", 5);
        let db_acquire_timeout_secs: u64 = get_env_default("DB_ACQUIRE_TIMEOUT_SECS", 5);

        let session_secret: SecretString =
            SecretString::new(get_env::<String>("SESSION_SECRET").into());
        let session_ttl_hours: i64 = get_env_default("SESSION_TTL_HOURS", 168);
        let cookie_secure: bool = get_env_default("COOKIE_SECURE", false);

        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .expect("CORS_ORIGIN must be a valid header value");

        let bind_addr: SocketAddr = get_env_default(
            "BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 3001)),
        );

        Self {
            database_url,
            db_max_connections,
            db_acquire_timeout_secs,
            session_secret,
            session_ttl: Duration::hours(session_ttl_hours),
            cookie_secure,
            cors_origin,
            bind_addr,
        }
    }
}

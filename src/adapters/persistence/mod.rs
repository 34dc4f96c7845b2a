use sqlx::PgPool;

use crate::app_error::AppError;

pub mod domain;
pub mod service;
pub mod token;
pub mod user;

/// Postgres implementation of every repository trait, sharing one pool.
#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }
}

// SQLSTATE codes not covered by the `DatabaseError` helpers.
const NOT_NULL_VIOLATION: &str = "23502";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) => {
                let code = db_err.code();
                if db_err.is_unique_violation() {
                    AppError::ConstraintViolation("A record with this value already exists".into())
                } else if db_err.is_foreign_key_violation() {
                    AppError::ConstraintViolation("Referenced record not found".into())
                } else if db_err.is_check_violation()
                    || code.as_deref() == Some(NOT_NULL_VIOLATION)
                {
                    AppError::ConstraintViolation("Required field is missing".into())
                } else if code.as_deref() == Some(STRING_DATA_RIGHT_TRUNCATION) {
                    AppError::InvalidInput("Value is too long".into())
                } else {
                    // Log the actual error for debugging, but don't expose details
                    tracing::error!(error = ?err, "Database error");
                    AppError::Database("Database operation failed".into())
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_) => {
                tracing::error!(error = ?err, "Database unreachable");
                AppError::StorageUnavailable(err.to_string())
            }
            _ => {
                tracing::error!(error = ?err, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::validators::{is_valid_password, is_valid_username, MIN_PASSWORD_LEN};
use crate::domain::entities::user::User;

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User>;
    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>>;
    async fn list(&self) -> AppResult<Vec<User>>;
    /// Removes the user and all of their tokens. Returns `false` when nothing matched.
    async fn delete(&self, user_id: Uuid) -> AppResult<bool>;
}

/// Produces and checks the password hashes stored on users.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> AppResult<String>;
    fn verify(&self, password: &str, password_hash: &str) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct AuthUseCases {
    repo: Arc<dyn UserRepo>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthUseCases {
    pub fn new(repo: Arc<dyn UserRepo>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repo, hasher }
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> AppResult<User> {
        let username = username.trim();
        if !is_valid_username(username) {
            return Err(AppError::InvalidInput(
                "Username must be 1-255 characters without spaces".into(),
            ));
        }
        if !is_valid_password(password) {
            return Err(AppError::InvalidInput(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self.repo.create(username, &password_hash).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> AppResult<User> {
        let Some(user) = self.repo.get_by_username(username.trim()).await? else {
            return Err(AppError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        self.repo.get_by_id(user_id).await?.ok_or(AppError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_account(&self, user_id: Uuid) -> AppResult<()> {
        if !self.repo.delete(user_id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(%user_id, "User deleted with their tokens");
        Ok(())
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::app_error::{AppError, AppResult};
use crate::application::validators::is_valid_bounded_text;
use crate::domain::entities::token::{NewToken, Token};
use crate::use_cases::catalog::ServiceRepo;

#[async_trait]
pub trait TokenRepo: Send + Sync {
    async fn create(&self, token: &NewToken) -> AppResult<Token>;
    async fn get_by_id(&self, token_id: Uuid) -> AppResult<Option<Token>>;
    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Token>>;
    async fn list_by_service(&self, service_id: Uuid) -> AppResult<Vec<Token>>;
    async fn set_enabled(&self, token_id: Uuid, enabled: bool) -> AppResult<Token>;
    async fn delete(&self, token_id: Uuid) -> AppResult<bool>;
}

/// Token as shown to its owner. The credential itself is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct TokenView {
    pub id: Uuid,
    pub service_id: Uuid,
    pub in_service_username: String,
    pub enabled: bool,
}

impl From<Token> for TokenView {
    fn from(token: Token) -> Self {
        TokenView {
            id: token.id,
            service_id: token.service_id,
            in_service_username: token.in_service_username,
            enabled: token.enabled,
        }
    }
}

#[derive(Clone)]
pub struct TokenUseCases {
    tokens: Arc<dyn TokenRepo>,
    services: Arc<dyn ServiceRepo>,
}

impl TokenUseCases {
    pub fn new(tokens: Arc<dyn TokenRepo>, services: Arc<dyn ServiceRepo>) -> Self {
        Self { tokens, services }
    }

    #[instrument(skip(self, token))]
    pub async fn add_token(
        &self,
        user_id: Uuid,
        service_id: Uuid,
        in_service_username: &str,
        token: &str,
    ) -> AppResult<TokenView> {
        let in_service_username = in_service_username.trim();
        if !is_valid_bounded_text(in_service_username) {
            return Err(AppError::InvalidInput(
                "Service username must be 1-255 characters".into(),
            ));
        }
        if token.trim().is_empty() {
            return Err(AppError::InvalidInput("Token must not be empty".into()));
        }

        if self.services.get_by_id(service_id).await?.is_none() {
            return Err(AppError::NotFound);
        }

        let created = self
            .tokens
            .create(&NewToken {
                service_id,
                user_id,
                in_service_username: in_service_username.to_string(),
                token: token.to_string(),
            })
            .await?;
        tracing::info!(token_id = %created.id, %service_id, "Token added");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn list_tokens(&self, user_id: Uuid) -> AppResult<Vec<TokenView>> {
        let tokens = self.tokens.list_by_user(user_id).await?;
        Ok(tokens.into_iter().map(TokenView::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn set_enabled(
        &self,
        user_id: Uuid,
        token_id: Uuid,
        enabled: bool,
    ) -> AppResult<TokenView> {
        self.owned_token(user_id, token_id).await?;
        let updated = self.tokens.set_enabled(token_id, enabled).await?;
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn remove_token(&self, user_id: Uuid, token_id: Uuid) -> AppResult<()> {
        self.owned_token(user_id, token_id).await?;
        if !self.tokens.delete(token_id).await? {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    /// Tokens of other users are reported as missing rather than forbidden.
    async fn owned_token(&self, user_id: Uuid, token_id: Uuid) -> AppResult<Token> {
        match self.tokens.get_by_id(token_id).await? {
            Some(token) if token.user_id == user_id => Ok(token),
            _ => Err(AppError::NotFound),
        }
    }
}

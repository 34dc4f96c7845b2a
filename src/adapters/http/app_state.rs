use std::sync::Arc;

use crate::{
    application::jwt::SessionVerifier,
    infra::config::AppConfig,
    use_cases::{catalog::CatalogUseCases, token::TokenUseCases, user::AuthUseCases},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<dyn SessionVerifier>,
    pub auth_use_cases: Arc<AuthUseCases>,
    pub catalog_use_cases: Arc<CatalogUseCases>,
    pub token_use_cases: Arc<TokenUseCases>,
}

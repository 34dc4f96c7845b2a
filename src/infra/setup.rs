use crate::{
    adapters::http::app_state::AppState,
    application::jwt::{JwtSessions, SessionVerifier},
    infra::{
        config::AppConfig, password::Argon2PasswordHasher, postgres_persistence,
        schema::SchemaDefinition,
    },
    use_cases::{
        bootstrap::BootstrapUseCases,
        catalog::{CatalogUseCases, DomainRepo, ServiceRepo},
        token::{TokenRepo, TokenUseCases},
        user::{AuthUseCases, PasswordHasher, UserRepo},
    },
};
use secrecy::{ExposeSecret, SecretString};
use std::fs::File;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Connects to the database, applies the schema and seeds the well-known
/// services. Returns only once the app is ready to serve.
pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env();
    let schema = SchemaDefinition::default();

    let postgres_arc = Arc::new(postgres_persistence(&config, &schema).await?);

    let domain_repo_arc = postgres_arc.clone() as Arc<dyn DomainRepo>;
    let service_repo_arc = postgres_arc.clone() as Arc<dyn ServiceRepo>;
    let token_repo_arc = postgres_arc.clone() as Arc<dyn TokenRepo>;
    let user_repo_arc = postgres_arc.clone() as Arc<dyn UserRepo>;

    let report = BootstrapUseCases::new(domain_repo_arc.clone(), service_repo_arc.clone())
        .ensure_well_known_services(&schema.seed)
        .await?;
    info!(
        created = report.created,
        already_present = report.already_present,
        "Well-known services ready"
    );

    let sessions: Arc<dyn SessionVerifier> = Arc::new(JwtSessions::new(
        SecretString::new(config.session_secret.expose_secret().into()),
        config.session_ttl,
    ));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::default());

    let auth_use_cases = AuthUseCases::new(user_repo_arc, hasher);
    let catalog_use_cases = CatalogUseCases::new(domain_repo_arc, service_repo_arc.clone());
    let token_use_cases = TokenUseCases::new(token_repo_arc, service_repo_arc);

    Ok(AppState {
        config: Arc::new(config),
        sessions,
        auth_use_cases: Arc::new(auth_use_cases),
        catalog_use_cases: Arc::new(catalog_use_cases),
        token_use_cases: Arc::new(token_use_cases),
    })
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "taskviewer=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false) // don’t show target (module path)
        .with_level(true) // show log level
        .pretty(); // human-friendly, with colors

    // File (structured JSON logs), skipped when the file can't be created
    let json_layer = File::create("app.log").ok().map(|file| {
        fmt::layer()
            .json()
            .with_writer(file)
            .with_current_span(true)
            .with_span_list(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}

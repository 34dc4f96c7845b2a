use crate::{
    adapters::persistence::PostgresPersistence,
    infra::{config::AppConfig, db::init_db, schema::SchemaDefinition},
};

pub mod app;
pub mod config;
pub mod db;
pub mod password;
pub mod schema;
pub mod setup;

pub async fn postgres_persistence(
    config: &AppConfig,
    schema: &SchemaDefinition,
) -> anyhow::Result<PostgresPersistence> {
    let pool = init_db(
        &config.database_url,
        config.db_max_connections,
        config.db_acquire_timeout_secs,
        schema,
    )
    .await?;
    let persistence = PostgresPersistence::new(pool);
    Ok(persistence)
}

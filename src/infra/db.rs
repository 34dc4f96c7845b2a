use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use crate::infra::schema::SchemaDefinition;

pub async fn init_db(
    database_url: &str,
    max_connections: u32,
    acquire_timeout_secs: u64,
    schema: &SchemaDefinition,
) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
        .connect(database_url)
        .await
        .map_err(|e| {
            anyhow::anyhow!("Postgres connection failed (check DATABASE_URL/password): {e}")
        })?;

    info!("Connected to database!");

    schema.apply(&pool).await?;
    Ok(pool)
}

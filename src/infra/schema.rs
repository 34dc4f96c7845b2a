use sqlx::{PgPool, migrate::Migrator};
use tracing::info;

use crate::use_cases::bootstrap::SeedCatalog;

/// Embedded migrations under `./migrations`, including the seed domain rows.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Everything the database must contain before the app serves traffic:
/// the table layout and the reference data the bootstrap checks for.
pub struct SchemaDefinition {
    pub migrator: &'static Migrator,
    pub seed: SeedCatalog,
}

impl SchemaDefinition {
    pub fn new(migrator: &'static Migrator, seed: SeedCatalog) -> Self {
        Self { migrator, seed }
    }

    pub async fn apply(&self, pool: &PgPool) -> anyhow::Result<()> {
        self.migrator
            .run(pool)
            .await
            .map_err(|e| anyhow::anyhow!("Running migrations failed: {e}"))?;
        info!(
            migrations = self.migrator.iter().count(),
            "Database schema is up to date"
        );
        Ok(())
    }
}

impl Default for SchemaDefinition {
    fn default() -> Self {
        Self::new(&MIGRATOR, SeedCatalog::well_known())
    }
}

use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::domain::Domain,
    use_cases::catalog::DomainRepo,
};

fn row_to_domain(row: sqlx::postgres::PgRow) -> Domain {
    Domain {
        id: row.get("id"),
        name: row.get("domain"),
    }
}

#[async_trait]
impl DomainRepo for PostgresPersistence {
    async fn create(&self, name: &str) -> AppResult<Domain> {
        let id = Uuid::new_v4();
        let row = sqlx::query("INSERT INTO domains (id, domain) VALUES ($1, $2) RETURNING id, domain")
            .bind(id)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row_to_domain(row))
    }

    async fn get_by_id(&self, domain_id: Uuid) -> AppResult<Option<Domain>> {
        let row = sqlx::query("SELECT id, domain FROM domains WHERE id = $1")
            .bind(domain_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row.map(row_to_domain))
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Domain>> {
        let row = sqlx::query("SELECT id, domain FROM domains WHERE domain = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(row.map(row_to_domain))
    }

    async fn list(&self) -> AppResult<Vec<Domain>> {
        let rows = sqlx::query("SELECT id, domain FROM domains ORDER BY domain")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_domain).collect())
    }

    async fn delete(&self, domain_id: Uuid) -> AppResult<bool> {
        // Children first, all in one transaction.
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        sqlx::query(
            r#"
                DELETE FROM tokens
                WHERE service_id IN (SELECT id FROM services WHERE domain_id = $1)
            "#,
        )
        .bind(domain_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::from)?;

        sqlx::query("DELETE FROM services WHERE domain_id = $1")
            .bind(domain_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        let result = sqlx::query("DELETE FROM domains WHERE id = $1")
            .bind(domain_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}

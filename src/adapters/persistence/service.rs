use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::{
        service::{NewService, Service},
        service_type::ServiceType,
    },
    use_cases::catalog::ServiceRepo,
};

fn row_to_service(row: sqlx::postgres::PgRow) -> AppResult<Service> {
    Ok(Service {
        id: row.try_get("id")?,
        domain_id: row.try_get("domain_id")?,
        name: row.try_get("name")?,
        service_type: decode_service_type(row.try_get("type")?)?,
    })
}

/// Rows written by other clients may carry types this build doesn't know.
fn decode_service_type(raw: i32) -> AppResult<ServiceType> {
    ServiceType::from_i32(raw).ok_or_else(|| {
        tracing::error!(service_type = raw, "Unknown service type in services table");
        AppError::Database(format!("Unknown service type {raw}"))
    })
}

#[async_trait]
impl ServiceRepo for PostgresPersistence {
    async fn create(&self, service: &NewService) -> AppResult<Service> {
        let id = Uuid::new_v4();
        let row = sqlx::query(
            r#"
                INSERT INTO services (id, domain_id, name, type)
                VALUES ($1, $2, $3, $4)
                RETURNING id, domain_id, name, type
            "#,
        )
        .bind(id)
        .bind(service.domain_id)
        .bind(&service.name)
        .bind(service.service_type)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        row_to_service(row)
    }

    async fn get_by_id(&self, service_id: Uuid) -> AppResult<Option<Service>> {
        let row = sqlx::query("SELECT id, domain_id, name, type FROM services WHERE id = $1")
            .bind(service_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        row.map(row_to_service).transpose()
    }

    async fn get_by_name(&self, name: &str) -> AppResult<Option<Service>> {
        let row = sqlx::query("SELECT id, domain_id, name, type FROM services WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from)?;
        row.map(row_to_service).transpose()
    }

    async fn find_by_domain(&self, domain: &str) -> AppResult<Option<Service>> {
        let row = sqlx::query(
            r#"
                SELECT s.id, s.domain_id, s.name, s.type
                FROM services s
                JOIN domains d ON d.id = s.domain_id
                WHERE d.domain = $1
                ORDER BY s.name
                LIMIT 1
            "#,
        )
        .bind(domain)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        row.map(row_to_service).transpose()
    }

    async fn list(&self) -> AppResult<Vec<Service>> {
        let rows = sqlx::query("SELECT id, domain_id, name, type FROM services ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::from)?;
        rows.into_iter().map(row_to_service).collect()
    }

    async fn list_by_domain(&self, domain_id: Uuid) -> AppResult<Vec<Service>> {
        let rows = sqlx::query(
            "SELECT id, domain_id, name, type FROM services WHERE domain_id = $1 ORDER BY name",
        )
        .bind(domain_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        rows.into_iter().map(row_to_service).collect()
    }

    async fn delete(&self, service_id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        sqlx::query("DELETE FROM tokens WHERE service_id = $1")
            .bind(service_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(service_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}

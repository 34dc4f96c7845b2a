use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::token::{NewToken, Token},
    use_cases::token::TokenRepo,
};

fn row_to_token(row: sqlx::postgres::PgRow) -> Token {
    Token {
        id: row.get("id"),
        service_id: row.get("service_id"),
        user_id: row.get("user_id"),
        in_service_username: row.get("in_service_username"),
        token: row.get("token"),
        enabled: row.get("enabled"),
    }
}

#[async_trait]
impl TokenRepo for PostgresPersistence {
    async fn create(&self, token: &NewToken) -> AppResult<Token> {
        let id = Uuid::new_v4();
        // `enabled` comes from the column default.
        let row = sqlx::query(
            r#"
                INSERT INTO tokens (id, service_id, user_id, in_service_username, token)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, service_id, user_id, in_service_username, token, enabled
            "#,
        )
        .bind(id)
        .bind(token.service_id)
        .bind(token.user_id)
        .bind(&token.in_service_username)
        .bind(&token.token)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_token(row))
    }

    async fn get_by_id(&self, token_id: Uuid) -> AppResult<Option<Token>> {
        let row = sqlx::query(
            "SELECT id, service_id, user_id, in_service_username, token, enabled FROM tokens WHERE id = $1",
        )
        .bind(token_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.map(row_to_token))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AppResult<Vec<Token>> {
        let rows = sqlx::query(
            r#"
                SELECT id, service_id, user_id, in_service_username, token, enabled
                FROM tokens
                WHERE user_id = $1
                ORDER BY in_service_username, id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_token).collect())
    }

    async fn list_by_service(&self, service_id: Uuid) -> AppResult<Vec<Token>> {
        let rows = sqlx::query(
            r#"
                SELECT id, service_id, user_id, in_service_username, token, enabled
                FROM tokens
                WHERE service_id = $1
                ORDER BY in_service_username, id
            "#,
        )
        .bind(service_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rows.into_iter().map(row_to_token).collect())
    }

    async fn set_enabled(&self, token_id: Uuid, enabled: bool) -> AppResult<Token> {
        let row = sqlx::query(
            r#"
                UPDATE tokens
                SET enabled = $2
                WHERE id = $1
                RETURNING id, service_id, user_id, in_service_username, token, enabled
            "#,
        )
        .bind(token_id)
        .bind(enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row_to_token(row))
    }

    async fn delete(&self, token_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tokens WHERE id = $1")
            .bind(token_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}

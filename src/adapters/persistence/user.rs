use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::user::User,
    use_cases::user::UserRepo,
};

// User struct as stored in the db.
#[derive(sqlx::FromRow, Debug)]
struct UserDb {
    id: Uuid,
    username: String,
    password_hash: String,
}

impl From<UserDb> for User {
    fn from(row: UserDb) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl UserRepo for PostgresPersistence {
    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let id = Uuid::new_v4();
        let rec = sqlx::query_as::<_, UserDb>(
            r#"INSERT INTO users (id, username, password_hash)
               VALUES ($1, $2, $3)
               RETURNING id, username, password_hash"#,
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.into())
    }

    async fn get_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(
            "SELECT id, username, password_hash FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let rec = sqlx::query_as::<_, UserDb>(
            "SELECT id, username, password_hash FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(rec.map(User::from))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let recs = sqlx::query_as::<_, UserDb>(
            "SELECT id, username, password_hash FROM users ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(recs.into_iter().map(User::from).collect())
    }

    async fn delete(&self, user_id: Uuid) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        sqlx::query("DELETE FROM tokens WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::from)?;

        tx.commit().await.map_err(AppError::from)?;
        Ok(result.rows_affected() > 0)
    }
}

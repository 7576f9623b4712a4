//! User queries on the PostgreSQL repository

use async_trait::async_trait;

use super::{Repository, UserStore};
use crate::{error::AppResult, models::User};

const USER_COLUMNS: &str = "id, username, password_hash, is_active, created_at";

#[async_trait]
impl UserStore for Repository {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, username: &str, password_hash: &str) -> AppResult<User> {
        let query = format!(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
